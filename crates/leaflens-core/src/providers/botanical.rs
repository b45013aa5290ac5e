//! Botanical species records and their mapping onto `PlantDetails`

use serde::{Deserialize, Serialize};

use crate::models::PlantDetails;

/// Mid-point used for a missing difficulty factor (0-10 scale)
const DEFAULT_DIFFICULTY: f64 = 5.0;

/// Search hit from the botanical provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotanicalSummary {
    pub id: String,
    pub scientific_name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub family_common_name: Option<String>,
    #[serde(default)]
    pub genus: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl BotanicalSummary {
    /// Lightweight record for result lists
    pub fn to_partial(&self) -> PlantDetails {
        PlantDetails {
            common_name: non_blank(self.common_name.clone()),
            family: non_blank(self.family_common_name.clone()).or_else(|| non_blank(self.family.clone())),
            genus: non_blank(self.genus.clone()),
            image_url: non_blank(self.image_url.clone()),
            ..PlantDetails::new(self.scientific_name.clone())
        }
    }
}

/// A plain string, or an object carrying a `name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NameRef {
    Name(String),
    Object { name: Option<String> },
}

impl NameRef {
    fn name(&self) -> Option<String> {
        match self {
            NameRef::Name(name) => Some(name.clone()),
            NameRef::Object { name } => name.clone(),
        }
    }
}

/// Light requirement as a 0-10 level, a single tag, or a list of tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LightNeed {
    Level(f64),
    Tag(String),
    Tags(Vec<String>),
}

impl LightNeed {
    fn tags(&self) -> Vec<String> {
        match self {
            LightNeed::Level(level) => vec![light_level_tag(*level).to_string()],
            LightNeed::Tag(tag) => vec![tag.clone()],
            LightNeed::Tags(tags) => tags.clone(),
        }
    }
}

/// Precipitation as a bare number or `{ "mm": n }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Millimetres {
    Value(f64),
    Measured { mm: Option<f64> },
}

impl Millimetres {
    fn mm(&self) -> Option<f64> {
        match self {
            Millimetres::Value(v) => Some(*v),
            Millimetres::Measured { mm } => *mm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Colors {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Growth {
    #[serde(default)]
    pub light: Option<LightNeed>,
    #[serde(default)]
    pub atmospheric_humidity: Option<f64>,
    #[serde(default)]
    pub soil_nutriments: Option<f64>,
    #[serde(default)]
    pub soil_salinity: Option<f64>,
    #[serde(default)]
    pub minimum_precipitation: Option<Millimetres>,
    #[serde(default)]
    pub rate: Option<String>,
    #[serde(default)]
    pub soil_ph: Option<String>,
    #[serde(default)]
    pub ph_minimum: Option<f64>,
    #[serde(default)]
    pub ph_maximum: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Specifications {
    #[serde(default)]
    pub growth_rate: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flower {
    #[serde(default)]
    pub color: Option<Colors>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    #[serde(default)]
    pub native: Vec<String>,
}

/// Full species record from the botanical provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotanicalRecord {
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub family: Option<NameRef>,
    #[serde(default)]
    pub family_common_name: Option<String>,
    #[serde(default)]
    pub genus: Option<NameRef>,
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub growth: Option<Growth>,
    #[serde(default)]
    pub specifications: Option<Specifications>,
    #[serde(default)]
    pub flower: Option<Flower>,
    #[serde(default)]
    pub distribution: Option<Distribution>,
    #[serde(default)]
    pub native_status: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Bucket the mean of humidity, nutriment and salinity demands
pub fn care_level(growth: &Growth) -> &'static str {
    let factors = [
        growth.atmospheric_humidity,
        growth.soil_nutriments,
        growth.soil_salinity,
    ];
    let average = factors
        .iter()
        .map(|factor| factor.unwrap_or(DEFAULT_DIFFICULTY))
        .sum::<f64>()
        / factors.len() as f64;

    if average <= 3.0 {
        "Easy"
    } else if average <= 7.0 {
        "Medium"
    } else {
        "Hard"
    }
}

/// Bucket minimum yearly precipitation in millimetres
pub fn watering_need(minimum_precipitation_mm: f64) -> &'static str {
    if minimum_precipitation_mm < 250.0 {
        "Low water needs"
    } else if minimum_precipitation_mm < 500.0 {
        "Moderate water needs"
    } else {
        "High water needs"
    }
}

fn light_level_tag(level: f64) -> &'static str {
    if level <= 3.0 {
        "Low light"
    } else if level <= 6.0 {
        "Moderate sunlight"
    } else {
        "Full sun"
    }
}

impl BotanicalRecord {
    /// Partial record holding only what the provider actually reported
    pub fn to_partial(&self, fallback_name: &str) -> PlantDetails {
        let scientific_name = non_blank(self.scientific_name.clone())
            .unwrap_or_else(|| fallback_name.to_string());

        let growth = self.growth.as_ref();

        let soil_type = growth.and_then(|g| {
            non_blank(g.soil_ph.clone()).or_else(|| match (g.ph_minimum, g.ph_maximum) {
                (Some(min), Some(max)) => Some(format!("pH {} to {}", min, max)),
                (Some(min), None) => Some(format!("pH {} or above", min)),
                (None, Some(max)) => Some(format!("pH up to {}", max)),
                (None, None) => None,
            })
        });

        let growth_rate = growth
            .and_then(|g| non_blank(g.rate.clone()))
            .or_else(|| {
                self.specifications
                    .as_ref()
                    .and_then(|s| non_blank(s.growth_rate.clone()))
            });

        let flower_color = self
            .flower
            .as_ref()
            .and_then(|f| f.color.as_ref())
            .and_then(|color| match color {
                Colors::One(c) => non_blank(Some(c.clone())),
                Colors::Many(cs) if cs.is_empty() => None,
                Colors::Many(cs) => Some(cs.join(", ")),
            });

        let distribution = self
            .distribution
            .as_ref()
            .filter(|d| !d.native.is_empty())
            .map(|d| d.native.join(", "));

        PlantDetails {
            common_name: non_blank(self.common_name.clone()),
            family: non_blank(self.family_common_name.clone())
                .or_else(|| self.family.as_ref().and_then(NameRef::name)),
            genus: self.genus.as_ref().and_then(NameRef::name),
            description: non_blank(self.observations.clone())
                .or_else(|| non_blank(self.description.clone())),
            care_level: growth.map(|g| care_level(g).to_string()),
            watering: growth
                .and_then(|g| g.minimum_precipitation.as_ref())
                .and_then(Millimetres::mm)
                .map(|mm| watering_need(mm).to_string()),
            sunlight: growth
                .and_then(|g| g.light.as_ref())
                .map(LightNeed::tags)
                .filter(|tags| !tags.is_empty()),
            distribution,
            flower_color,
            native_status: non_blank(self.native_status.clone()),
            growth_rate,
            soil_type,
            image_url: non_blank(self.image_url.clone()),
            ..PlantDetails::new(scientific_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_care_level_buckets() {
        let easy = Growth {
            atmospheric_humidity: Some(2.0),
            soil_nutriments: Some(3.0),
            soil_salinity: Some(1.0),
            ..Default::default()
        };
        assert_eq!(care_level(&easy), "Easy");

        // all missing: (5 + 5 + 5) / 3
        assert_eq!(care_level(&Growth::default()), "Medium");

        let hard = Growth {
            atmospheric_humidity: Some(9.0),
            soil_nutriments: Some(8.0),
            soil_salinity: None,
            ..Default::default()
        };
        // (9 + 8 + 5) / 3 = 7.33
        assert_eq!(care_level(&hard), "Hard");
    }

    #[test]
    fn test_watering_buckets() {
        assert_eq!(watering_need(100.0), "Low water needs");
        assert_eq!(watering_need(250.0), "Moderate water needs");
        assert_eq!(watering_need(499.9), "Moderate water needs");
        assert_eq!(watering_need(500.0), "High water needs");
    }

    #[test]
    fn test_record_mapping() {
        let record: BotanicalRecord = serde_json::from_value(json!({
            "common_name": "Swiss cheese plant",
            "scientific_name": "Monstera deliciosa",
            "family": "Araceae",
            "family_common_name": null,
            "genus": { "name": "Monstera" },
            "observations": "Native to tropical forests",
            "growth": {
                "light": 6,
                "minimum_precipitation": { "mm": 1200 },
                "ph_minimum": 5.5,
                "ph_maximum": 7
            },
            "flower": { "color": ["white", "cream"] },
            "distribution": { "native": ["Mexico", "Panama"] }
        }))
        .unwrap();

        let details = record.to_partial("Monstera deliciosa");
        assert_eq!(details.family.as_deref(), Some("Araceae"));
        assert_eq!(details.genus.as_deref(), Some("Monstera"));
        assert_eq!(details.description.as_deref(), Some("Native to tropical forests"));
        assert_eq!(details.watering.as_deref(), Some("High water needs"));
        assert_eq!(details.care_level.as_deref(), Some("Medium"));
        assert_eq!(details.sunlight, Some(vec!["Moderate sunlight".to_string()]));
        assert_eq!(details.soil_type.as_deref(), Some("pH 5.5 to 7"));
        assert_eq!(details.flower_color.as_deref(), Some("white, cream"));
        assert_eq!(details.distribution.as_deref(), Some("Mexico, Panama"));
    }

    #[test]
    fn test_missing_precipitation_leaves_watering_empty() {
        let record = BotanicalRecord {
            family: Some(NameRef::Name("Araceae".to_string())),
            growth: Some(Growth::default()),
            ..Default::default()
        };
        let details = record.to_partial("Monstera deliciosa");
        assert_eq!(details.scientific_name, "Monstera deliciosa");
        assert_eq!(details.watering, None);
        assert_eq!(details.description, None);
        assert_eq!(details.sunlight, None);
    }

    #[test]
    fn test_no_growth_block_means_no_care_level() {
        let details = BotanicalRecord::default().to_partial("Rosa");
        assert_eq!(details.care_level, None);
    }

    #[test]
    fn test_summary_prefers_family_common_name() {
        let summary = BotanicalSummary {
            id: "1".to_string(),
            scientific_name: "Rosa canina".to_string(),
            common_name: Some("Dog rose".to_string()),
            family: Some("Rosaceae".to_string()),
            family_common_name: Some("Rose family".to_string()),
            genus: Some("Rosa".to_string()),
            image_url: None,
        };
        let details = summary.to_partial();
        assert_eq!(details.family.as_deref(), Some("Rose family"));
        assert_eq!(details.common_name.as_deref(), Some("Dog rose"));
    }
}
