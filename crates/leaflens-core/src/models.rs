//! Plant records and the small value types that travel with them

use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_DESCRIPTION: &str = "Loading plant information...";
pub const PLACEHOLDER_CARE_LEVEL: &str = "Medium";
pub const PLACEHOLDER_WATERING: &str = "Regular watering needed";
pub const PLACEHOLDER_SUNLIGHT: &str = "Moderate sunlight";

/// Strip any parenthetical annotation and surrounding whitespace.
///
/// `"Monstera deliciosa (Swiss cheese plant)"` becomes `"Monstera deliciosa"`.
/// The result is the key used for the cache and every provider call.
pub fn normalize_scientific_name(input: &str) -> String {
    input
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Merged plant record produced by the detail aggregator.
///
/// Everything except the scientific name is optional; the aggregator fills
/// the gaps with placeholder text before returning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantDetails {
    pub scientific_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Easy / Medium / Hard, loosely typed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub care_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watering: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunlight: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub care_guide: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flower_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<String>,
}

/// Overwrite `slot` when `value` carries something.
fn take(slot: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Fill `slot` only when it is still empty.
fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

impl PlantDetails {
    /// Empty record carrying only its identity
    pub fn new(scientific_name: impl Into<String>) -> Self {
        Self {
            scientific_name: scientific_name.into(),
            ..Default::default()
        }
    }

    /// Record returned before (or instead of) any provider data
    pub fn placeholder(scientific_name: impl Into<String>) -> Self {
        let mut details = Self::new(scientific_name);
        details.fill_placeholders();
        details
    }

    /// Provider fields win: every populated field of `other` replaces ours.
    pub fn overlay(&mut self, other: PlantDetails) {
        if !other.scientific_name.trim().is_empty() {
            self.scientific_name = other.scientific_name;
        }
        take(&mut self.common_name, other.common_name);
        take(&mut self.family, other.family);
        take(&mut self.genus, other.genus);
        take(&mut self.description, other.description);
        take(&mut self.care_level, other.care_level);
        take(&mut self.watering, other.watering);
        if other.sunlight.is_some() {
            self.sunlight = other.sunlight;
        }
        take(&mut self.uses, other.uses);
        take(&mut self.distribution, other.distribution);
        take(&mut self.care_guide, other.care_guide);
        take(&mut self.flower_color, other.flower_color);
        take(&mut self.native_status, other.native_status);
        take(&mut self.growth_rate, other.growth_rate);
        take(&mut self.soil_type, other.soil_type);
        if other.taxonomy.is_some() {
            self.taxonomy = other.taxonomy;
        }
        take(&mut self.image_url, other.image_url);
        if !other.gallery.is_empty() {
            self.gallery = other.gallery;
        }
    }

    /// Keep what we have, take the rest from `other`.
    ///
    /// `care_guide` and `uses` are the exception: a value from `other`
    /// always replaces ours.
    pub fn merge_narrative(&mut self, other: PlantDetails) {
        take(&mut self.care_guide, other.care_guide);
        take(&mut self.uses, other.uses);

        fill(&mut self.common_name, other.common_name);
        fill(&mut self.family, other.family);
        fill(&mut self.genus, other.genus);
        fill(&mut self.description, other.description);
        fill(&mut self.care_level, other.care_level);
        fill(&mut self.watering, other.watering);
        fill(&mut self.sunlight, other.sunlight);
        fill(&mut self.distribution, other.distribution);
        fill(&mut self.flower_color, other.flower_color);
        fill(&mut self.native_status, other.native_status);
        fill(&mut self.growth_rate, other.growth_rate);
        fill(&mut self.soil_type, other.soil_type);
        fill(&mut self.taxonomy, other.taxonomy);
        fill(&mut self.image_url, other.image_url);
        if self.gallery.is_empty() {
            self.gallery = other.gallery;
        }
    }

    /// Populate every still-empty placeholder field.
    pub fn fill_placeholders(&mut self) {
        if self.common_name.is_none() {
            self.common_name = Some(self.scientific_name.clone());
        }
        fill(&mut self.description, Some(PLACEHOLDER_DESCRIPTION.to_string()));
        fill(&mut self.care_level, Some(PLACEHOLDER_CARE_LEVEL.to_string()));
        fill(&mut self.watering, Some(PLACEHOLDER_WATERING.to_string()));
        fill(&mut self.sunlight, Some(vec![PLACEHOLDER_SUNLIGHT.to_string()]));
    }

    /// Apply a lower-priority record: its values replace fields that are
    /// empty or still hold placeholder text, and nothing else.
    pub fn apply_floor(&mut self, floor: &PlantDetails) {
        let generic_common_name = match self.common_name.as_deref() {
            None => true,
            Some(name) => name == self.scientific_name || name.eq_ignore_ascii_case("unknown"),
        };
        if generic_common_name && floor.common_name.is_some() {
            self.common_name = floor.common_name.clone();
        }

        if self.description.is_none() || self.has_placeholder_description() {
            if let Some(description) = &floor.description {
                self.description = Some(description.clone());
            }
        }

        fill(&mut self.family, floor.family.clone());
        fill(&mut self.genus, floor.genus.clone());
        fill(&mut self.taxonomy, floor.taxonomy.clone());
        fill(&mut self.image_url, floor.image_url.clone());
    }

    /// True when the description is still the loading placeholder
    pub fn has_placeholder_description(&self) -> bool {
        self.description.as_deref() == Some(PLACEHOLDER_DESCRIPTION)
    }

    /// Name to show a person: common name when known, else scientific name
    pub fn display_name(&self) -> &str {
        self.common_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.scientific_name)
    }
}

/// Entry in the recent-search list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryItem {
    pub query: String,
    /// Epoch milliseconds
    pub timestamp: i64,
}

/// Taxonomic ranks reported by the identification provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    #[serde(default)]
    pub kingdom: Option<String>,
    #[serde(default)]
    pub phylum: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub genus: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
}

/// One ranked species guess for a photo. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantIdentification {
    pub id: String,
    /// Scientific name
    pub name: String,
    pub common_names: Vec<String>,
    /// Probability in [0, 1]
    pub confidence: f64,
    pub taxonomy: Taxonomy,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl PlantIdentification {
    /// First reported common name, or "Unknown"
    pub fn primary_common_name(&self) -> &str {
        self.common_names
            .first()
            .map(String::as_str)
            .unwrap_or("Unknown")
    }

    /// Lower-priority record used to back-fill aggregated details
    pub fn to_floor(&self) -> PlantDetails {
        let scientific_name = if self.name.trim().is_empty() {
            "Unknown".to_string()
        } else {
            self.name.clone()
        };
        let common_name = self.primary_common_name().to_string();

        let description = if self.description.trim().is_empty() {
            format!("{} ({}) is a plant species.", common_name, scientific_name)
        } else {
            self.description.clone()
        };

        PlantDetails {
            common_name: Some(common_name),
            family: self.taxonomy.family.clone(),
            genus: self.taxonomy.genus.clone(),
            description: Some(description),
            taxonomy: serde_json::to_value(&self.taxonomy).ok(),
            image_url: self.image_url.clone(),
            ..PlantDetails::new(scientific_name)
        }
    }
}

/// Photo returned by the image search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantImage {
    pub id: String,
    pub url: String,
    pub photographer: String,
    pub alt_text: String,
}
