//! Care narrative requested from the generative-text provider

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::extract::extract_json_object;
use crate::error::LeafResult;
use crate::models::PlantDetails;

/// Prompt asking for the fixed JSON shape `CareNarrative` reads
pub fn care_prompt(scientific_name: &str) -> String {
    format!(
        r#"Provide detailed information about the plant "{name}" in this exact JSON format without any additional text or markdown:
{{
  "commonName": "the most common name",
  "scientificName": "{name}",
  "family": "plant family name",
  "description": "A detailed description of the plant's appearance and characteristics",
  "careLevel": "easy/medium/hard",
  "watering": "specific watering needs (e.g., weekly, bi-weekly)",
  "sunlight": ["primary light need", "alternative light need"],
  "uses": "common uses and benefits of the plant",
  "careGuide": "Step-by-step care instructions",
  "soilType": "preferred soil conditions",
  "growthRate": "slow/moderate/fast"
}}"#,
        name = scientific_name
    )
}

/// Flatten a loosely typed value into text.
///
/// Strings pass through, numbers are printed, lists of those are joined
/// with `separator`. Anything else reads as absent.
fn flatten(value: Value, separator: &str) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .into_iter()
                .filter_map(|item| flatten(item, separator))
                .collect();
            (!parts.is_empty()).then(|| parts.join(separator))
        }
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(flatten(Value::deserialize(deserializer)?, ", "))
}

/// Step lists (`"careGuide": ["Water", "Prune"]`) keep one step per line
fn lenient_steps<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(flatten(Value::deserialize(deserializer)?, "\n"))
}

/// Accept `"sunlight": "Full sun"` as well as `"sunlight": ["Full sun"]`
fn string_or_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.into_iter().filter_map(|item| flatten(item, ", ")).collect()),
        other => flatten(other, ", ").map(|s| vec![s]),
    })
}

/// Typed view of the generative provider's JSON answer
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareNarrative {
    #[serde(default, deserialize_with = "lenient_text")]
    pub common_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub scientific_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub family: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub care_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub watering: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub sunlight: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub uses: Option<String>,
    #[serde(default, deserialize_with = "lenient_steps")]
    pub care_guide: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub soil_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub growth_rate: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CareNarrative {
    /// Parse the first JSON object embedded in a free-form response
    pub fn from_response(text: &str) -> LeafResult<Self> {
        let value = extract_json_object(text)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Partial record; blank strings count as absent
    pub fn into_partial(self, scientific_name: &str) -> PlantDetails {
        let sunlight = self
            .sunlight
            .map(|tags| {
                tags.into_iter()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|tags| !tags.is_empty());

        PlantDetails {
            common_name: non_blank(self.common_name),
            family: non_blank(self.family),
            description: non_blank(self.description),
            care_level: non_blank(self.care_level),
            watering: non_blank(self.watering),
            sunlight,
            uses: non_blank(self.uses),
            care_guide: non_blank(self.care_guide),
            soil_type: non_blank(self.soil_type),
            growth_rate: non_blank(self.growth_rate),
            ..PlantDetails::new(scientific_name)
        }
    }
}
