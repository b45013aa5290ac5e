//! Photo identification through the Plant.id v2 API

use anyhow::Result;
use leaflens_core::config::ProviderEndpoint;
use leaflens_core::providers::{async_trait, IdentificationProvider};
use leaflens_core::{LeafResult, PlantIdentification, Taxonomy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::client::ApiClient;

#[derive(Serialize)]
struct IdentifyRequest<'a> {
    images: [&'a str; 1],
    modifiers: [&'static str; 2],
    plant_language: &'static str,
    plant_details: [&'static str; 4],
}

impl<'a> IdentifyRequest<'a> {
    fn new(image_base64: &'a str) -> Self {
        Self {
            images: [image_base64],
            modifiers: ["crops_fast", "similar_images"],
            plant_language: "en",
            plant_details: ["common_names", "scientific_name", "taxonomy", "description"],
        }
    }
}

#[derive(Deserialize)]
struct IdentifyResponse {
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}

#[derive(Deserialize)]
struct Suggestion {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    plant_name: Option<String>,
    #[serde(default)]
    probability: f64,
    #[serde(default)]
    plant_details: SuggestionDetails,
    #[serde(default)]
    similar_images: Vec<SimilarImage>,
}

#[derive(Default, Deserialize)]
struct SuggestionDetails {
    #[serde(default)]
    common_names: Option<Vec<String>>,
    #[serde(default)]
    scientific_name: Option<String>,
    #[serde(default)]
    taxonomy: Option<Taxonomy>,
    #[serde(default)]
    description: Option<WikiDescription>,
}

#[derive(Deserialize)]
struct WikiDescription {
    #[serde(default)]
    value: String,
}

#[derive(Deserialize)]
struct SimilarImage {
    url: String,
}

impl Suggestion {
    fn into_identification(self) -> PlantIdentification {
        let id = match self.id {
            Some(serde_json::Value::String(id)) => id,
            Some(serde_json::Value::Number(id)) => id.to_string(),
            _ => uuid::Uuid::new_v4().to_string(),
        };
        let details = self.plant_details;

        PlantIdentification {
            id,
            name: self
                .plant_name
                .or(details.scientific_name)
                .unwrap_or_default(),
            common_names: details.common_names.unwrap_or_default(),
            confidence: self.probability,
            taxonomy: details.taxonomy.unwrap_or_default(),
            description: details.description.map(|d| d.value).unwrap_or_default(),
            image_url: self.similar_images.into_iter().next().map(|image| image.url),
        }
    }
}

pub struct PlantIdProvider {
    client: ApiClient,
}

impl PlantIdProvider {
    pub fn new(endpoint: &ProviderEndpoint, timeout: Duration) -> Result<Self> {
        let mut client = ApiClient::new("plant.id", &endpoint.base_url, timeout)?;
        if let Some(key) = &endpoint.api_key {
            client = client.with_header("Api-Key", key.clone());
        }
        Ok(Self { client })
    }
}

#[async_trait]
impl IdentificationProvider for PlantIdProvider {
    fn name(&self) -> &'static str {
        self.client.provider()
    }

    async fn identify(&self, image_base64: &str) -> LeafResult<Vec<PlantIdentification>> {
        let response: IdentifyResponse = self
            .client
            .post("", &IdentifyRequest::new(image_base64))
            .await?;

        Ok(response
            .suggestions
            .into_iter()
            .map(Suggestion::into_identification)
            .collect())
    }
}
