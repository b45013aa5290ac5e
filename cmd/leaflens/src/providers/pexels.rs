//! Stock photos from the Pexels search API

use anyhow::Result;
use leaflens_core::config::ProviderEndpoint;
use leaflens_core::providers::{async_trait, ImageSearchProvider};
use leaflens_core::{LeafResult, PlantImage};
use serde::Deserialize;
use std::time::Duration;

use crate::client::ApiClient;

const PER_PAGE: &str = "10";

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Deserialize)]
struct Photo {
    id: u64,
    #[serde(default)]
    photographer: String,
    #[serde(default)]
    alt: Option<String>,
    src: PhotoSources,
}

#[derive(Deserialize)]
struct PhotoSources {
    medium: String,
}

pub struct PexelsProvider {
    client: ApiClient,
}

impl PexelsProvider {
    pub fn new(endpoint: &ProviderEndpoint, timeout: Duration) -> Result<Self> {
        let mut client = ApiClient::new("pexels", &endpoint.base_url, timeout)?;
        if let Some(key) = &endpoint.api_key {
            client = client.with_header("Authorization", key.clone());
        }
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageSearchProvider for PexelsProvider {
    fn name(&self) -> &'static str {
        self.client.provider()
    }

    /// Up to ten photos for `"<query> plant"`
    async fn search(&self, query: &str) -> LeafResult<Vec<PlantImage>> {
        let subject = format!("{} plant", query.trim());
        let response: SearchResponse = self
            .client
            .get("/search", &[("query", subject.as_str()), ("per_page", PER_PAGE)])
            .await?;

        Ok(response
            .photos
            .into_iter()
            .map(|photo| PlantImage {
                id: photo.id.to_string(),
                url: photo.src.medium,
                photographer: photo.photographer,
                alt_text: photo
                    .alt
                    .filter(|alt| !alt.trim().is_empty())
                    .unwrap_or_else(|| subject.clone()),
            })
            .collect())
    }
}
