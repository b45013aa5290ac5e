//! Botanical records from the Trefle species API

use anyhow::Result;
use leaflens_core::config::ProviderEndpoint;
use leaflens_core::providers::{async_trait, BotanicalProvider, BotanicalRecord, BotanicalSummary};
use leaflens_core::LeafResult;
use serde::Deserialize;
use std::time::Duration;

use crate::client::ApiClient;

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct SpeciesHit {
    id: u64,
    #[serde(default)]
    scientific_name: Option<String>,
    #[serde(default)]
    common_name: Option<String>,
    #[serde(default)]
    family: Option<String>,
    #[serde(default)]
    family_common_name: Option<String>,
    #[serde(default)]
    genus: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

impl SpeciesHit {
    fn into_summary(self) -> Option<BotanicalSummary> {
        let scientific_name = self.scientific_name.filter(|n| !n.trim().is_empty())?;
        Some(BotanicalSummary {
            id: self.id.to_string(),
            scientific_name,
            common_name: self.common_name,
            family: self.family,
            family_common_name: self.family_common_name,
            genus: self.genus,
            image_url: self.image_url,
        })
    }
}

pub struct TrefleProvider {
    client: ApiClient,
}

impl TrefleProvider {
    pub fn new(endpoint: &ProviderEndpoint, timeout: Duration) -> Result<Self> {
        let mut client = ApiClient::new("trefle", &endpoint.base_url, timeout)?;
        if let Some(key) = &endpoint.api_key {
            client = client.with_header("Authorization", format!("Bearer {}", key));
        }
        Ok(Self { client })
    }
}

#[async_trait]
impl BotanicalProvider for TrefleProvider {
    fn name(&self) -> &'static str {
        self.client.provider()
    }

    async fn search(&self, query: &str) -> LeafResult<Vec<BotanicalSummary>> {
        let hits: Envelope<Vec<SpeciesHit>> =
            self.client.get("/species/search", &[("q", query)]).await?;

        Ok(hits
            .data
            .into_iter()
            .filter_map(SpeciesHit::into_summary)
            .collect())
    }

    async fn details(&self, id: &str) -> LeafResult<BotanicalRecord> {
        let record: Envelope<BotanicalRecord> =
            self.client.get(&format!("/species/{}", id), &[]).await?;
        Ok(record.data)
    }
}
