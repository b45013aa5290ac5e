//! Photo identification followed by detail enrichment

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::aggregator::DetailAggregator;
use crate::config::Config;
use crate::error::{LeafError, LeafResult};
use crate::models::{PlantDetails, PlantIdentification};
use crate::providers::{with_timeout, IdentificationProvider};

pub struct IdentificationOrchestrator {
    identifier: Arc<dyn IdentificationProvider>,
    aggregator: Arc<DetailAggregator>,
    timeout: Duration,
}

impl IdentificationOrchestrator {
    pub fn new(
        config: &Config,
        identifier: Arc<dyn IdentificationProvider>,
        aggregator: Arc<DetailAggregator>,
    ) -> Self {
        Self {
            identifier,
            aggregator,
            timeout: config.identification_timeout,
        }
    }

    /// Every ranked species guess for `image`, most confident first
    pub async fn candidates(&self, image: &[u8]) -> LeafResult<Vec<PlantIdentification>> {
        if image.is_empty() {
            return Err(LeafError::InvalidInput("image is empty".to_string()));
        }

        let encoded = BASE64.encode(image);
        with_timeout(
            self.identifier.name(),
            self.timeout,
            self.identifier.identify(&encoded),
        )
        .await
    }

    /// Identify `image` and enrich the top guess.
    ///
    /// `Ok(None)` means the provider had no suggestions. Provider failure and
    /// timeout are returned as errors so the caller can offer a retry.
    pub async fn identify(&self, image: &[u8]) -> LeafResult<Option<PlantDetails>> {
        let Some(top) = self.candidates(image).await?.into_iter().next() else {
            info!("No plant identification results");
            return Ok(None);
        };

        let floor = top.to_floor();
        info!(
            scientific_name = %floor.scientific_name,
            common_name = %top.primary_common_name(),
            confidence = top.confidence,
            "Plant identified"
        );

        let details = self
            .aggregator
            .details_with_floor(&floor.scientific_name, &floor)
            .await;
        Ok(Some(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::PlantCache;
    use crate::storage::MemoryStore;
    use crate::testing::{identification, StubBotanical, StubGenerative, StubIdentifier};

    fn orchestrator(identifier: Arc<StubIdentifier>, botanical: StubBotanical) -> IdentificationOrchestrator {
        let config = Config::with_defaults();
        let aggregator = Arc::new(DetailAggregator::new(
            &config,
            PlantCache::new(Arc::new(MemoryStore::new()), config.cache_ttl),
            Arc::new(botanical),
            Arc::new(StubGenerative::failing()),
        ));
        IdentificationOrchestrator::new(&config, identifier, aggregator)
    }

    #[tokio::test]
    async fn test_zero_suggestions_is_none() {
        let identifier = Arc::new(StubIdentifier::suggesting(vec![]));
        let result = orchestrator(identifier, StubBotanical::empty())
            .identify(b"jpeg bytes")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_image_is_base64_encoded() {
        let identifier = Arc::new(StubIdentifier::suggesting(vec![]));
        orchestrator(identifier.clone(), StubBotanical::empty())
            .identify(b"hello")
            .await
            .unwrap();
        assert_eq!(identifier.last_image().as_deref(), Some("aGVsbG8="));
    }

    #[tokio::test]
    async fn test_floor_fills_placeholders() {
        let identifier = Arc::new(StubIdentifier::suggesting(vec![
            identification("Ficus lyrata", "Fiddle-leaf fig", "Moraceae", 0.92),
            identification("Ficus elastica", "Rubber plant", "Moraceae", 0.05),
        ]));
        let details = orchestrator(identifier, StubBotanical::empty())
            .identify(b"jpeg")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(details.scientific_name, "Ficus lyrata");
        assert_eq!(details.common_name.as_deref(), Some("Fiddle-leaf fig"));
        assert_eq!(details.family.as_deref(), Some("Moraceae"));
        assert_eq!(details.genus.as_deref(), Some("Ficus"));
        assert_eq!(
            details.description.as_deref(),
            Some("Fiddle-leaf fig (Ficus lyrata) is a plant species.")
        );
        assert_eq!(details.taxonomy.as_ref().unwrap()["family"], "Moraceae");
    }

    #[tokio::test]
    async fn test_provider_data_beats_floor() {
        let identifier = Arc::new(StubIdentifier::suggesting(vec![identification(
            "Ficus lyrata",
            "Fiddle-leaf fig",
            "Wrongaceae",
            0.9,
        )]));
        let details = orchestrator(identifier, StubBotanical::with_family("Ficus lyrata", "Moraceae"))
            .identify(b"jpeg")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(details.family.as_deref(), Some("Moraceae"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_error() {
        let identifier = Arc::new(StubIdentifier::failing());
        let result = orchestrator(identifier, StubBotanical::empty())
            .identify(b"jpeg")
            .await;
        assert!(matches!(result, Err(LeafError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_empty_image_rejected() {
        let identifier = Arc::new(StubIdentifier::suggesting(vec![]));
        let result = orchestrator(identifier, StubBotanical::empty()).identify(&[]).await;
        assert!(matches!(result, Err(LeafError::InvalidInput(_))));
    }
}
