//! Detail aggregation: cache, then botanical records, then the generative
//! care narrative, merged field by field into one `PlantDetails`.
//!
//! # Merge order
//!
//! ```text
//! description / watering / sunlight:  botanical -> generative -> placeholder
//! careGuide / uses:                   generative -> botanical
//! everything else:                    botanical -> generative -> placeholder (if any)
//! ```
//!
//! The two provider calls run one after the other, each raced against its
//! own timer. Any provider failure is logged and skipped; the lookup itself
//! never fails.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::cache::PlantCache;
use crate::config::Config;
use crate::error::LeafResult;
use crate::models::{normalize_scientific_name, PlantDetails};
use crate::now_millis;
use crate::providers::generative::{care_prompt, CareNarrative};
use crate::providers::{with_timeout, BotanicalProvider, GenerativeProvider};

/// Name used when the caller's input normalizes to nothing
pub const UNKNOWN_PLANT: &str = "Unknown";

pub struct DetailAggregator {
    cache: PlantCache,
    botanical: Arc<dyn BotanicalProvider>,
    generative: Arc<dyn GenerativeProvider>,
    botanical_timeout: Duration,
    generative_timeout: Duration,
}

impl DetailAggregator {
    pub fn new(
        config: &Config,
        cache: PlantCache,
        botanical: Arc<dyn BotanicalProvider>,
        generative: Arc<dyn GenerativeProvider>,
    ) -> Self {
        Self {
            cache,
            botanical,
            generative,
            botanical_timeout: config.botanical_timeout,
            generative_timeout: config.generative_timeout,
        }
    }

    pub fn cache(&self) -> &PlantCache {
        &self.cache
    }

    /// Best-effort record for `scientific_name`.
    ///
    /// A fresh cache entry is returned as-is with no provider traffic.
    /// Otherwise the merged result is written back to the cache even when
    /// every provider failed, so a placeholder can be served until it expires.
    pub async fn details(&self, scientific_name: &str) -> PlantDetails {
        let key = normalize_scientific_name(scientific_name);
        if key.is_empty() {
            warn!(input = %scientific_name, "Blank plant name, returning placeholder");
            return PlantDetails::placeholder(UNKNOWN_PLANT);
        }

        match self.cache.get_fresh(&key, now_millis()).await {
            Ok(Some(cached)) => {
                info!(key = %key, "Cache hit");
                return cached;
            }
            Ok(None) => debug!(key = %key, "Cache miss"),
            Err(e) => warn!(key = %key, error = %e, "Cache read failed, treating as miss"),
        }

        let details = self.aggregate(&key).await;

        if let Err(e) = self.cache.put(&key, &details).await {
            warn!(key = %key, error = %e, "Cache write failed");
        }

        details
    }

    /// `details` with a lower-priority record filling placeholder fields.
    /// The floor is not written to the cache.
    pub async fn details_with_floor(&self, scientific_name: &str, floor: &PlantDetails) -> PlantDetails {
        let mut details = self.details(scientific_name).await;
        details.apply_floor(floor);
        details
    }

    /// Provider pass for a normalized key, bypassing the cache
    pub async fn aggregate(&self, key: &str) -> PlantDetails {
        let mut record = PlantDetails::new(key);

        let started = Instant::now();
        match with_timeout(
            self.botanical.name(),
            self.botanical_timeout,
            self.fetch_botanical(key),
        )
        .await
        {
            Ok(Some(partial)) => {
                debug!(
                    key = %key,
                    provider = self.botanical.name(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Botanical record merged"
                );
                record.overlay(partial);
            }
            Ok(None) => info!(key = %key, provider = self.botanical.name(), "No botanical match"),
            Err(e) => warn!(
                key = %key,
                provider = self.botanical.name(),
                timed_out = e.is_timeout(),
                error = %e,
                "Botanical lookup failed"
            ),
        }

        let started = Instant::now();
        match with_timeout(
            self.generative.name(),
            self.generative_timeout,
            self.fetch_narrative(key),
        )
        .await
        {
            Ok(partial) => {
                debug!(
                    key = %key,
                    provider = self.generative.name(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Care narrative merged"
                );
                record.merge_narrative(partial);
            }
            Err(e) => warn!(
                key = %key,
                provider = self.generative.name(),
                timed_out = e.is_timeout(),
                error = %e,
                "Care narrative unavailable"
            ),
        }

        record.fill_placeholders();
        record
    }

    /// Search, then fetch the first hit's full record
    async fn fetch_botanical(&self, key: &str) -> LeafResult<Option<PlantDetails>> {
        let Some(summary) = self.botanical.best_match(key).await? else {
            return Ok(None);
        };

        let record = self.botanical.details(&summary.id).await?;
        let mut partial = record.to_partial(key);
        if partial.image_url.is_none() {
            partial.image_url = summary.image_url;
        }
        Ok(Some(partial))
    }

    async fn fetch_narrative(&self, key: &str) -> LeafResult<PlantDetails> {
        let text = self.generative.generate(&care_prompt(key)).await?;
        let narrative = CareNarrative::from_response(&text)?;
        Ok(narrative.into_partial(key))
    }
}
