//! Free-text plant search
//!
//! Matching is "first result wins": the botanical provider's ranking is
//! taken as-is, and only the top candidate is enriched through the
//! detail aggregator and given a photo gallery.

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::aggregator::DetailAggregator;
use crate::config::Config;
use crate::history::SearchHistory;
use crate::models::PlantDetails;
use crate::providers::{with_timeout, BotanicalProvider, BotanicalSummary, ImageSearchProvider};

pub struct SearchOrchestrator {
    history: SearchHistory,
    aggregator: Arc<DetailAggregator>,
    botanical: Arc<dyn BotanicalProvider>,
    images: Arc<dyn ImageSearchProvider>,
    botanical_timeout: Duration,
    image_timeout: Duration,
    limit: usize,
}

impl SearchOrchestrator {
    pub fn new(
        config: &Config,
        history: SearchHistory,
        aggregator: Arc<DetailAggregator>,
        botanical: Arc<dyn BotanicalProvider>,
        images: Arc<dyn ImageSearchProvider>,
    ) -> Self {
        Self {
            history,
            aggregator,
            botanical,
            images,
            botanical_timeout: config.botanical_timeout,
            image_timeout: config.image_timeout,
            limit: config.search_limit,
        }
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    /// User-initiated search: records `query` in history, then looks it up.
    ///
    /// An empty list means nothing matched; the caller falls back to a
    /// broader results view.
    pub async fn search(&self, query: &str) -> Vec<PlantDetails> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        if let Err(e) = self.history.add(query).await {
            warn!(query = %query, error = %e, "Failed to record search history");
        }

        self.lookup(query).await
    }

    /// Search without touching history (featured collections use this)
    pub async fn lookup(&self, query: &str) -> Vec<PlantDetails> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let candidates = match with_timeout(
            self.botanical.name(),
            self.botanical_timeout,
            self.botanical.search(query),
        )
        .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(
                    query = %query,
                    provider = self.botanical.name(),
                    timed_out = e.is_timeout(),
                    error = %e,
                    "Search failed"
                );
                return Vec::new();
            }
        };

        let mut candidates = candidates.into_iter().take(self.limit);
        let Some(top) = candidates.next() else {
            info!(query = %query, "No search results");
            return Vec::new();
        };

        let mut results = vec![self.enrich(&top).await];
        results.extend(candidates.map(|candidate| candidate.to_partial()));

        info!(query = %query, results = results.len(), "Search complete");
        results
    }

    /// Full details for the winning candidate, with its search hit as floor
    async fn enrich(&self, top: &BotanicalSummary) -> PlantDetails {
        let floor = top.to_partial();
        let mut details = self
            .aggregator
            .details_with_floor(&top.scientific_name, &floor)
            .await;

        details.gallery = self.gallery(details.display_name()).await;
        if details.image_url.is_none() {
            details.image_url = details.gallery.first().cloned();
        }
        details
    }

    /// Photo URLs for a plant; empty when the image provider fails
    pub async fn gallery(&self, name: &str) -> Vec<String> {
        match with_timeout(self.images.name(), self.image_timeout, self.images.search(name)).await {
            Ok(images) => images.into_iter().map(|image| image.url).collect(),
            Err(e) => {
                warn!(name = %name, provider = self.images.name(), error = %e, "Image search failed");
                Vec::new()
            }
        }
    }
}
