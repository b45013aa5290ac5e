//! Wires stores, providers and orchestrators from one `Config`

use std::sync::Arc;

use crate::aggregator::DetailAggregator;
use crate::cache::PlantCache;
use crate::config::Config;
use crate::history::SearchHistory;
use crate::identify::IdentificationOrchestrator;
use crate::providers::{BotanicalProvider, GenerativeProvider, IdentificationProvider, ImageSearchProvider};
use crate::search::SearchOrchestrator;
use crate::storage::KeyValueStore;

/// The four external collaborators
#[derive(Clone)]
pub struct Providers {
    pub images: Arc<dyn ImageSearchProvider>,
    pub identification: Arc<dyn IdentificationProvider>,
    pub botanical: Arc<dyn BotanicalProvider>,
    pub generative: Arc<dyn GenerativeProvider>,
}

/// Everything a front end needs, sharing one storage backend
pub struct LeafLens {
    pub config: Config,
    pub providers: Providers,
    pub cache: PlantCache,
    pub history: SearchHistory,
    pub aggregator: Arc<DetailAggregator>,
    pub search: SearchOrchestrator,
    pub identification: IdentificationOrchestrator,
}

impl LeafLens {
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>, providers: Providers) -> Self {
        let cache = PlantCache::new(store.clone(), config.cache_ttl);
        let history = SearchHistory::new(store, config.history_limit);

        let aggregator = Arc::new(DetailAggregator::new(
            &config,
            cache.clone(),
            providers.botanical.clone(),
            providers.generative.clone(),
        ));

        let search = SearchOrchestrator::new(
            &config,
            history.clone(),
            aggregator.clone(),
            providers.botanical.clone(),
            providers.images.clone(),
        );

        let identification = IdentificationOrchestrator::new(
            &config,
            providers.identification.clone(),
            aggregator.clone(),
        );

        Self {
            config,
            providers,
            cache,
            history,
            aggregator,
            search,
            identification,
        }
    }
}
