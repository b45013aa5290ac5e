//! LeafLens core - plant detail aggregation and caching
//!
//! This library resolves plant names and photos into merged care records.
//! It can:
//! - Aggregate botanical records and a generative care narrative into one `PlantDetails`
//! - Cache merged records per scientific name for 24 hours
//! - Keep a short, deduplicated search history
//! - Identify plants from photos and enrich the top guess
//! - Load featured plants and discovery facts
//!
//! Providers are traits; every store sits on a `KeyValueStore`. Nothing here
//! is a process-wide singleton.
//!
//! # Examples
//!
//! ```rust,ignore
//! use leaflens_core::{Config, FileStore, LeafLens, Providers};
//!
//! let config = Config::from_env()?.validate()?;
//! let store = Arc::new(FileStore::new(&config.data_dir));
//! let app = LeafLens::new(config, store, providers);
//! let details = app.aggregator.details("Monstera deliciosa").await;
//! ```

pub mod aggregator;
pub mod cache;
pub mod config;
pub mod discovery;
pub mod error;
pub mod featured;
pub mod history;
pub mod identify;
pub mod models;
pub mod providers;
pub mod search;
pub mod services;
pub mod storage;

#[cfg(test)]
mod testing;

// Re-export common types
pub use aggregator::DetailAggregator;
pub use cache::{CacheEntry, CacheStats, PlantCache};
pub use config::Config;
pub use error::{LeafError, LeafResult};
pub use history::SearchHistory;
pub use identify::IdentificationOrchestrator;
pub use models::{PlantDetails, PlantIdentification, PlantImage, SearchHistoryItem, Taxonomy};
pub use search::SearchOrchestrator;
pub use services::{LeafLens, Providers};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

/// Current time in epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
