//! Scripted providers for aggregation tests

#![allow(dead_code)]

use leaflens_core::providers::botanical::{BotanicalRecord, BotanicalSummary};
use leaflens_core::providers::{async_trait, BotanicalProvider, GenerativeProvider};
use leaflens_core::{Config, DetailAggregator, KeyValueStore, LeafError, LeafResult, PlantCache};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub struct ScriptedBotanical {
    pub record: Option<BotanicalRecord>,
    pub delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedBotanical {
    pub fn returning(record: serde_json::Value) -> Self {
        Self {
            record: Some(serde_json::from_value(record).expect("valid botanical record")),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn not_found() -> Self {
        Self {
            record: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn hanging() -> Self {
        Self {
            delay: Duration::from_secs(60),
            ..Self::not_found()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BotanicalProvider for ScriptedBotanical {
    fn name(&self) -> &'static str {
        "scripted-botanical"
    }

    async fn search(&self, query: &str) -> LeafResult<Vec<BotanicalSummary>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self
            .record
            .iter()
            .map(|_| BotanicalSummary {
                id: "42".to_string(),
                scientific_name: query.to_string(),
                common_name: None,
                family: None,
                family_common_name: None,
                genus: None,
                image_url: None,
            })
            .collect())
    }

    async fn details(&self, _id: &str) -> LeafResult<BotanicalRecord> {
        self.record
            .clone()
            .ok_or_else(|| LeafError::provider("scripted-botanical", "no record"))
    }
}

pub struct ScriptedGenerative {
    pub reply: Option<String>,
    pub delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedGenerative {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn hanging() -> Self {
        Self {
            delay: Duration::from_secs(60),
            ..Self::replying("{}")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeProvider for ScriptedGenerative {
    fn name(&self) -> &'static str {
        "scripted-generative"
    }

    async fn generate(&self, _prompt: &str) -> LeafResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply
            .clone()
            .ok_or_else(|| LeafError::provider("scripted-generative", "503"))
    }
}

pub fn aggregator(
    store: Arc<dyn KeyValueStore>,
    botanical: Arc<ScriptedBotanical>,
    generative: Arc<ScriptedGenerative>,
) -> DetailAggregator {
    let config = Config::with_defaults();
    let cache = PlantCache::new(store, config.cache_ttl);
    DetailAggregator::new(&config, cache, botanical, generative)
}
