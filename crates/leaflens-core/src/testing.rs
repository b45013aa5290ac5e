//! Provider doubles for unit tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{LeafError, LeafResult};
use crate::models::{PlantIdentification, PlantImage, Taxonomy};
use crate::providers::botanical::{BotanicalRecord, BotanicalSummary, NameRef};
use crate::providers::{BotanicalProvider, GenerativeProvider, IdentificationProvider, ImageSearchProvider};

pub struct StubBotanical {
    hits: Vec<BotanicalSummary>,
    record: BotanicalRecord,
    fail: bool,
    calls: AtomicUsize,
    last_query: Mutex<Option<String>>,
}

impl StubBotanical {
    pub fn empty() -> Self {
        Self {
            hits: vec![],
            record: BotanicalRecord::default(),
            fail: false,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    pub fn with_hits(names: &[&str]) -> Self {
        Self {
            hits: names.iter().map(|name| summary(name)).collect(),
            ..Self::empty()
        }
    }

    pub fn with_family(name: &str, family: &str) -> Self {
        Self {
            hits: vec![summary(name)],
            record: BotanicalRecord {
                scientific_name: Some(name.to_string()),
                family: Some(NameRef::Name(family.to_string())),
                ..Default::default()
            },
            ..Self::empty()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

fn summary(name: &str) -> BotanicalSummary {
    BotanicalSummary {
        id: name.to_lowercase().replace(' ', "-"),
        scientific_name: name.to_string(),
        common_name: None,
        family: None,
        family_common_name: None,
        genus: None,
        image_url: Some(format!("https://img.test/{}.jpg", name)),
    }
}

#[async_trait]
impl BotanicalProvider for StubBotanical {
    fn name(&self) -> &'static str {
        "stub-botanical"
    }

    async fn search(&self, query: &str) -> LeafResult<Vec<BotanicalSummary>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.to_string());
        if self.fail {
            return Err(LeafError::provider("stub-botanical", "unreachable"));
        }
        Ok(self.hits.clone())
    }

    async fn details(&self, _id: &str) -> LeafResult<BotanicalRecord> {
        Ok(self.record.clone())
    }
}

pub struct StubGenerative {
    reply: Option<String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubGenerative {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeProvider for StubGenerative {
    fn name(&self) -> &'static str {
        "stub-generative"
    }

    async fn generate(&self, prompt: &str) -> LeafResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| LeafError::provider("stub-generative", "unreachable"))
    }
}

pub struct StubImages {
    fail: bool,
    delay: Duration,
    calls: AtomicUsize,
}

impl StubImages {
    pub fn new() -> Self {
        Self {
            fail: false,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageSearchProvider for StubImages {
    fn name(&self) -> &'static str {
        "stub-images"
    }

    async fn search(&self, query: &str) -> LeafResult<Vec<PlantImage>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(LeafError::provider("stub-images", "unreachable"));
        }
        Ok((1..=2)
            .map(|n| PlantImage {
                id: format!("{}-{}", query, n),
                url: format!("https://photos.test/{}/{}.jpg", query, n),
                photographer: "Tester".to_string(),
                alt_text: format!("{} plant", query),
            })
            .collect())
    }
}

pub struct StubIdentifier {
    suggestions: Vec<PlantIdentification>,
    fail: bool,
    last_image: Mutex<Option<String>>,
}

impl StubIdentifier {
    pub fn suggesting(suggestions: Vec<PlantIdentification>) -> Self {
        Self {
            suggestions,
            fail: false,
            last_image: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::suggesting(vec![])
        }
    }

    pub fn last_image(&self) -> Option<String> {
        self.last_image.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentificationProvider for StubIdentifier {
    fn name(&self) -> &'static str {
        "stub-identifier"
    }

    async fn identify(&self, image_base64: &str) -> LeafResult<Vec<PlantIdentification>> {
        *self.last_image.lock().unwrap() = Some(image_base64.to_string());
        if self.fail {
            return Err(LeafError::provider("stub-identifier", "unreachable"));
        }
        Ok(self.suggestions.clone())
    }
}

pub fn identification(name: &str, common: &str, family: &str, confidence: f64) -> PlantIdentification {
    PlantIdentification {
        id: format!("id-{}", name),
        name: name.to_string(),
        common_names: vec![common.to_string()],
        confidence,
        taxonomy: Taxonomy {
            family: Some(family.to_string()),
            genus: name.split_whitespace().next().map(str::to_string),
            ..Default::default()
        },
        description: String::new(),
        image_url: None,
    }
}
