//! External data providers consumed by the orchestrators.
//!
//! Only the interfaces live here; the HTTP implementations ship with the
//! `leaflens` binary so tests can swap in doubles for every provider.

pub mod botanical;
pub mod extract;
pub mod generative;

pub use async_trait::async_trait;

use std::future::Future;
use std::time::Duration;

use crate::error::{LeafError, LeafResult};
use crate::models::{PlantIdentification, PlantImage};

pub use botanical::{BotanicalRecord, BotanicalSummary};

/// Photo search by free text
#[async_trait]
pub trait ImageSearchProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(&self, query: &str) -> LeafResult<Vec<PlantImage>>;
}

/// Species guesses for a photo, most confident first
#[async_trait]
pub trait IdentificationProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn identify(&self, image_base64: &str) -> LeafResult<Vec<PlantIdentification>>;
}

/// Structured taxonomy and growth data
#[async_trait]
pub trait BotanicalProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Ranked candidates for a name
    async fn search(&self, query: &str) -> LeafResult<Vec<BotanicalSummary>>;

    /// Full record for a candidate id
    async fn details(&self, id: &str) -> LeafResult<BotanicalRecord>;

    /// First search hit wins
    async fn best_match(&self, scientific_name: &str) -> LeafResult<Option<BotanicalSummary>> {
        Ok(self.search(scientific_name).await?.into_iter().next())
    }
}

/// Free-form text generation
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &str) -> LeafResult<String>;
}

/// Race `call` against a timer.
///
/// On timeout the future is dropped and the caller moves on; whether the
/// underlying request stops is up to the transport.
pub async fn with_timeout<T, F>(provider: &'static str, after: Duration, call: F) -> LeafResult<T>
where
    F: Future<Output = LeafResult<T>>,
{
    match tokio::time::timeout(after, call).await {
        Ok(result) => result,
        Err(_) => Err(LeafError::Timeout { provider, after }),
    }
}
