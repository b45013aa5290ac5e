//! HTTP implementations of the core provider traits

pub mod gemini;
pub mod pexels;
pub mod plant_id;
pub mod trefle;

use anyhow::Result;
use leaflens_core::{Config, Providers};
use std::sync::Arc;

pub use gemini::GeminiProvider;
pub use pexels::PexelsProvider;
pub use plant_id::PlantIdProvider;
pub use trefle::TrefleProvider;

/// Build every provider from its configured endpoint and timeout
pub fn from_config(config: &Config) -> Result<Providers> {
    Ok(Providers {
        images: Arc::new(PexelsProvider::new(&config.images, config.image_timeout)?),
        identification: Arc::new(PlantIdProvider::new(
            &config.identification,
            config.identification_timeout,
        )?),
        botanical: Arc::new(TrefleProvider::new(&config.botanical, config.botanical_timeout)?),
        generative: Arc::new(GeminiProvider::new(&config.generative, config.generative_timeout)?),
    })
}
