//! Configuration for the LeafLens services
//! Loads from environment variables with validation and defaults

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Environment Variable Helpers
// ============================================================================

fn get_env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn get_env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TREFLE_URL: &str = "https://trefle.io/api/v1";
pub const DEFAULT_GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";
pub const DEFAULT_PLANT_ID_URL: &str = "https://api.plant.id/v2/identify";
pub const DEFAULT_PEXELS_URL: &str = "https://api.pexels.com/v1";

/// 24 hours
pub const DEFAULT_CACHE_TTL_MS: u64 = 24 * 60 * 60 * 1000;
pub const DEFAULT_HISTORY_LIMIT: usize = 10;
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Credentials and endpoint for one external provider
#[derive(Debug, Clone, Default)]
pub struct ProviderEndpoint {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl ProviderEndpoint {
    fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Providers
    pub botanical: ProviderEndpoint,
    pub generative: ProviderEndpoint,
    pub identification: ProviderEndpoint,
    pub images: ProviderEndpoint,

    // Bounded waits
    pub botanical_timeout: Duration,
    pub generative_timeout: Duration,
    pub identification_timeout: Duration,
    pub image_timeout: Duration,

    // Stores
    pub data_dir: PathBuf,
    pub cache_ttl: Duration,
    pub history_limit: usize,

    // Search
    pub search_limit: usize,
}

impl Config {
    /// Load configuration from `LEAFLENS_*` environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::with_defaults();

        let data_dir = match get_env_opt("LEAFLENS_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir().context("Could not resolve a data directory")?,
        };

        Ok(Self {
            botanical: ProviderEndpoint {
                base_url: get_env_string("LEAFLENS_TREFLE_URL", DEFAULT_TREFLE_URL),
                api_key: get_env_opt("LEAFLENS_TREFLE_KEY"),
            },
            generative: ProviderEndpoint {
                base_url: get_env_string("LEAFLENS_GEMINI_URL", DEFAULT_GEMINI_URL),
                api_key: get_env_opt("LEAFLENS_GEMINI_KEY"),
            },
            identification: ProviderEndpoint {
                base_url: get_env_string("LEAFLENS_PLANT_ID_URL", DEFAULT_PLANT_ID_URL),
                api_key: get_env_opt("LEAFLENS_PLANT_ID_KEY"),
            },
            images: ProviderEndpoint {
                base_url: get_env_string("LEAFLENS_PEXELS_URL", DEFAULT_PEXELS_URL),
                api_key: get_env_opt("LEAFLENS_PEXELS_KEY"),
            },
            botanical_timeout: Duration::from_millis(get_env_u64(
                "LEAFLENS_BOTANICAL_TIMEOUT_MS",
                defaults.botanical_timeout.as_millis() as u64,
            )),
            generative_timeout: Duration::from_millis(get_env_u64(
                "LEAFLENS_GENERATIVE_TIMEOUT_MS",
                defaults.generative_timeout.as_millis() as u64,
            )),
            identification_timeout: Duration::from_millis(get_env_u64(
                "LEAFLENS_IDENTIFY_TIMEOUT_MS",
                defaults.identification_timeout.as_millis() as u64,
            )),
            image_timeout: Duration::from_millis(get_env_u64(
                "LEAFLENS_IMAGE_TIMEOUT_MS",
                defaults.image_timeout.as_millis() as u64,
            )),
            data_dir,
            cache_ttl: Duration::from_millis(get_env_u64(
                "LEAFLENS_CACHE_TTL_MS",
                DEFAULT_CACHE_TTL_MS,
            )),
            history_limit: get_env_usize("LEAFLENS_HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT),
            search_limit: get_env_usize("LEAFLENS_SEARCH_LIMIT", DEFAULT_SEARCH_LIMIT),
        })
    }

    /// Create config with default values (no API keys)
    pub fn with_defaults() -> Self {
        Self {
            botanical: ProviderEndpoint::new(DEFAULT_TREFLE_URL),
            generative: ProviderEndpoint::new(DEFAULT_GEMINI_URL),
            identification: ProviderEndpoint::new(DEFAULT_PLANT_ID_URL),
            images: ProviderEndpoint::new(DEFAULT_PEXELS_URL),
            botanical_timeout: Duration::from_secs(5),
            generative_timeout: Duration::from_secs(5),
            identification_timeout: Duration::from_secs(15),
            image_timeout: Duration::from_secs(10),
            data_dir: PathBuf::from(".leaflens"),
            cache_ttl: Duration::from_millis(DEFAULT_CACHE_TTL_MS),
            history_limit: DEFAULT_HISTORY_LIMIT,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Validate configuration values
    pub fn validate(self) -> Result<Self> {
        for (name, timeout) in [
            ("botanical_timeout", self.botanical_timeout),
            ("generative_timeout", self.generative_timeout),
            ("identification_timeout", self.identification_timeout),
            ("image_timeout", self.image_timeout),
        ] {
            if timeout.is_zero() {
                anyhow::bail!("{} must be greater than zero", name);
            }
        }

        if self.cache_ttl.is_zero() {
            anyhow::bail!("cache_ttl must be greater than zero");
        }

        if self.history_limit == 0 {
            anyhow::bail!("history_limit must be at least 1");
        }

        if self.search_limit == 0 {
            anyhow::bail!("search_limit must be at least 1");
        }

        if self.data_dir.as_os_str().is_empty() {
            anyhow::bail!("data_dir must not be empty");
        }

        Ok(self)
    }

    /// Names of providers that have no API key configured
    pub fn missing_keys(&self) -> Vec<&'static str> {
        [
            ("trefle", &self.botanical),
            ("gemini", &self.generative),
            ("plant.id", &self.identification),
            ("pexels", &self.images),
        ]
        .into_iter()
        .filter(|(_, endpoint)| endpoint.api_key.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// `~/.leaflens`
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".leaflens"))
}
