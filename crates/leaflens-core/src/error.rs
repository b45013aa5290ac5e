//! Error types shared by the stores, providers and orchestrators

use std::time::Duration;
use thiserror::Error;

use crate::providers::extract::ParseError;

/// Core error type
#[derive(Error, Debug)]
pub enum LeafError {
    #[error("{provider} request failed: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} timed out after {}ms", .after.as_millis())]
    Timeout {
        provider: &'static str,
        after: Duration,
    },

    #[error("{provider} returned an unexpected payload: {reason}")]
    MalformedResponse {
        provider: &'static str,
        reason: String,
    },

    #[error("could not read generative response: {0}")]
    Parse(#[from] ParseError),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl LeafError {
    pub fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
        }
    }

    pub fn malformed(provider: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider,
            reason: reason.into(),
        }
    }

    /// True for failures caused by the bounded wait rather than the provider itself
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

pub type LeafResult<T> = Result<T, LeafError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = LeafError::Timeout {
            provider: "trefle",
            after: Duration::from_secs(5),
        };
        assert_eq!(err.to_string(), "trefle timed out after 5000ms");
        assert!(err.is_timeout());
    }

    #[test]
    fn test_parse_error_converts() {
        let err: LeafError = ParseError::NoObject.into();
        assert!(matches!(err, LeafError::Parse(ParseError::NoObject)));
        assert!(!err.is_timeout());
    }
}
