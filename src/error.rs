//! Error types for the news service and its upstream client.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("Daily request limit reached ({count}/{limit}); try again after the 24h window resets")]
    RateLimitExceeded { count: u32, limit: u32 },

    #[error("Upstream returned {status}: {code}: {message}")]
    Upstream {
        status: StatusCode,
        code: String,
        message: String,
    },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NewsError {
    pub fn upstream(
        status: StatusCode,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Upstream {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }

    /// Whether this error only affects a single upstream query.
    ///
    /// Query-scoped failures are dropped from the aggregate result instead of
    /// failing the whole fetch.
    pub fn is_query_scoped(&self) -> bool {
        matches!(
            self,
            Self::Upstream { .. } | Self::Request(_) | Self::Json(_)
        )
    }
}
