//! Service configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! command-line flags or their environment variables (see [`crate::cli`]).
//!
//! ```yaml
//! api_key: "..."
//! base_url: https://newsapi.org/v2
//! cache_duration_secs: 900
//! daily_request_limit: 100
//! request_timeout_secs: 10
//! max_results: 10
//! page_size: 20
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration as StdDuration;

use crate::error::NewsError;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NewsConfig {
    pub api_key: String,
    pub base_url: String,
    /// How long a category's results are served from cache.
    pub cache_duration_secs: u64,
    /// Fetch cycles allowed per 24h window.
    pub daily_request_limit: u32,
    /// Per upstream request. 0 disables the timeout.
    pub request_timeout_secs: u64,
    pub max_results: usize,
    /// Raw articles requested per query.
    pub page_size: u32,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_duration_secs: 15 * 60,
            daily_request_limit: 100,
            request_timeout_secs: 10,
            max_results: 10,
            page_size: 20,
        }
    }
}

impl fmt::Debug for NewsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("NewsConfig")
            .field("api_key", &api_key)
            .field("base_url", &self.base_url)
            .field("cache_duration_secs", &self.cache_duration_secs)
            .field("daily_request_limit", &self.daily_request_limit)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_results", &self.max_results)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl NewsConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, NewsError> {
        serde_yaml::from_str(yaml).map_err(|e| NewsError::config(format!("invalid config: {e}")))
    }

    /// Load a YAML config file. Missing keys keep their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, NewsError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            NewsError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn cache_duration(&self) -> chrono::Duration {
        i64::try_from(self.cache_duration_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }

    pub fn request_timeout(&self) -> Option<StdDuration> {
        (self.request_timeout_secs > 0).then(|| StdDuration::from_secs(self.request_timeout_secs))
    }
}
