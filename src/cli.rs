//! Command-line interface definitions.
//!
//! Service settings can come from flags, environment variables, or a YAML
//! file passed with `--config`. Flags and environment variables win over the
//! file; the file wins over built-in defaults.

use clap::Parser;

use crate::config::NewsConfig;
use crate::error::NewsError;

/// Command-line arguments for the research news fetcher.
///
/// # Examples
///
/// ```sh
/// # Print today's AI research digest
/// research_news --api-key YOUR_KEY
///
/// # Several categories, written as JSON files
/// research_news -c ai -c tech -j ./json
///
/// # Keep running and refresh every 5 minutes (served from cache until it expires)
/// research_news -c ai --interval-secs 300
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Categories to fetch (ai, tech, adora, or anything else for the generic query)
    #[arg(short = 'c', long = "category", default_value = "ai")]
    pub categories: Vec<String>,

    /// Output directory for JSON digests; prints to stdout when omitted
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Optional path to a YAML config file
    #[arg(long)]
    pub config: Option<String>,

    /// NewsAPI key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the NewsAPI-compatible service
    #[arg(long, env = "NEWS_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Seconds a category's results stay cached
    #[arg(long, env = "NEWS_CACHE_DURATION_SECS")]
    pub cache_duration_secs: Option<u64>,

    /// Upstream fetch cycles allowed per 24 hours
    #[arg(long, env = "NEWS_DAILY_REQUEST_LIMIT")]
    pub daily_request_limit: Option<u32>,

    /// Per-request timeout in seconds (0 disables it)
    #[arg(long, env = "NEWS_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    /// Re-fetch every N seconds until interrupted
    #[arg(long)]
    pub interval_secs: Option<u64>,
}

impl Cli {
    /// Resolve the effective configuration.
    pub fn load_config(&self) -> Result<NewsConfig, NewsError> {
        let mut config = match &self.config {
            Some(path) => NewsConfig::from_yaml_file(path)?,
            None => NewsConfig::default(),
        };

        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(secs) = self.cache_duration_secs {
            config.cache_duration_secs = secs;
        }
        if let Some(limit) = self.daily_request_limit {
            config.daily_request_limit = limit;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout_secs = secs;
        }
        Ok(config)
    }
}
