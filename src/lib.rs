//! # Research News
//!
//! Fetches research-oriented news from a NewsAPI-compatible search endpoint,
//! keeps only recent articles from trusted publishers, ranks them by source
//! credibility and serves them from a short-lived per-category cache.
//!
//! ## Usage
//!
//! ```no_run
//! use research_news::{NewsApiClient, NewsConfig, NewsService};
//!
//! # async fn run() -> Result<(), research_news::NewsError> {
//! let config = NewsConfig {
//!     api_key: "YOUR_KEY".to_string(),
//!     ..NewsConfig::default()
//! };
//! let service = NewsService::new(NewsApiClient::new(&config)?, &config);
//! for item in service.fetch_news("ai").await? {
//!     println!("{} ({}, {})", item.title, item.source, item.time_ago);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`api`]: the [`NewsSearch`] seam and its HTTP implementation
//! - [`service`]: cache, daily quota, query fan-out and the ranking pipeline
//! - [`filters`], [`ranking`], [`transform`]: the per-article stages
//! - [`sources`], [`queries`]: static publisher tables and query templates
//! - [`cli`], [`config`], [`outputs`]: the command-line front end

pub mod api;
pub mod cache;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod outputs;
pub mod queries;
pub mod ranking;
pub mod rate_limit;
pub mod service;
pub mod sources;
pub mod transform;
pub mod utils;

pub use api::{NewsApiClient, NewsSearch};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::NewsConfig;
pub use error::NewsError;
pub use models::{NewsCategory, NewsDigest, NewsItem, RelatedImage};
pub use service::NewsService;
