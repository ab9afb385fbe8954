//! Upstream news search.
//!
//! [`NewsSearch`] is the seam between the aggregation service and whatever
//! answers search queries. [`NewsApiClient`] implements it against a
//! NewsAPI-compatible `/everything` endpoint:
//!
//! ```text
//! GET {base_url}/everything?q=..&language=en&sortBy=relevancy&pageSize=20&from=<RFC 3339>&apiKey=..
//! ```
//!
//! Requests carry the configured timeout. Nothing here retries; a
//! failed query is reported to the caller as a [`NewsError`].

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::StatusCode;
use std::fmt;
use std::time::Instant;
use tracing::{debug, error, instrument, warn};
use url::Url;

use crate::config::NewsConfig;
use crate::error::NewsError;
use crate::models::{ApiResponse, Article};
use crate::utils::truncate_for_log;

/// A source of raw articles for a search query.
pub trait NewsSearch {
    /// Run one query for articles published since `from`.
    async fn search(&self, query: &str, from: DateTime<Utc>) -> Result<Vec<Article>, NewsError>;
}

/// HTTP client for the NewsAPI `/everything` endpoint.
#[derive(Clone)]
pub struct NewsApiClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
    page_size: u32,
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl NewsApiClient {
    /// Build a client from configuration.
    ///
    /// A missing API key is logged, not rejected; requests will then fail
    /// upstream with an authentication error.
    ///
    /// # Errors
    ///
    /// [`NewsError::Config`] if the base URL does not parse, or
    /// [`NewsError::Request`] if the HTTP client cannot be built.
    pub fn new(config: &NewsConfig) -> Result<Self, NewsError> {
        if config.api_key.trim().is_empty() {
            error!("News API key is not configured; upstream requests will be rejected");
        }

        let base = config.base_url.trim_end_matches('/');
        let endpoint = Url::parse(&format!("{base}/everything")).map_err(|e| {
            NewsError::config(format!("invalid base URL '{}': {e}", config.base_url))
        })?;

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key.clone(),
            page_size: config.page_size,
        })
    }

    /// Full request URL for `query`, including the API key.
    pub fn search_url(&self, query: &str, from: DateTime<Utc>) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("language", "en")
            .append_pair("sortBy", "relevancy")
            .append_pair("pageSize", &self.page_size.to_string())
            .append_pair("from", &from.to_rfc3339_opts(SecondsFormat::Secs, true))
            .append_pair("apiKey", &self.api_key);
        url
    }
}

/// Turn an HTTP status and body into articles or a query-scoped error.
pub fn parse_search_response(status: StatusCode, body: &str) -> Result<Vec<Article>, NewsError> {
    if !status.is_success() {
        return Err(match serde_json::from_str::<ApiResponse>(body) {
            Ok(ApiResponse::Error { code, message }) => NewsError::upstream(status, code, message),
            _ => NewsError::upstream(status, "", truncate_for_log(body, 200)),
        });
    }

    match serde_json::from_str::<ApiResponse>(body)? {
        ApiResponse::Ok {
            total_results,
            articles,
        } => {
            debug!(total_results, returned = articles.len(), "Parsed search response");
            Ok(articles)
        }
        ApiResponse::Error { code, message } => Err(NewsError::upstream(status, code, message)),
    }
}

impl NewsSearch for NewsApiClient {
    #[instrument(level = "info", skip_all, fields(%query))]
    async fn search(&self, query: &str, from: DateTime<Utc>) -> Result<Vec<Article>, NewsError> {
        let t0 = Instant::now();
        let url = self.search_url(query, from);

        let res = self.http.get(url).send().await.inspect_err(|e| {
            warn!(
                elapsed_ms = t0.elapsed().as_millis() as u64,
                timeout = e.is_timeout(),
                error = %e,
                "Search request failed"
            );
        })?;
        let status = res.status();
        let body = res.text().await?;

        let parsed = parse_search_response(status, &body);
        let elapsed_ms = t0.elapsed().as_millis() as u64;
        match &parsed {
            Ok(articles) => debug!(elapsed_ms, count = articles.len(), "Search succeeded"),
            Err(e) => warn!(elapsed_ms, %status, error = %e, "Search returned an error"),
        }
        parsed
    }
}
