//! The news aggregation service.
//!
//! # Pipeline
//!
//! 1. **Cache**: a fresh entry for `news_{category}` is returned as-is
//! 2. **Quota**: one request is taken from the daily counter, or the call fails
//! 3. **Fan-out**: the category's queries run concurrently; a failing query
//!    contributes nothing
//! 4. **Admission**: recency, image, length, keyword and trusted-domain checks
//! 5. **Dedup + rank**: one entry per URL, stable sort by source score
//! 6. **Transform**: the top `max_results` become [`NewsItem`]s and are cached
//!
//! Cache and counter belong to the service instance. Build one per process and
//! share it (for example behind an `Arc`); separate processes do not share
//! state.

use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use tracing::{debug, error, info, instrument, warn};

use crate::api::NewsSearch;
use crate::cache::{NewsCache, cache_key};
use crate::clock::{Clock, SystemClock};
use crate::config::NewsConfig;
use crate::error::NewsError;
use crate::filters::admit;
use crate::models::{Article, NewsItem};
use crate::queries::{DEFAULT_CATEGORY, queries_for};
use crate::rate_limit::DailyRateLimiter;
use crate::ranking::{dedupe_by_url, rank_by_source};
use crate::transform::to_news_item;

pub struct NewsService<S, C = SystemClock> {
    search: S,
    clock: C,
    cache: NewsCache,
    limiter: DailyRateLimiter,
    max_results: usize,
}

impl<S: NewsSearch> NewsService<S, SystemClock> {
    pub fn new(search: S, config: &NewsConfig) -> Self {
        Self::with_clock(search, config, SystemClock)
    }
}

impl<S: NewsSearch, C: Clock> NewsService<S, C> {
    pub fn with_clock(search: S, config: &NewsConfig, clock: C) -> Self {
        let now = clock.now();
        Self {
            search,
            cache: NewsCache::new(config.cache_duration()),
            limiter: DailyRateLimiter::new(config.daily_request_limit, now),
            max_results: config.max_results,
            clock,
        }
    }

    /// Fetch news for the default `"ai"` category.
    pub async fn fetch_default_news(&self) -> Result<Vec<NewsItem>, NewsError> {
        self.fetch_news(DEFAULT_CATEGORY).await
    }

    /// Ranked, de-duplicated, filtered news for `category`.
    ///
    /// Returns an empty list when nothing qualifies.
    ///
    /// # Errors
    ///
    /// - [`NewsError::RateLimitExceeded`] on a cache miss once the daily
    ///   quota is used up. No request is sent.
    /// - Any error that is not scoped to a single query.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_news(&self, category: &str) -> Result<Vec<NewsItem>, NewsError> {
        let key = cache_key(category);
        let now = self.clock.now();

        if let Some(items) = self.cache.get_fresh(&key, now) {
            debug!(count = items.len(), "Serving news from cache");
            return Ok(items);
        }

        let remaining = self.limiter.try_acquire(now).inspect_err(|e| {
            warn!(error = %e, "Refusing upstream fetch");
        })?;
        info!(remaining, "Cache miss; fetching from upstream");

        match self.fetch_fresh(category, now).await {
            Ok(items) => {
                info!(count = items.len(), "Fetched news");
                self.cache.insert(key, items.clone(), self.clock.now());
                debug!(cached_categories = self.cache.len(), "Stored fetch result");
                Ok(items)
            }
            Err(e) => {
                error!(error = %e, "News fetch failed");
                Err(e)
            }
        }
    }

    async fn fetch_fresh(
        &self,
        category: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<NewsItem>, NewsError> {
        let from = now - Duration::hours(24);
        let queries = queries_for(category);

        let results = join_all(queries.iter().map(|query| self.run_query(query, from))).await;
        let mut raw = Vec::new();
        for result in results {
            raw.extend(result?);
        }
        let fetched = raw.len();

        let admitted: Vec<Article> = raw.into_iter().filter(|a| admit(a, now)).collect();
        let admitted_count = admitted.len();
        let ranked = rank_by_source(dedupe_by_url(admitted));
        debug!(
            queries = queries.len(),
            fetched,
            admitted = admitted_count,
            unique = ranked.len(),
            "Aggregated query results"
        );

        Ok(ranked
            .into_iter()
            .take(self.max_results)
            .map(|article| to_news_item(article, now))
            .collect())
    }

    /// One query's articles. Query-scoped failures yield an empty list.
    async fn run_query(&self, query: &str, from: DateTime<Utc>) -> Result<Vec<Article>, NewsError> {
        match self.search.search(query, from).await {
            Ok(articles) => Ok(articles),
            Err(e) if e.is_query_scoped() => {
                warn!(%query, error = %e, "Skipping failed query");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch cycles used in the current 24h window.
    pub fn requests_used(&self) -> u32 {
        self.limiter.request_count()
    }

    pub fn daily_limit(&self) -> u32 {
        self.limiter.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::models::ArticleSource;
    use chrono::TimeZone;
    use parking_lot::Mutex;
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use std::sync::Arc;

    enum Canned {
        Articles(Vec<Article>),
        Status(u16),
        Misconfigured,
    }

    /// In-memory search that records every query it receives.
    #[derive(Clone, Default)]
    struct FakeSearch {
        responses: Arc<Mutex<HashMap<String, Canned>>>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl FakeSearch {
        fn respond(&self, query: &str, canned: Canned) {
            self.responses.lock().insert(query.to_string(), canned);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    impl NewsSearch for FakeSearch {
        async fn search(&self, query: &str, _from: DateTime<Utc>) -> Result<Vec<Article>, NewsError> {
            self.calls.lock().push(query.to_string());
            match self.responses.lock().get(query) {
                Some(Canned::Articles(articles)) => Ok(articles.clone()),
                Some(Canned::Status(code)) => Err(NewsError::upstream(
                    StatusCode::from_u16(*code).unwrap(),
                    "rateLimited",
                    "Too many requests",
                )),
                Some(Canned::Misconfigured) => Err(NewsError::config("broken")),
                None => Ok(Vec::new()),
            }
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 6, 12, 0, 0).unwrap()
    }

    fn article(url: &str) -> Article {
        Article {
            source: ArticleSource {
                id: None,
                name: "Publisher".to_string(),
            },
            author: None,
            title: Some(format!("Researchers publish a new study on models {url}")),
            description: Some(
                "The research team analysed thousands of training runs and reports findings \
                 that could change how large models are evaluated in practice."
                    .to_string(),
            ),
            url: url.to_string(),
            url_to_image: Some("https://images.example.org/figure.jpg".to_string()),
            published_at: Some("2025-05-06T10:00:00Z".to_string()),
            content: None,
        }
    }

    fn service(search: FakeSearch, limit: u32) -> (NewsService<FakeSearch, ManualClock>, ManualClock) {
        let clock = ManualClock::new(t0());
        let config = NewsConfig {
            daily_request_limit: limit,
            ..NewsConfig::default()
        };
        (NewsService::with_clock(search, &config, clock.clone()), clock)
    }

    fn ai_queries() -> &'static [&'static str] {
        queries_for("ai")
    }

    #[tokio::test]
    async fn test_cache_serves_second_call() {
        let search = FakeSearch::default();
        search.respond(
            queries_for("tech")[0],
            Canned::Articles(vec![article("https://www.nature.com/articles/1")]),
        );
        let (service, clock) = service(search.clone(), 100);

        let first = service.fetch_news("tech").await.unwrap();
        clock.advance(Duration::minutes(14));
        let second = service.fetch_news("tech").await.unwrap();

        assert_eq!(search.calls().len(), 1);
        assert_eq!(first, second);
        assert_eq!(service.requests_used(), 1);
        assert_eq!(service.cache.len(), 1);

        clock.advance(Duration::minutes(2));
        service.fetch_news("tech").await.unwrap();
        assert_eq!(search.calls().len(), 2);
        assert_eq!(service.requests_used(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_urls_collapse() {
        let search = FakeSearch::default();
        let shared = "https://arxiv.org/abs/2505.00001";
        search.respond(ai_queries()[0], Canned::Articles(vec![article(shared)]));
        search.respond(
            ai_queries()[1],
            Canned::Articles(vec![article(shared), article("https://arxiv.org/abs/2505.00002")]),
        );
        let (service, _) = service(search, 100);

        let items = service.fetch_default_news().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items.iter().filter(|i| i.url == shared).count(), 1);
    }

    #[tokio::test]
    async fn test_inadmissible_articles_never_returned() {
        let mut stale = article("https://www.nature.com/articles/stale");
        stale.published_at = Some("2025-05-05T11:00:00Z".to_string());
        let mut no_image = article("https://www.nature.com/articles/noimg");
        no_image.url_to_image = None;
        let mut placeholder = article("https://www.nature.com/articles/placeholder-img");
        placeholder.url_to_image = Some("https://cdn.nature.com/placeholder.png".to_string());
        let mut short = article("https://www.nature.com/articles/short");
        short.description = Some("A short research note.".to_string());
        let untrusted = article("https://techcrunch.com/2025/05/06/study");
        let good = article("https://www.reuters.com/technology/good");

        let search = FakeSearch::default();
        search.respond(
            queries_for("other")[0],
            Canned::Articles(vec![stale, no_image, placeholder, short, untrusted, good]),
        );
        let (service, _) = service(search, 100);

        let items = service.fetch_news("other").await.unwrap();
        let urls: Vec<&str> = items.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["https://www.reuters.com/technology/good"]);
    }

    #[tokio::test]
    async fn test_higher_scored_source_ranks_first() {
        let search = FakeSearch::default();
        search.respond(
            queries_for("tech")[0],
            Canned::Articles(vec![
                article("https://www.reuters.com/technology/a"),
                article("https://www.nature.com/articles/b"),
            ]),
        );
        let (service, _) = service(search, 100);

        let items = service.fetch_news("tech").await.unwrap();
        assert_eq!(items[0].source, "Nature");
        assert_eq!(items[1].source, "Reuters");
    }

    #[tokio::test]
    async fn test_ai_fan_out_truncates_to_ten_by_score() {
        let domains = [
            ("https://www.reuters.com/tech", 6u8),
            ("https://spectrum.ieee.org/ai", 7),
            ("https://openai.com/index", 8),
            ("https://arxiv.org/abs", 9),
            ("https://www.nature.com/articles", 10),
        ];
        let search = FakeSearch::default();
        for (q, query) in ai_queries().iter().enumerate() {
            let articles = domains
                .iter()
                .map(|(base, _)| article(&format!("{base}/q{q}")))
                .collect();
            search.respond(query, Canned::Articles(articles));
        }
        let (service, _) = service(search.clone(), 100);

        let items = service.fetch_news("ai").await.unwrap();
        assert_eq!(search.calls().len(), 3);
        assert_eq!(items.len(), 10);

        let scores: Vec<u8> = items
            .iter()
            .map(|i| crate::sources::source_score(&i.url))
            .collect();
        assert_eq!(scores, vec![10, 10, 10, 9, 9, 9, 8, 8, 8, 7]);
        assert!(items[0].url.ends_with("/q0"));
        assert!(items[2].url.ends_with("/q2"));
    }

    #[tokio::test]
    async fn test_unknown_category_uses_single_generic_query() {
        let search = FakeSearch::default();
        let (service, _) = service(search.clone(), 100);

        let items = service.fetch_news("unknown-category").await.unwrap();
        assert!(items.is_empty());
        assert_eq!(search.calls(), vec![queries_for("unknown-category")[0].to_string()]);
    }

    #[tokio::test]
    async fn test_one_failed_query_is_tolerated() {
        let search = FakeSearch::default();
        search.respond(
            ai_queries()[0],
            Canned::Articles(vec![article("https://www.nature.com/articles/1")]),
        );
        search.respond(ai_queries()[1], Canned::Status(429));
        search.respond(
            ai_queries()[2],
            Canned::Articles(vec![article("https://arxiv.org/abs/2")]),
        );
        let (service, _) = service(search.clone(), 100);

        let items = service.fetch_news("ai").await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(search.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_rate_limit_blocks_before_network_and_resets() {
        let search = FakeSearch::default();
        let (service, clock) = service(search.clone(), 2);

        service.fetch_news("a").await.unwrap();
        service.fetch_news("b").await.unwrap();
        let err = service.fetch_news("c").await.unwrap_err();
        assert!(matches!(err, NewsError::RateLimitExceeded { count: 2, limit: 2 }));
        assert_eq!(search.calls().len(), 2);

        // Cached categories are still served while the quota is exhausted.
        assert!(service.fetch_news("a").await.is_ok());
        assert_eq!(search.calls().len(), 2);

        clock.advance(Duration::hours(24));
        assert!(service.fetch_news("c").await.is_ok());
        assert_eq!(search.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_unscoped_error_propagates_and_is_not_cached() {
        let search = FakeSearch::default();
        search.respond(queries_for("tech")[0], Canned::Misconfigured);
        let (service, _) = service(search.clone(), 100);

        assert!(matches!(
            service.fetch_news("tech").await,
            Err(NewsError::Config(_))
        ));
        assert!(service.fetch_news("tech").await.is_err());
        assert_eq!(search.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_result_is_cached() {
        let search = FakeSearch::default();
        let (service, _) = service(search.clone(), 100);

        assert!(service.fetch_news("tech").await.unwrap().is_empty());
        assert!(service.fetch_news("tech").await.unwrap().is_empty());
        assert_eq!(search.calls().len(), 1);
    }
}
