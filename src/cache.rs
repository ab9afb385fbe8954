//! Time-bounded per-category result cache.
//!
//! Entries are keyed by `"news_" + category` and overwritten on every
//! successful fetch. Stale entries are ignored, never evicted; the key space
//! is the small set of categories callers ask for.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

use crate::models::NewsItem;

pub fn cache_key(category: &str) -> String {
    format!("news_{category}")
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: Vec<NewsItem>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug)]
pub struct NewsCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl NewsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached items for `key` if they are no older than the TTL.
    pub fn get_fresh(&self, key: &str, now: DateTime<Utc>) -> Option<Vec<NewsItem>> {
        let entries = self.entries.lock();
        let entry = entries.get(key)?;
        let age = now - entry.timestamp;
        if age > self.ttl {
            debug!(key, age_secs = age.num_seconds(), "Cache entry is stale");
            return None;
        }
        Some(entry.data.clone())
    }

    pub fn insert(&self, key: String, data: Vec<NewsItem>, now: DateTime<Utc>) {
        self.entries.lock().insert(
            key,
            CacheEntry {
                data,
                timestamp: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
