//! Article admission filter.
//!
//! An article is considered for ranking only if it is recent, illustrated,
//! substantive, research oriented, and published on a trusted domain.

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::models::Article;
use crate::sources::trusted_domain;

pub const MIN_DESCRIPTION_CHARS: usize = 100;
pub const MIN_TITLE_CHARS: usize = 30;

static RESEARCH_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)research|study|discovery|breakthrough|findings|analysis|investigation")
        .unwrap()
});

const PLACEHOLDER_MARKERS: &[&str] = &[
    "placeholder",
    "default",
    "no-image",
    "noimage",
    "no_image",
    "blank.",
    "spacer.",
    "fallback",
];

/// Why an article was turned away. Only used for trace logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Stale,
    MissingImage,
    ShortDescription,
    ShortTitle,
    NotResearch,
    UntrustedSource,
}

/// Whether `url` is an HTTPS image that is not a placeholder/default asset.
pub fn is_valid_image(url: &str) -> bool {
    let url = url.trim();
    if !url.starts_with("https://") || url.len() <= "https://".len() {
        return false;
    }
    let lowered = url.to_lowercase();
    !PLACEHOLDER_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

pub fn check(article: &Article, now: DateTime<Utc>) -> Result<(), Rejection> {
    let cutoff = now - Duration::hours(24);
    match article.published_at() {
        Some(published) if published >= cutoff => {}
        _ => return Err(Rejection::Stale),
    }

    if !article.url_to_image.as_deref().is_some_and(is_valid_image) {
        return Err(Rejection::MissingImage);
    }
    if article.description().chars().count() <= MIN_DESCRIPTION_CHARS {
        return Err(Rejection::ShortDescription);
    }
    if article.title().chars().count() <= MIN_TITLE_CHARS {
        return Err(Rejection::ShortTitle);
    }

    let text = format!("{} {}", article.title(), article.description());
    if !RESEARCH_KEYWORDS.is_match(&text) {
        return Err(Rejection::NotResearch);
    }
    if trusted_domain(&article.url).is_none() {
        return Err(Rejection::UntrustedSource);
    }
    Ok(())
}

pub fn admit(article: &Article, now: DateTime<Utc>) -> bool {
    match check(article, now) {
        Ok(()) => true,
        Err(reason) => {
            trace!(url = %article.url, ?reason, "Rejected article");
            false
        }
    }
}
