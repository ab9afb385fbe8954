//! Conversion of admitted upstream articles into display-ready [`NewsItem`]s.
//!
//! | Field | Rule |
//! |-------|------|
//! | `title` | publisher suffix and breaking-news prefix removed, ≤ 100 chars |
//! | `excerpt` | HTML and `[...]` removed, first two sentences, ≤ 150 chars |
//! | `image` | HTTPS, non-placeholder |
//! | `related_images` | main image then content images, ≤ 3 |
//! | `id` | trailing digits of the URL's last path segment, else 0 |
//! | `time_ago` | coarse relative age |
//! | `category` | first matching keyword group |

use chrono::{DateTime, Utc};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use url::Url;

use crate::filters::is_valid_image;
use crate::models::{Article, NewsCategory, NewsItem, RelatedImage};
use crate::sources::display_name;
use crate::utils::{collapse_whitespace, truncate_with_ellipsis};

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_EXCERPT_CHARS: usize = 150;
pub const MAX_RELATED_IMAGES: usize = 3;

static BREAKING_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(breaking(\s+news)?|just\s+in|update|exclusive|developing)\s*[:|\-–—]\s*")
        .unwrap()
});

static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

static SENTENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)(.*?[.!?]+)(?:\s+|$)").unwrap());

static TRAILING_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)$").unwrap());

static CONTENT_IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)https://[^\s"'<>()\[\]]+?\.(?:jpe?g|png|webp|gif)(?:\?[^\s"'<>()\[\]]*)?"#)
        .unwrap()
});

static CATEGORY_RULES: Lazy<Vec<(NewsCategory, Regex)>> = Lazy::new(|| {
    [
        (
            NewsCategory::Health,
            r"(?i)\b(health|medical|medicine|clinical|patient|disease|cancer|drug)",
        ),
        (
            NewsCategory::Robotics,
            r"(?i)\b(robot|autonomous|drone|humanoid)",
        ),
        (
            NewsCategory::Policy,
            r"(?i)\b(policy|regulat|ethic|legislat|govern|law\b|lawmakers)",
        ),
        (
            NewsCategory::MachineLearning,
            r"(?i)\b(machine learning|neural network|deep learning|language model|llm|transformer)",
        ),
        (
            NewsCategory::Industry,
            r"(?i)\b(startup|funding|company|companies|market|invest|commercial|enterprise)",
        ),
        (
            NewsCategory::Research,
            r"(?i)\b(research|study|studies|paper|scientist|university|discover|breakthrough)",
        ),
    ]
    .into_iter()
    .map(|(category, pattern)| (category, Regex::new(pattern).unwrap()))
    .collect()
});

/// Strip the publisher suffix and breaking-news prefix, then truncate.
pub fn clean_title(title: &str, source_names: &[&str]) -> String {
    let mut title = collapse_whitespace(title);

    for name in source_names.iter().filter(|n| !n.trim().is_empty()) {
        for sep in [" - ", " | ", " – ", " — "] {
            let suffix = format!("{sep}{}", name.trim());
            if title.len() > suffix.len() && title.ends_with(&suffix) {
                title.truncate(title.len() - suffix.len());
            }
        }
    }

    let title = BREAKING_PREFIX.replace(&title, "");
    truncate_with_ellipsis(title.trim(), MAX_TITLE_CHARS)
}

/// Visible text of an HTML fragment. Plain text passes through unchanged.
pub fn strip_html(s: &str) -> String {
    if !s.contains('<') {
        return s.to_string();
    }
    let fragment = Html::parse_fragment(s);
    fragment.root_element().text().collect::<Vec<_>>().join(" ")
}

/// Up to `n` leading sentences. Text without a sentence terminator is
/// returned whole.
pub fn first_sentences(text: &str, n: usize) -> String {
    let sentences: Vec<&str> = SENTENCE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .take(n)
        .collect();

    if sentences.is_empty() {
        text.trim().to_string()
    } else {
        sentences.join(" ")
    }
}

pub fn clean_excerpt(description: &str, content: Option<&str>) -> String {
    let raw = if description.trim().is_empty() {
        content.unwrap_or_default()
    } else {
        description
    };
    let text = strip_html(raw);
    let text = BRACKETED.replace_all(&text, " ");
    let text = collapse_whitespace(&text);
    truncate_with_ellipsis(&first_sentences(&text, 2), MAX_EXCERPT_CHARS)
}

/// Numeric id from the trailing digits of the URL's last path segment.
pub fn id_from_url(url: &str) -> u64 {
    let path = Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| url.to_string());
    let last = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    TRAILING_DIGITS
        .captures(last)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

pub fn time_ago(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    fn plural(n: i64, unit: &str) -> String {
        if n == 1 {
            format!("1 {unit} ago")
        } else {
            format!("{n} {unit}s ago")
        }
    }

    let elapsed = now - published;
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if elapsed.num_hours() < 24 {
        plural(elapsed.num_hours(), "hour")
    } else {
        plural(elapsed.num_days(), "day")
    }
}

pub fn categorize(title: &str, description: &str) -> NewsCategory {
    let text = format!("{title} {description}");
    CATEGORY_RULES
        .iter()
        .find(|(_, re)| re.is_match(&text))
        .map(|(category, _)| *category)
        .unwrap_or(NewsCategory::General)
}

/// The main image followed by distinct image URLs found in `content`.
pub fn related_images(
    image: Option<&str>,
    content: Option<&str>,
    title: &str,
    source: &str,
) -> Vec<RelatedImage> {
    let mut images: Vec<RelatedImage> = image
        .map(|url| RelatedImage {
            url: url.to_string(),
            caption: title.to_string(),
        })
        .into_iter()
        .collect();

    let found = CONTENT_IMAGE
        .find_iter(content.unwrap_or_default())
        .map(|m| m.as_str())
        .filter(|url| is_valid_image(url) && Some(*url) != image)
        .unique()
        .take(MAX_RELATED_IMAGES.saturating_sub(images.len()));

    for url in found {
        images.push(RelatedImage {
            url: url.to_string(),
            caption: format!("Related image {} from {source}", images.len() + 1),
        });
    }
    images
}

pub fn to_news_item(article: Article, now: DateTime<Utc>) -> NewsItem {
    let source = display_name(&article.source.name, &article.url);
    let title = clean_title(
        article.title(),
        &[article.source.name.as_str(), source.as_str()],
    );
    let excerpt = clean_excerpt(article.description(), article.content.as_deref());
    let category = categorize(article.title(), article.description());
    let time_ago = article
        .published_at()
        .map(|published| time_ago(published, now))
        .unwrap_or_default();

    let image = article
        .url_to_image
        .as_deref()
        .map(str::trim)
        .filter(|url| is_valid_image(url))
        .map(str::to_string);
    let related_images = related_images(
        image.as_deref(),
        article.content.as_deref(),
        &title,
        &source,
    );

    NewsItem {
        id: id_from_url(&article.url),
        title,
        source,
        time_ago,
        category,
        excerpt,
        image,
        related_images,
        timestamp: article.published_at.unwrap_or_default(),
        url: article.url,
        author: article.author,
        content: article.content,
    }
}
