//! Data models for upstream search results and the items served to callers.
//!
//! - [`ApiResponse`], [`Article`], [`ArticleSource`]: the NewsAPI `/everything`
//!   wire format
//! - [`NewsItem`], [`RelatedImage`], [`NewsCategory`]: display-ready output
//! - [`NewsDigest`]: a category's items as written by the CLI
//!
//! Output types serialize with camelCase keys (`timeAgo`, `relatedImages`)
//! because that is what the consuming dashboards read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of an `/everything` response.
///
/// The upstream discriminates success from failure with a `status` field, so
/// both shapes deserialize into one enum.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiResponse {
    Ok {
        #[serde(rename = "totalResults", default)]
        total_results: u64,
        #[serde(default)]
        articles: Vec<Article>,
    },
    Error {
        #[serde(default)]
        code: String,
        #[serde(default)]
        message: String,
    },
}

/// Publisher reference attached to every upstream article.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArticleSource {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

/// A raw article as returned by the search endpoint.
///
/// Everything except `url` may be `null` upstream.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: ArticleSource,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

impl Article {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Topical label assigned to an item by keyword match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum NewsCategory {
    #[serde(rename = "AI Research")]
    Research,
    #[serde(rename = "Machine Learning")]
    MachineLearning,
    #[serde(rename = "Robotics")]
    Robotics,
    #[serde(rename = "Healthcare")]
    Health,
    #[serde(rename = "Policy & Ethics")]
    Policy,
    #[serde(rename = "Industry")]
    Industry,
    #[serde(rename = "Technology")]
    General,
}

impl NewsCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Research => "AI Research",
            Self::MachineLearning => "Machine Learning",
            Self::Robotics => "Robotics",
            Self::Health => "Healthcare",
            Self::Policy => "Policy & Ethics",
            Self::Industry => "Industry",
            Self::General => "Technology",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RelatedImage {
    pub url: String,
    pub caption: String,
}

/// A cleaned, ranked article ready for display.
///
/// `id` comes from digits in the URL and is not unique; results are keyed by
/// `url`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: u64,
    pub title: String,
    pub source: String,
    pub time_ago: String,
    pub category: NewsCategory,
    pub excerpt: String,
    pub image: Option<String>,
    pub related_images: Vec<RelatedImage>,
    /// Original `publishedAt` value.
    pub timestamp: String,
    pub url: String,
    pub author: Option<String>,
    pub content: Option<String>,
}

/// One category's results, as written by the CLI.
#[derive(Debug, Deserialize, Serialize)]
pub struct NewsDigest {
    pub category: String,
    pub generated_at: DateTime<Utc>,
    pub items: Vec<NewsItem>,
}
