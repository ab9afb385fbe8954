//! De-duplication and credibility ranking of admitted articles.

use std::collections::HashMap;

use crate::models::Article;
use crate::sources::source_score;

/// Collapse articles sharing a URL into one entry.
///
/// A later duplicate replaces the earlier article's contents but keeps the
/// position where that URL was first seen.
pub fn dedupe_by_url(articles: impl IntoIterator<Item = Article>) -> Vec<Article> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<Article> = Vec::new();

    for article in articles {
        match positions.get(&article.url) {
            Some(&idx) => unique[idx] = article,
            None => {
                positions.insert(article.url.clone(), unique.len());
                unique.push(article);
            }
        }
    }
    unique
}

/// Order by source score, highest first. Equal scores keep their order.
pub fn rank_by_source(mut articles: Vec<Article>) -> Vec<Article> {
    articles.sort_by_cached_key(|a| std::cmp::Reverse(source_score(&a.url)));
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleSource;

    fn article(url: &str, title: &str) -> Article {
        Article {
            source: ArticleSource::default(),
            author: None,
            title: Some(title.to_string()),
            description: None,
            url: url.to_string(),
            url_to_image: None,
            published_at: None,
            content: None,
        }
    }

    #[test]
    fn test_dedupe_last_seen_wins_first_position_kept() {
        let deduped = dedupe_by_url(vec![
            article("https://a.org/1", "first a"),
            article("https://b.org/2", "b"),
            article("https://a.org/1", "second a"),
        ]);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].url, "https://a.org/1");
        assert_eq!(deduped[0].title(), "second a");
        assert_eq!(deduped[1].url, "https://b.org/2");
    }

    #[test]
    fn test_rank_higher_score_first() {
        let ranked = rank_by_source(vec![
            article("https://www.reuters.com/tech/1", "reuters"),
            article("https://www.nature.com/articles/2", "nature"),
        ]);
        assert_eq!(ranked[0].title(), "nature");
        assert_eq!(ranked[1].title(), "reuters");
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let ranked = rank_by_source(vec![
            article("https://arxiv.org/abs/1", "arxiv"),
            article("https://news.mit.edu/2", "mit"),
            article("https://unknown.example/3", "unknown"),
            article("https://cs.stanford.edu/4", "stanford"),
        ]);
        let titles: Vec<&str> = ranked.iter().map(|a| a.title()).collect();
        assert_eq!(titles, vec!["arxiv", "mit", "stanford", "unknown"]);
    }
}
