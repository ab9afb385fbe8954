//! Search query templates per category.

const AI_QUERIES: &[&str] = &[
    r#"("artificial intelligence" OR "machine learning") AND (research OR study OR paper OR university)"#,
    r#"("artificial intelligence" OR AI) AND (breakthrough OR discovery OR findings)"#,
    r#"("AI research" OR "AI lab") AND (industry OR company OR commercial OR startup)"#,
];

const DEFAULT_QUERIES: &[&str] = &[r#""artificial intelligence research""#];

pub const DEFAULT_CATEGORY: &str = "ai";

/// The queries issued for `category`. Only `"ai"` fans out; `"tech"`,
/// `"adora"` and unknown categories share the generic research query.
pub fn queries_for(category: &str) -> &'static [&'static str] {
    match category {
        "ai" => AI_QUERIES,
        _ => DEFAULT_QUERIES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_fans_out_to_three_distinct_queries() {
        let queries = queries_for("ai");
        assert_eq!(queries.len(), 3);
        assert_ne!(queries[0], queries[1]);
        assert_ne!(queries[1], queries[2]);
    }

    #[test]
    fn test_tech_and_adora_share_generic_query() {
        assert_eq!(queries_for("tech"), DEFAULT_QUERIES);
        assert_eq!(queries_for("adora"), queries_for("tech"));
        assert_eq!(queries_for("tech"), queries_for("unknown-category"));
    }

    #[test]
    fn test_unknown_category_uses_generic_query() {
        assert_eq!(queries_for("unknown-category"), DEFAULT_QUERIES);
        assert_eq!(queries_for(""), DEFAULT_QUERIES);
        assert_eq!(queries_for("AI"), DEFAULT_QUERIES);
    }
}
