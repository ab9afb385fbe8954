//! Static publisher tables: trusted domains, credibility scores and display
//! names.
//!
//! Domains match an article URL's host exactly or as a parent domain, so
//! `news.mit.edu` matches `mit.edu` but `notmit.edu` does not.

use url::Url;

/// Domains an article must come from to be admitted.
pub const TRUSTED_DOMAINS: &[&str] = &[
    "nature.com",
    "science.org",
    "arxiv.org",
    "mit.edu",
    "stanford.edu",
    "berkeley.edu",
    "openai.com",
    "deepmind.google",
    "research.google",
    "ai.meta.com",
    "microsoft.com",
    "anthropic.com",
    "ieee.org",
    "acm.org",
    "reuters.com",
    "bloomberg.com",
];

/// Ranking weight per domain. Unlisted domains score 0.
pub const SOURCE_SCORES: &[(&str, u8)] = &[
    ("nature.com", 10),
    ("science.org", 10),
    ("arxiv.org", 9),
    ("mit.edu", 9),
    ("stanford.edu", 9),
    ("berkeley.edu", 9),
    ("openai.com", 8),
    ("deepmind.google", 8),
    ("research.google", 8),
    ("ai.meta.com", 8),
    ("microsoft.com", 8),
    ("anthropic.com", 8),
    ("ieee.org", 7),
    ("acm.org", 7),
    ("reuters.com", 6),
    ("bloomberg.com", 6),
];

const DOMAIN_NAMES: &[(&str, &str)] = &[
    ("nature.com", "Nature"),
    ("science.org", "Science"),
    ("arxiv.org", "arXiv"),
    ("mit.edu", "MIT News"),
    ("stanford.edu", "Stanford University"),
    ("berkeley.edu", "UC Berkeley"),
    ("openai.com", "OpenAI"),
    ("deepmind.google", "Google DeepMind"),
    ("research.google", "Google Research"),
    ("ai.meta.com", "Meta AI"),
    ("microsoft.com", "Microsoft Research"),
    ("anthropic.com", "Anthropic"),
    ("ieee.org", "IEEE Spectrum"),
    ("acm.org", "ACM"),
    ("reuters.com", "Reuters"),
    ("bloomberg.com", "Bloomberg"),
];

/// Upstream publisher names that come back in inconsistent spellings.
const PUBLISHER_NAMES: &[(&str, &str)] = &[
    ("nature.com", "Nature"),
    ("nature", "Nature"),
    ("science", "Science"),
    ("sciencemag.org", "Science"),
    ("arxiv.org", "arXiv"),
    ("arxiv", "arXiv"),
    ("mit news", "MIT News"),
    ("news.mit.edu", "MIT News"),
    ("mit technology review", "MIT Technology Review"),
    ("technologyreview.com", "MIT Technology Review"),
    ("ieee spectrum", "IEEE Spectrum"),
    ("spectrum.ieee.org", "IEEE Spectrum"),
    ("reuters", "Reuters"),
    ("bloomberg", "Bloomberg"),
    ("techcrunch", "TechCrunch"),
    ("wired", "Wired"),
    ("the verge", "The Verge"),
];

pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .map(|h| h.trim_start_matches("www.").to_ascii_lowercase())
}

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// The trusted domain an article URL belongs to, if any.
///
/// Matching is by URL host (exact or subdomain), not by substring of the URL.
pub fn trusted_domain(url: &str) -> Option<&'static str> {
    let host = host_of(url)?;
    TRUSTED_DOMAINS
        .iter()
        .copied()
        .find(|domain| host_matches(&host, domain))
}

pub fn source_score(url: &str) -> u8 {
    let Some(host) = host_of(url) else {
        return 0;
    };
    SOURCE_SCORES
        .iter()
        .find(|(domain, _)| host_matches(&host, domain))
        .map(|(_, score)| *score)
        .unwrap_or(0)
}

/// Human-readable publisher name.
///
/// Prefers the name of the article's domain, then a canonical spelling of the
/// upstream-supplied name, then the upstream name as given, then the host.
///
/// Articles admitted by the news pipeline always resolve through the domain
/// table; the later fallbacks serve library callers naming arbitrary URLs.
pub fn display_name(upstream_name: &str, url: &str) -> String {
    let host = host_of(url);
    if let Some(host) = &host {
        if let Some((_, name)) = DOMAIN_NAMES
            .iter()
            .find(|(domain, _)| host_matches(host, domain))
        {
            return (*name).to_string();
        }
    }

    let trimmed = upstream_name.trim();
    let lowered = trimmed.to_lowercase();
    if let Some((_, name)) = PUBLISHER_NAMES.iter().find(|(raw, _)| *raw == lowered) {
        return (*name).to_string();
    }
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    host.unwrap_or_else(|| "Unknown".to_string())
}
