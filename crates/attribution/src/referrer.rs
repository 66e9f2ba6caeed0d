//! Referrer classification: organic search, cross-site referral, or nothing.

use crate::registry::{GOOGLE, SearchEngineRegistry};
use crate::scan::PairScanner;
use serde::Serialize;
use std::fmt;
use tracing::debug;
use url::Url;
use utmzz_core::record::NOT_PROVIDED;

/// Medium assigned from the referrer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferrerMedium {
    Organic,
    Referral,
}

impl ReferrerMedium {
    pub fn as_str(self) -> &'static str {
        match self {
            ReferrerMedium::Organic => "organic",
            ReferrerMedium::Referral => "referral",
        }
    }
}

impl fmt::Display for ReferrerMedium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribution derived from the referring URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferrerInfo {
    /// Engine display name, or the referring hostname.
    pub source: String,
    pub medium: ReferrerMedium,
    /// Search keyword for organic visits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
}

impl ReferrerInfo {
    fn organic(source: &str, term: &str) -> Self {
        Self {
            source: source.to_string(),
            medium: ReferrerMedium::Organic,
            term: Some(term.to_string()),
        }
    }

    fn referral(host: &str) -> Self {
        Self {
            source: host.to_string(),
            medium: ReferrerMedium::Referral,
            term: None,
        }
    }
}

/// Classify a referrer against the current page.
///
/// Any hostname containing `google` is looked up as the shared Google entry.
/// Returns `None` when there is no usable referrer, or when an unregistered
/// referrer shares the current apex domain. A missing apex on either side
/// never counts as the same site.
pub fn classify(
    registry: &SearchEngineRegistry,
    referrer: Option<&str>,
    referrer_apex: Option<&str>,
    current_apex: Option<&str>,
) -> Option<ReferrerInfo> {
    let referrer = referrer.filter(|r| !r.is_empty())?;
    let url = match Url::parse(referrer) {
        Ok(url) => url,
        Err(e) => {
            debug!(referrer, error = %e, "Ignoring unparseable referrer");
            return None;
        }
    };
    let host = url.host_str().filter(|h| !h.is_empty())?;

    let apex = if host.contains(GOOGLE) {
        Some(GOOGLE)
    } else {
        referrer_apex
    };

    if let Some(engine) = apex.and_then(|a| registry.get(a)) {
        let keys = [engine.param.as_str()];
        let term = url
            .query()
            .and_then(|query| PairScanner::new(query, &keys).next())
            .map(|(_, value)| value)
            .filter(|value| !value.is_empty())
            .unwrap_or(NOT_PROVIDED);
        debug!(engine = %engine.name, term, "Organic referrer");
        return Some(ReferrerInfo::organic(&engine.name, term));
    }

    match (apex, current_apex) {
        (Some(a), Some(c)) if a == c => {
            debug!(host, "Same-site referrer carries no attribution");
            None
        }
        _ => Some(ReferrerInfo::referral(host)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::apex_of_url;

    fn run(referrer: &str, current_apex: &str) -> Option<ReferrerInfo> {
        let apex = apex_of_url(referrer);
        classify(
            SearchEngineRegistry::builtin(),
            Some(referrer),
            apex.as_deref(),
            Some(current_apex),
        )
    }

    #[test]
    fn google_country_domains_are_organic() {
        for referrer in [
            "https://www.google.com/search?q=rust+cookies",
            "https://www.google.co.uk/search?q=rust+cookies",
            "https://google.de/url?sa=t&q=rust+cookies",
        ] {
            let info = run(referrer, "example.com").unwrap();
            assert_eq!(info.source, "google");
            assert_eq!(info.medium, ReferrerMedium::Organic);
            assert_eq!(info.term.as_deref(), Some("rust+cookies"));
        }
    }

    #[test]
    fn missing_keyword_is_not_provided() {
        let info = run("https://www.google.com/", "example.com").unwrap();
        assert_eq!(info.term.as_deref(), Some("(not provided)"));

        let info = run("https://www.bing.com/search?q=&form=QBLH", "example.com").unwrap();
        assert_eq!(info.source, "live");
        assert_eq!(info.term.as_deref(), Some("(not provided)"));
    }

    #[test]
    fn engine_specific_keyword_param() {
        let info = run("https://www.baidu.com/s?ie=utf-8&wd=rust", "example.com").unwrap();
        assert_eq!(info.source, "baidu");
        assert_eq!(info.term.as_deref(), Some("rust"));

        let info = run("https://search.yahoo.com/search?p=tokio", "example.com").unwrap();
        assert_eq!(info.source, "yahoo");
        assert_eq!(info.term.as_deref(), Some("tokio"));
    }

    #[test]
    fn keyword_in_fragment_is_ignored() {
        let info = run("https://www.bing.com/search#q=hidden", "example.com").unwrap();
        assert_eq!(info.term.as_deref(), Some("(not provided)"));
    }

    #[test]
    fn foreign_site_is_referral_with_full_host() {
        let info = run("https://blog.partner.io/post/1", "example.com").unwrap();
        assert_eq!(info.source, "blog.partner.io");
        assert_eq!(info.medium, ReferrerMedium::Referral);
        assert!(info.term.is_none());
    }

    #[test]
    fn same_site_is_skipped() {
        assert!(run("https://shop.example.com/cart", "example.com").is_none());
    }

    #[test]
    fn google_owned_site_never_counts_as_same_site() {
        let info = run("https://www.google.com/maps", "google.com").unwrap();
        assert_eq!(info.medium, ReferrerMedium::Organic);
    }

    #[test]
    fn absent_or_malformed_referrer() {
        let registry = SearchEngineRegistry::builtin();
        assert!(classify(registry, None, None, Some("example.com")).is_none());
        assert!(classify(registry, Some(""), None, Some("example.com")).is_none());
        assert!(classify(registry, Some("::not a url::"), None, Some("example.com")).is_none());
    }

    #[test]
    fn underivable_apex_counts_as_different_site() {
        let info = run("http://localhost:8080/admin", "example.com").unwrap();
        assert_eq!(info.source, "localhost");
        assert_eq!(info.medium, ReferrerMedium::Referral);
    }

    #[test]
    fn custom_registry_engine() {
        let registry = SearchEngineRegistry::empty().with_engine(
            crate::registry::SearchEngineEntry::new("duckduckgo.com", "q", "duckduckgo"),
        );
        let info = classify(
            &registry,
            Some("https://duckduckgo.com/?q=serde"),
            Some("duckduckgo.com"),
            Some("example.com"),
        )
        .unwrap();
        assert_eq!(info.source, "duckduckgo");
        assert_eq!(info.term.as_deref(), Some("serde"));
    }
}
