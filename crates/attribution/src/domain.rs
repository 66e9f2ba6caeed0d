//! Apex domain derivation.
//!
//! The apex is the last two labels of a hostname, or the last three when
//! both trailing labels are short (`bbc.co.uk`). It is a heuristic, not a
//! public-suffix lookup: a three-letter label ahead of a TLD also yields
//! three labels (`www.abc.com` → `www.abc.com`).

use regex_lite::Regex;
use std::sync::LazyLock;
use url::Url;

static APEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^.]*\.[^.]{2,3}(?:\.[^.]{2,3})?$").expect("Invalid apex domain regex")
});

/// Apex domain of a hostname, or `None` if it has no recognizable apex.
pub fn apex_domain(hostname: &str) -> Option<String> {
    if hostname.is_empty() {
        return None;
    }
    APEX.find(hostname).map(|m| m.as_str().to_string())
}

/// Hostname of an absolute URL, or `None` if it does not parse or has no host.
pub fn host_of(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    url.host_str()
        .filter(|host| !host.is_empty())
        .map(String::from)
}

/// Apex domain of an absolute URL.
pub fn apex_of_url(url: &str) -> Option<String> {
    host_of(url).and_then(|host| apex_domain(&host))
}
