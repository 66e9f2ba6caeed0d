//! Built-in search engine table for organic attribution.
//!
//! Maps an apex domain to the query parameter that carries the search
//! keyword and the display name written as the record's source. All Google
//! country domains share the single `google` entry. Custom engines from
//! configuration can be layered on top when a registry is built; a registry
//! never changes afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Registry key shared by every Google domain.
pub const GOOGLE: &str = "google";

/// One search engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEngineEntry {
    /// Apex domain, or [`GOOGLE`].
    pub domain: String,
    /// Query parameter holding the keyword.
    pub param: String,
    /// Source name for organic records.
    pub name: String,
}

impl SearchEngineEntry {
    pub fn new(
        domain: impl Into<String>,
        param: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            param: param.into(),
            name: name.into(),
        }
    }
}

// (domain, keyword param, display name)
const BUILTIN_ENGINES: &[(&str, &str, &str)] = &[
    ("daum.net", "q", "daum"),
    ("eniro.se", "search_word", "eniro"),
    ("naver.com", "query", "naver"),
    ("yahoo.com", "p", "yahoo"),
    ("msn.com", "q", "msn"),
    ("bing.com", "q", "live"),
    ("aol.com", "q", "aol"),
    ("lycos.com", "q", "lycos"),
    ("ask.com", "q", "ask"),
    ("altavista.com", "q", "altavista"),
    ("search.netscape.com", "query", "netscape"),
    ("cnn.com", "query", "cnn"),
    ("about.com", "terms", "about"),
    ("mamma.com", "query", "mama"),
    ("alltheweb.com", "q", "alltheweb"),
    ("voila.fr", "rdata", "voila"),
    ("search.virgilio.it", "qs", "virgilio"),
    ("baidu.com", "wd", "baidu"),
    ("alice.com", "qs", "alice"),
    ("yandex.com", "text", "yandex"),
    ("najdi.org.mk", "q", "najdi"),
    ("seznam.cz", "q", "seznam"),
    ("search.com", "q", "search"),
    ("wp.pl", "szukaj", "wirtulana polska"),
    ("online.onetcenter.org", "qt", "o*net"),
    ("szukacz.pl", "q", "szukacz"),
    ("yam.com", "k", "yam"),
    ("pchome.com", "q", "pchome"),
    ("kvasir.no", "q", "kvasir"),
    ("sesam.no", "q", "sesam"),
    ("ozu.es", "q", "ozu"),
    ("terra.com", "query", "terra"),
    ("mynet.com", "q", "mynet"),
    ("ekolay.net", "q", "ekolay"),
    ("rambler.ru", "words", "rambler"),
    (GOOGLE, "q", "google"),
];

static BUILTIN: LazyLock<SearchEngineRegistry> =
    LazyLock::new(SearchEngineRegistry::with_defaults);

/// Immutable apex-domain → search engine lookup.
#[derive(Debug, Clone, Default)]
pub struct SearchEngineRegistry {
    engines: HashMap<String, SearchEngineEntry>,
}

impl SearchEngineRegistry {
    /// The process-wide built-in registry, initialized on first use.
    pub fn builtin() -> &'static SearchEngineRegistry {
        &BUILTIN
    }

    /// A fresh registry holding the built-in engines.
    pub fn with_defaults() -> Self {
        BUILTIN_ENGINES
            .iter()
            .fold(Self::empty(), |registry, (domain, param, name)| {
                registry.with_engine(SearchEngineEntry::new(*domain, *param, *name))
            })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Add or replace an engine while building the registry.
    pub fn with_engine(mut self, entry: SearchEngineEntry) -> Self {
        self.engines.insert(entry.domain.clone(), entry);
        self
    }

    pub fn get(&self, domain: &str) -> Option<&SearchEngineEntry> {
        self.engines.get(domain)
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.engines.contains_key(domain)
    }

    /// All engines, sorted by domain.
    pub fn entries(&self) -> Vec<&SearchEngineEntry> {
        let mut entries: Vec<&SearchEngineEntry> = self.engines.values().collect();
        entries.sort_by(|a, b| a.domain.cmp(&b.domain));
        entries
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}
