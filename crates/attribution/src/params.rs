//! Campaign parameter extraction from the page's query string and fragment.
//!
//! Recognizes the tagged-link parameters `utm_source`, `utm_medium`,
//! `utm_campaign`, `utm_term`, `utm_content`, `gclid` and `dclid`. The whole
//! input is scanned in order and every occurrence is applied, so when a key
//! appears twice (e.g. once in the query and once in the fragment) the later
//! occurrence overwrites the earlier one. Values are kept exactly as they
//! appear in the URL; no percent-decoding happens here.

use crate::scan::PairScanner;
use std::collections::BTreeMap;
use std::fmt;
use utmzz_core::Field;

/// A recognized tagged-link parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CampaignParam {
    UtmSource,
    UtmMedium,
    UtmCampaign,
    UtmTerm,
    UtmContent,
    Gclid,
    Dclid,
}

impl CampaignParam {
    pub const ALL: [CampaignParam; 7] = [
        CampaignParam::UtmSource,
        CampaignParam::UtmMedium,
        CampaignParam::UtmCampaign,
        CampaignParam::UtmTerm,
        CampaignParam::UtmContent,
        CampaignParam::Gclid,
        CampaignParam::Dclid,
    ];

    const KEYS: [&'static str; 7] = [
        "utm_source",
        "utm_medium",
        "utm_campaign",
        "utm_term",
        "utm_content",
        "gclid",
        "dclid",
    ];

    /// The query-string key, lowercase.
    pub fn key(self) -> &'static str {
        Self::KEYS[self as usize]
    }

    /// The record field this parameter populates.
    pub fn field(self) -> Field {
        match self {
            CampaignParam::UtmSource => Field::Source,
            CampaignParam::UtmMedium => Field::Medium,
            CampaignParam::UtmCampaign => Field::Campaign,
            CampaignParam::UtmTerm => Field::Term,
            CampaignParam::UtmContent => Field::Content,
            CampaignParam::Gclid => Field::Gclid,
            CampaignParam::Dclid => Field::Dclid,
        }
    }
}

impl fmt::Display for CampaignParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Recognized parameters found on the page, last occurrence per key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignParams {
    values: BTreeMap<CampaignParam, String>,
}

impl CampaignParams {
    pub fn get(&self, param: CampaignParam) -> Option<&str> {
        self.values.get(&param).map(String::as_str)
    }

    /// Set a parameter, overwriting any earlier value.
    pub fn insert(&mut self, param: CampaignParam, value: impl Into<String>) {
        self.values.insert(param, value.into());
    }

    /// Whether the params identify a tagged link: a non-empty `utm_source`,
    /// `gclid` or `dclid`.
    pub fn is_tagged(&self) -> bool {
        [
            CampaignParam::UtmSource,
            CampaignParam::Gclid,
            CampaignParam::Dclid,
        ]
        .into_iter()
        .any(|p| self.non_empty(p).is_some())
    }

    /// Whether a click id (`gclid` / `dclid`) with a value is present.
    pub fn has_click_id(&self) -> bool {
        self.non_empty(CampaignParam::Gclid).is_some()
            || self.non_empty(CampaignParam::Dclid).is_some()
    }

    /// Value of `param` unless it is missing or empty.
    pub fn non_empty(&self, param: CampaignParam) -> Option<&str> {
        self.get(param).filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (CampaignParam, &str)> {
        self.values.iter().map(|(p, v)| (*p, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Extract recognized parameters from a combined `query#fragment` string.
///
/// Returns `None` when no recognized key occurs at all.
pub fn extract(combined: &str) -> Option<CampaignParams> {
    let mut params = CampaignParams::default();
    for (idx, value) in PairScanner::new(combined, &CampaignParam::KEYS) {
        params.insert(CampaignParam::ALL[idx], value);
    }
    (!params.is_empty()).then_some(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_line_up_with_variants() {
        for (param, key) in CampaignParam::ALL.into_iter().zip(CampaignParam::KEYS) {
            assert_eq!(param.key(), key);
        }
    }

    #[test]
    fn extracts_query_and_fragment() {
        let params =
            extract("utm_source=newsletter&utm_medium=email&x=1#utm_campaign=spring").unwrap();
        assert_eq!(params.get(CampaignParam::UtmSource), Some("newsletter"));
        assert_eq!(params.get(CampaignParam::UtmMedium), Some("email"));
        assert_eq!(params.get(CampaignParam::UtmCampaign), Some("spring"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn last_occurrence_wins() {
        let params = extract("utm_source=query#utm_source=fragment").unwrap();
        assert_eq!(params.get(CampaignParam::UtmSource), Some("fragment"));
    }

    #[test]
    fn keys_are_case_insensitive() {
        let params = extract("UTM_Source=Mixed&GCLID=abc").unwrap();
        assert_eq!(params.get(CampaignParam::UtmSource), Some("Mixed"));
        assert_eq!(params.get(CampaignParam::Gclid), Some("abc"));
    }

    #[test]
    fn values_are_not_decoded() {
        let params = extract("utm_campaign=spring%20sale").unwrap();
        assert_eq!(params.get(CampaignParam::UtmCampaign), Some("spring%20sale"));
    }

    #[test]
    fn absent_when_nothing_recognized() {
        assert!(extract("").is_none());
        assert!(extract("#").is_none());
        assert!(extract("page=2&sort=asc#top").is_none());
    }

    #[test]
    fn empty_source_is_not_tagged() {
        let params = extract("utm_source=&utm_medium=email").unwrap();
        assert!(!params.is_tagged());
        assert_eq!(params.get(CampaignParam::UtmSource), Some(""));
    }

    #[test]
    fn click_ids_tag_the_link() {
        assert!(extract("dclid=xyz").unwrap().is_tagged());
        assert!(extract("gclid=abc").unwrap().has_click_id());
        assert!(!extract("gclid=").unwrap().has_click_id());
    }
}
