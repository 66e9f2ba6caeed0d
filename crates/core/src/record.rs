//! Attribution record — the source/medium/campaign tuple persisted per visitor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source used when nothing else is known about the visit.
pub const DIRECT_SOURCE: &str = "(direct)";
/// Medium used when nothing else is known about the visit.
pub const NO_MEDIUM: &str = "(none)";
/// Campaign placeholder for visits outside any campaign.
pub const NOT_SET: &str = "(not set)";
/// Term for search engines that hide the keyword.
pub const NOT_PROVIDED: &str = "(not provided)";

/// Segment separator of the persisted format. Values never contain it.
pub const SEGMENT_SEPARATOR: char = '|';
const ESCAPED_SEPARATOR: &str = "%7C";

/// A known field of the record, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Source,
    Medium,
    Campaign,
    Content,
    Term,
    Gclid,
    Dclid,
}

impl Field {
    /// All fields in the fixed wire order.
    pub const ALL: [Field; 7] = [
        Field::Source,
        Field::Medium,
        Field::Campaign,
        Field::Content,
        Field::Term,
        Field::Gclid,
        Field::Dclid,
    ];

    /// The key this field is stored under.
    pub fn wire_key(self) -> &'static str {
        match self {
            Field::Source => "utmcsr",
            Field::Medium => "utmcmd",
            Field::Campaign => "utmccn",
            Field::Content => "utmcct",
            Field::Term => "utmctr",
            Field::Gclid => "utmgclid",
            Field::Dclid => "utmdclid",
        }
    }

    pub fn from_wire_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.wire_key() == key)
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Source => "source",
            Field::Medium => "medium",
            Field::Campaign => "campaign",
            Field::Content => "content",
            Field::Term => "term",
            Field::Gclid => "gclid",
            Field::Dclid => "dclid",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a visitor arrived, as stored in the attribution cookie.
///
/// `source` and `medium` are always present. Equality compares the
/// serialized form, so two records are equal exactly when they would be
/// persisted as the same string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionRecord {
    pub source: String,

    pub medium: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Search keyword, or [`NOT_PROVIDED`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,

    /// Google Ads click id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gclid: Option<String>,

    /// DoubleClick click id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dclid: Option<String>,

    /// Unknown keys carried over from a persisted value, in first-seen order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<(String, String)>,
}

impl AttributionRecord {
    /// Create a record with only the required fields set.
    pub fn new(source: impl Into<String>, medium: impl Into<String>) -> Self {
        Self {
            source: sanitize(source.into()),
            medium: sanitize(medium.into()),
            campaign: None,
            content: None,
            term: None,
            gclid: None,
            dclid: None,
            extra: Vec::new(),
        }
    }

    /// The `(direct)` / `(none)` / `(not set)` record.
    pub fn direct() -> Self {
        Self::new(DIRECT_SOURCE, NO_MEDIUM).with(Field::Campaign, NOT_SET)
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field. A `|` in the value is stored as `%7C`.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = sanitize(value.into());
        match field {
            Field::Source => self.source = value,
            Field::Medium => self.medium = value,
            Field::Campaign => self.campaign = Some(value),
            Field::Content => self.content = Some(value),
            Field::Term => self.term = Some(value),
            Field::Gclid => self.gclid = Some(value),
            Field::Dclid => self.dclid = Some(value),
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Source => Some(&self.source),
            Field::Medium => Some(&self.medium),
            Field::Campaign => self.campaign.as_deref(),
            Field::Content => self.content.as_deref(),
            Field::Term => self.term.as_deref(),
            Field::Gclid => self.gclid.as_deref(),
            Field::Dclid => self.dclid.as_deref(),
        }
    }

    /// Set an unknown key, replacing an earlier value in place.
    pub fn set_extra(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = sanitize(value.into());
        match self.extra.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.extra.push((key, value)),
        }
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Wire key/value pairs of every present field, in persisted order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        let known = Field::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|v| (field.wire_key(), v)));
        let extra = self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str()));
        known.chain(extra)
    }

    /// Serialize to the persisted string.
    pub fn encode(&self) -> String {
        crate::codec::encode(self)
    }
}

impl Default for AttributionRecord {
    fn default() -> Self {
        Self::direct()
    }
}

impl PartialEq for AttributionRecord {
    fn eq(&self, other: &Self) -> bool {
        self.encode() == other.encode()
    }
}

impl Eq for AttributionRecord {}

impl fmt::Display for AttributionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for AttributionRecord {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::codec::decode(s).ok_or_else(|| {
            crate::Error::InvalidRecord(format!("no key=value segment in '{s}'"))
        })
    }
}

fn sanitize(value: String) -> String {
    if value.contains(SEGMENT_SEPARATOR) {
        value.replace(SEGMENT_SEPARATOR, ESCAPED_SEPARATOR)
    } else {
        value
    }
}
