//! Wire codec for the persisted attribution string.
//!
//! ```text
//! utmcsr=google|utmcmd=organic|utmccn=(not set)|utmctr=(not provided)
//! ```
//!
//! Decoding is lenient: segments without `=` are dropped, and keys are
//! reduced to the part after their last `.` or `:` so that classic
//! `__utmz` values (`1.1700000000.1.1.utmcsr=...`) and namespaced keys
//! (`ga:utmcsr=...`) decode to the same fields.

use crate::record::{
    AttributionRecord, DIRECT_SOURCE, Field, NO_MEDIUM, SEGMENT_SEPARATOR,
};
use tracing::{debug, warn};

/// Serialize a record: `key=value` for every present field, joined by `|`.
pub fn encode(record: &AttributionRecord) -> String {
    record
        .pairs()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("|")
}

/// Parse a persisted string back into a record.
///
/// Returns `None` when no segment carries a `key=value` pair. A missing
/// source or medium falls back to `(direct)` / `(none)`.
pub fn decode(stored: &str) -> Option<AttributionRecord> {
    let mut record = AttributionRecord::new(DIRECT_SOURCE, NO_MEDIUM);
    let mut parsed = 0usize;

    for segment in stored.split(SEGMENT_SEPARATOR) {
        let Some((raw_key, value)) = segment.split_once('=') else {
            if !segment.is_empty() {
                warn!(segment, "Dropping attribution segment without '='");
            }
            continue;
        };
        let key = strip_key_prefix(raw_key);
        match Field::from_wire_key(key) {
            Some(field) => record.set(field, value),
            None => {
                debug!(key, "Keeping unknown attribution key");
                record.set_extra(key, value);
            }
        }
        parsed += 1;
    }

    (parsed > 0).then_some(record)
}

fn strip_key_prefix(key: &str) -> &str {
    match key.rfind(['.', ':']) {
        Some(idx) => &key[idx + 1..],
        None => key,
    }
}
