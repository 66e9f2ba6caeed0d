//! Attribution resolver — the precedence chain over all attribution inputs.

use crate::params::{CampaignParam, CampaignParams, extract};
use crate::referrer::{ReferrerInfo, classify};
use crate::registry::SearchEngineRegistry;
use serde::Serialize;
use std::fmt;
use tracing::debug;
use utmzz_core::{AttributionRecord, Field, RawContext, codec};

/// Which rule produced the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// `utm_source`, `gclid` or `dclid` on the page URL.
    TaggedLink,
    /// Organic search or cross-site referral.
    Referrer,
    /// The previously stored record, unchanged.
    CarriedOver,
    /// Nothing known: `(direct)` / `(none)`.
    Direct,
}

impl Resolution {
    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::TaggedLink => "tagged_link",
            Resolution::Referrer => "referrer",
            Resolution::CarriedOver => "carried_over",
            Resolution::Direct => "direct",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub record: AttributionRecord,
    pub resolution: Resolution,
    /// Page params and referrer were ignored as same-session navigation.
    pub suppressed: bool,
}

/// Resolve the attribution for one page view.
///
/// Same-session navigation within one apex domain suppresses the page
/// params and the referrer before any rule is evaluated. Rules then apply in
/// order, and the first that matches decides the record.
pub fn resolve(ctx: &RawContext, registry: &SearchEngineRegistry) -> Resolved {
    let suppressed = ctx.same_session && ctx.is_same_site();
    let (params, referrer) = if suppressed {
        debug!("Same-session navigation, ignoring page params and referrer");
        (None, None)
    } else {
        (
            extract(&ctx.params),
            classify(
                registry,
                ctx.referrer.as_deref(),
                ctx.referrer_apex.as_deref(),
                ctx.current_apex.as_deref(),
            ),
        )
    };

    let (record, resolution) = decide(params, referrer, ctx.stored.as_deref());
    debug!(%resolution, record = %record, "Attribution resolved");
    Resolved {
        record,
        resolution,
        suppressed,
    }
}

/// The precedence chain over already-suppressed inputs.
pub fn decide(
    params: Option<CampaignParams>,
    referrer: Option<ReferrerInfo>,
    stored: Option<&str>,
) -> (AttributionRecord, Resolution) {
    if let Some(params) = params.filter(CampaignParams::is_tagged) {
        return (from_tagged_link(&params), Resolution::TaggedLink);
    }
    if let Some(info) = referrer {
        return (from_referrer(info), Resolution::Referrer);
    }
    if let Some(record) = stored.and_then(codec::decode) {
        return (record, Resolution::CarriedOver);
    }
    (AttributionRecord::direct(), Resolution::Direct)
}

fn from_tagged_link(params: &CampaignParams) -> AttributionRecord {
    let mut record = AttributionRecord::direct();
    for (param, value) in params.iter() {
        record.set(param.field(), value);
    }
    // click ids always mean paid Google traffic
    if params.has_click_id() {
        let medium = if params.non_empty(CampaignParam::Gclid).is_some() {
            "cpc"
        } else {
            "cpm"
        };
        record.set(Field::Source, "google");
        record.set(Field::Medium, medium);
    }
    record
}

fn from_referrer(info: ReferrerInfo) -> AttributionRecord {
    let mut record = AttributionRecord::direct()
        .with(Field::Source, info.source)
        .with(Field::Medium, info.medium.as_str());
    if let Some(term) = info.term.filter(|t| !t.is_empty()) {
        record.set(Field::Term, term);
    }
    record
}
