//! Campaign attribution — decides how a visitor arrived on the current page.
//!
//! Replicates the campaign flow of the classic `__utmz` cookie. Four inputs
//! feed a fixed precedence chain:
//!
//! ```text
//!  query#fragment ──▶ params::extract ──┐
//!  referrer URL ────▶ referrer::classify ┼──▶ resolver::resolve ──▶ AttributionRecord
//!  stored cookie ───▶ codec::decode ─────┤
//!  session marker ───────────────────────┘
//! ```
//!
//! 1. same-session navigation inside one site suppresses params and referrer
//! 2. tagged links (`utm_source`, `gclid`, `dclid`)
//! 3. organic search / cross-site referral
//! 4. the previously stored record
//! 5. `(direct)` / `(none)`
//!
//! [`Tracker`] wires the chain to a [`CookieStore`](utmzz_core::CookieStore)
//! for one page view.

pub mod domain;
pub mod page;
pub mod params;
pub mod referrer;
pub mod registry;
pub mod resolver;
mod scan;
pub mod tracker;

pub use domain::apex_domain;
pub use page::PageView;
pub use params::{CampaignParam, CampaignParams, extract};
pub use referrer::{ReferrerInfo, ReferrerMedium, classify};
pub use registry::{SearchEngineEntry, SearchEngineRegistry};
pub use resolver::{Resolution, Resolved, resolve};
pub use tracker::{TrackOutcome, Tracker};
