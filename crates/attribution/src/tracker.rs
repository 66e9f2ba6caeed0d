//! Page-view tracker: reads the cookies, resolves, writes the cookies back.

use crate::page::PageView;
use crate::registry::{SearchEngineEntry, SearchEngineRegistry};
use crate::resolver::{Resolution, resolve};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, info, warn};
use utmzz_config::{CookieConfig, TrackerConfig};
use utmzz_core::{AttributionRecord, CookieStore, SetCookie};

/// Value of the session marker cookie.
const SESSION_MARKER: &str = "1";

/// What one tracked page view decided and wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackOutcome {
    pub record: AttributionRecord,
    pub resolution: Resolution,
    pub suppressed: bool,
    /// The persisted form of `record`.
    pub encoded: String,
    /// Cookies written, record cookie first.
    pub cookies: Vec<SetCookie>,
}

/// Runs attribution for page views against a cookie store.
#[derive(Debug, Clone)]
pub struct Tracker {
    cookies: CookieConfig,
    registry: Cow<'static, SearchEngineRegistry>,
}

impl Tracker {
    /// Build a tracker from configuration. Custom search engines are layered
    /// over the built-in table; without any the shared built-in table is used.
    pub fn new(config: &TrackerConfig) -> Self {
        let registry = if config.search_engines.is_empty() {
            Cow::Borrowed(SearchEngineRegistry::builtin())
        } else {
            let registry = config.search_engines.iter().fold(
                SearchEngineRegistry::with_defaults(),
                |registry, engine| {
                    registry.with_engine(SearchEngineEntry::new(
                        &engine.domain,
                        &engine.param,
                        &engine.name,
                    ))
                },
            );
            info!(
                custom = config.search_engines.len(),
                total = registry.len(),
                "Search engine registry extended"
            );
            Cow::Owned(registry)
        };
        Self {
            cookies: config.cookies.clone(),
            registry,
        }
    }

    pub fn registry(&self) -> &SearchEngineRegistry {
        &self.registry
    }

    /// Attribute one page view and persist the result.
    ///
    /// Performs exactly two writes: the attribution cookie, expiring
    /// `lifetime_days` after `now`, and the session marker with no expiry.
    /// An expiry past the representable range leaves the attribution cookie
    /// without one.
    pub fn track(
        &self,
        page: &PageView,
        store: &mut impl CookieStore,
        now: DateTime<Utc>,
    ) -> TrackOutcome {
        let stored = non_empty(store.read(&self.cookies.legacy_name))
            .or_else(|| non_empty(store.read(&self.cookies.record_name)));
        let same_session = non_empty(store.read(&self.cookies.session_name)).is_some();

        let ctx = page.context(stored, same_session);
        let resolved = resolve(&ctx, &self.registry);
        let encoded = resolved.record.encode();

        let domain = self.cookies.domain.clone().or(ctx.current_apex);
        let mut record_cookie = SetCookie::new(&self.cookies.record_name, &encoded)
            .with_path(&self.cookies.path)
            .with_domain(domain.clone());
        match self.expiry(now) {
            Some(expires) => record_cookie = record_cookie.with_expires(expires),
            None => warn!(
                lifetime_days = self.cookies.lifetime_days,
                "Cookie lifetime out of range, writing a session cookie"
            ),
        }
        let cookies = vec![
            record_cookie,
            SetCookie::new(&self.cookies.session_name, SESSION_MARKER)
                .with_path(&self.cookies.path)
                .with_domain(domain),
        ];
        for cookie in &cookies {
            store.write(cookie.clone());
        }

        debug!(
            host = page.hostname(),
            resolution = %resolved.resolution,
            same_session,
            "Page view tracked"
        );

        TrackOutcome {
            record: resolved.record,
            resolution: resolved.resolution,
            suppressed: resolved.suppressed,
            encoded,
            cookies,
        }
    }
}

impl Tracker {
    /// `now + lifetime_days`, or `None` when that is not a representable instant.
    fn expiry(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        Duration::try_days(i64::from(self.cookies.lifetime_days))
            .and_then(|lifetime| now.checked_add_signed(lifetime))
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(&TrackerConfig::default())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
