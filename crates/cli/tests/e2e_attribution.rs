//! End-to-end tests for the utmzz page-view flow.
//!
//! These drive a visitor through several page views with one shared cookie
//! jar, the way a browser would carry cookies between requests.

use chrono::{DateTime, TimeZone, Utc};
use utmzz_attribution::{PageView, Resolution, TrackOutcome, Tracker};
use utmzz_config::{SearchEngineConfig, TrackerConfig};
use utmzz_cookies::CookieJar;
use utmzz_core::{AttributionRecord, CookieStore, codec};

// ── Helpers ──────────────────────────────────────────────────────────────

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap()
}

/// A browser visiting pages of one site with a persistent cookie jar.
struct Visitor {
    tracker: Tracker,
    jar: CookieJar,
}

impl Visitor {
    fn new(tracker: Tracker) -> Self {
        Self {
            tracker,
            jar: CookieJar::new(),
        }
    }

    fn with_cookies(tracker: Tracker, header: &str) -> Self {
        Self {
            tracker,
            jar: CookieJar::from_header(header),
        }
    }

    fn visit(&mut self, url: &str, referrer: Option<&str>) -> TrackOutcome {
        let page = PageView::new(url, referrer).unwrap();
        self.tracker.track(&page, &mut self.jar, now())
    }

    /// A new browser session keeps the persistent cookie only.
    fn end_session(&mut self) {
        let persistent: Vec<String> = self
            .jar
            .written()
            .iter()
            .filter(|c| !c.is_session())
            .map(|c| format!("{}={}", c.name, c.value))
            .collect();
        self.jar = CookieJar::from_header(&persistent.join("; "));
    }

    fn stored(&self) -> Option<String> {
        self.jar.read("__utmzz")
    }
}

// ── Flows ────────────────────────────────────────────────────────────────

#[test]
fn e2e_organic_visit_then_internal_navigation() {
    let mut visitor = Visitor::new(Tracker::default());

    let landing = visitor.visit(
        "https://www.example.com/",
        Some("https://www.google.de/search?q=attribution+cookie"),
    );
    assert_eq!(landing.resolution, Resolution::Referrer);
    assert_eq!(
        landing.encoded,
        "utmcsr=google|utmcmd=organic|utmccn=(not set)|utmctr=attribution+cookie"
    );

    for path in ["/pricing", "/docs?utm_source=docs-banner", "/signup#gclid=zzz"] {
        let outcome = visitor.visit(
            &format!("https://shop.example.com{path}"),
            Some("https://www.example.com/"),
        );
        assert!(outcome.suppressed, "{path}");
        assert_eq!(outcome.resolution, Resolution::CarriedOver, "{path}");
        assert_eq!(outcome.encoded, landing.encoded, "{path}");
    }
}

#[test]
fn e2e_paid_click_overrides_previous_organic() {
    let mut visitor = Visitor::new(Tracker::default());
    visitor.visit(
        "https://www.example.com/",
        Some("https://www.bing.com/search?q=widgets"),
    );
    visitor.end_session();

    let outcome = visitor.visit(
        "https://www.example.com/promo?utm_source=newsletter&utm_campaign=spring&gclid=Cj0KEQ",
        Some("https://www.google.com/"),
    );
    assert_eq!(outcome.resolution, Resolution::TaggedLink);
    assert_eq!(
        outcome.encoded,
        "utmcsr=google|utmcmd=cpc|utmccn=spring|utmgclid=Cj0KEQ"
    );
    assert_eq!(visitor.stored().as_deref(), Some(outcome.encoded.as_str()));
}

#[test]
fn e2e_returning_direct_visit_keeps_stored_attribution() {
    let mut visitor = Visitor::new(Tracker::default());
    let first = visitor.visit(
        "https://example.com/post/1",
        Some("https://news.ycombinator.com/item?id=1"),
    );
    assert_eq!(first.record.source, "news.ycombinator.com");
    assert_eq!(first.record.medium, "referral");

    visitor.end_session();
    let returning = visitor.visit("https://example.com/", None);
    assert!(!returning.suppressed);
    assert_eq!(returning.resolution, Resolution::CarriedOver);
    assert_eq!(returning.record, first.record);
}

#[test]
fn e2e_referral_during_session_reattributes() {
    let mut visitor = Visitor::new(Tracker::default());
    visitor.visit("https://example.com/?utm_source=newsletter", None);

    let outcome = visitor.visit(
        "https://example.com/article",
        Some("https://partner.io/links"),
    );
    assert!(!outcome.suppressed);
    assert_eq!(outcome.resolution, Resolution::Referrer);
    assert_eq!(outcome.record.source, "partner.io");
}

#[test]
fn e2e_classic_cookie_is_migrated() {
    let mut visitor = Visitor::with_cookies(
        Tracker::default(),
        "__utma=1.2.3.4.5.6; __utmz=173272373.1700000000.3.2.utmcsr=yahoo|utmccn=(organic)|utmcmd=organic|utmctr=tokio",
    );
    let outcome = visitor.visit("https://example.com/", None);
    assert_eq!(outcome.resolution, Resolution::CarriedOver);
    assert_eq!(
        outcome.encoded,
        "utmcsr=yahoo|utmcmd=organic|utmccn=(organic)|utmctr=tokio"
    );
    assert_eq!(visitor.jar.written()[0].name, "__utmzz");
}

#[test]
fn e2e_first_visit_is_direct_with_two_cookies() {
    let mut visitor = Visitor::new(Tracker::default());
    let outcome = visitor.visit("https://www.example.co.uk/", None);
    assert_eq!(outcome.resolution, Resolution::Direct);
    assert_eq!(outcome.record, AttributionRecord::direct());

    let headers = visitor.jar.set_cookie_headers();
    assert_eq!(
        headers,
        [
            "__utmzz=utmcsr=(direct)|utmcmd=(none)|utmccn=(not set);Expires=Tue, 28 Oct 2025 09:00:00 GMT;Path=/;Domain=example.co.uk;",
            "__utmzzses=1;Path=/;Domain=example.co.uk;",
        ]
    );
}

#[test]
fn e2e_custom_engine_and_cookie_names() {
    let mut config = TrackerConfig::default();
    config.cookies.record_name = "_attr".into();
    config.cookies.session_name = "_attr_ses".into();
    config.search_engines.push(SearchEngineConfig {
        domain: "ecosia.org".into(),
        param: "q".into(),
        name: "ecosia".into(),
    });
    let mut visitor = Visitor::new(Tracker::new(&config));

    let outcome = visitor.visit(
        "https://example.com/",
        Some("https://www.ecosia.org/search?q=trees"),
    );
    assert_eq!(outcome.record.source, "ecosia");
    assert_eq!(outcome.record.term.as_deref(), Some("trees"));
    assert_eq!(visitor.jar.read("_attr").as_deref(), Some(outcome.encoded.as_str()));
    assert_eq!(visitor.jar.read("_attr_ses").as_deref(), Some("1"));
}

#[test]
fn e2e_every_stored_value_round_trips() {
    let mut visitor = Visitor::new(Tracker::default());
    let pages = [
        ("https://example.com/?utm_source=a|b&utm_term=x%20y", None),
        ("https://example.com/#dclid=123", None),
        ("https://example.com/", Some("https://www.baidu.com/s?wd=rust")),
        ("https://example.com/", Some("https://www.example.com/")),
    ];
    for (url, referrer) in pages {
        visitor.end_session();
        let outcome = visitor.visit(url, referrer);
        let stored = visitor.stored().unwrap();
        assert_eq!(stored, outcome.encoded);
        assert_eq!(codec::decode(&stored), Some(outcome.record));
    }
}
