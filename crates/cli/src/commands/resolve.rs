//! `utmzz resolve` — Attribute one page view.

use chrono::{DateTime, Utc};
use utmzz_attribution::{PageView, TrackOutcome, Tracker};
use utmzz_config::TrackerConfig;
use utmzz_cookies::CookieJar;

pub struct ResolveArgs {
    pub url: String,
    pub referrer: Option<String>,
    pub cookie: Option<String>,
    pub now: Option<String>,
    pub json: bool,
}

pub fn run(args: ResolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = TrackerConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let now = parse_now(args.now.as_deref())?;

    let page = PageView::new(&args.url, args.referrer.as_deref())?;
    let mut jar = CookieJar::from_header(args.cookie.as_deref().unwrap_or_default());
    let outcome = Tracker::new(&config).track(&page, &mut jar, now);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome_json(&outcome))?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>, String> {
    match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| format!("Invalid --now '{raw}': {e}")),
        None => Ok(Utc::now()),
    }
}

fn outcome_json(outcome: &TrackOutcome) -> serde_json::Value {
    serde_json::json!({
        "resolution": outcome.resolution,
        "suppressed": outcome.suppressed,
        "record": outcome.record,
        "encoded": outcome.encoded,
        "set_cookie": outcome
            .cookies
            .iter()
            .map(|c| c.header_value())
            .collect::<Vec<_>>(),
    })
}

fn print_outcome(outcome: &TrackOutcome) {
    println!("Attribution ({})", outcome.resolution);
    if outcome.suppressed {
        println!("  (same-session navigation: page params and referrer ignored)");
    }
    for (key, value) in outcome.record.pairs() {
        println!("  {key:<10} {value}");
    }
    println!();
    for cookie in &outcome.cookies {
        println!("Set-Cookie: {}", cookie.header_value());
    }
}
