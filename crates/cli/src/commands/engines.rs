//! `utmzz engines` — List search engines recognized for organic traffic.

use utmzz_attribution::Tracker;
use utmzz_config::TrackerConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = TrackerConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let tracker = Tracker::new(&config);
    let entries = tracker.registry().entries();

    println!("{:<26} {:<14} {}", "Domain", "Keyword", "Source");
    println!("{:<26} {:<14} {}", "──────", "───────", "──────");
    for entry in &entries {
        println!("{:<26} {:<14} {}", entry.domain, entry.param, entry.name);
    }

    println!();
    println!(
        "  {} search engines ({} custom)",
        entries.len(),
        config.search_engines.len()
    );
    Ok(())
}
