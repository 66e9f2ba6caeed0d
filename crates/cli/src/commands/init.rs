//! `utmzz init` — Write a default configuration file.

use std::path::Path;
use utmzz_config::TrackerConfig;

pub fn run(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = TrackerConfig::config_path();
    if write_default(&config_path, force)? {
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("   Add [[search_engines]] entries or set cookies.domain as needed.");
    } else {
        println!("⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or re-run with --force.");
    }
    Ok(())
}

/// Write the default config to `path`. Returns `false` when a file exists
/// and `force` is not set.
fn write_default(path: &Path, force: bool) -> std::io::Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, TrackerConfig::default_toml())?;
    tracing::info!("Wrote default config to {}", path.display());
    Ok(true)
}
