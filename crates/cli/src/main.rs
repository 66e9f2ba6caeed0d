//! utmzz CLI — the main entry point.
//!
//! Commands:
//! - `resolve` — Attribute a page view and print the cookies to set
//! - `decode`  — Decode a stored attribution cookie value
//! - `engines` — List recognized search engines
//! - `init`    — Write a default config file

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "utmzz",
    about = "utmzz — campaign attribution cookie replicator",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Attribute a page view
    Resolve {
        /// Full URL of the current page
        #[arg(short, long)]
        url: String,

        /// Referrer URL sent by the browser
        #[arg(short, long)]
        referrer: Option<String>,

        /// Cookie header of the request (e.g. "__utmzz=...; __utmzzses=1")
        #[arg(short, long, env = "UTMZZ_COOKIE")]
        cookie: Option<String>,

        /// Evaluate at this RFC 3339 instant instead of now
        #[arg(long)]
        now: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Decode a stored attribution value
    Decode {
        /// The cookie value, e.g. "utmcsr=google|utmcmd=organic"
        value: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List recognized search engines
    Engines,

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Resolve {
            url,
            referrer,
            cookie,
            now,
            json,
        } => commands::resolve::run(commands::resolve::ResolveArgs {
            url,
            referrer,
            cookie,
            now,
            json,
        })?,
        Commands::Decode { value, json } => commands::decode::run(&value, json)?,
        Commands::Engines => commands::engines::run()?,
        Commands::Init { force } => commands::init::run(force)?,
    }

    Ok(())
}
