//! # utmzz Core
//!
//! Domain types, the attribution wire codec, and store traits for the utmzz
//! campaign attribution replicator. Everything here is I/O free: parsing of
//! page URLs, classification and resolution live in `utmzz-attribution`,
//! cookie handling lives in `utmzz-cookies`.
//!
//! ## Persisted format
//!
//! An [`AttributionRecord`] is persisted as `key=value` segments joined by
//! `|`, mirroring the classic `__utmz` cookie:
//!
//! ```text
//! utmcsr=example.com|utmcmd=affl-link|utmccn=foo|utmcct=bar|utmctr=biz
//! ```

pub mod codec;
pub mod context;
pub mod error;
pub mod record;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use codec::{decode, encode};
pub use context::RawContext;
pub use error::{Error, Result};
pub use record::{AttributionRecord, Field};
pub use store::{CookieStore, SetCookie};
