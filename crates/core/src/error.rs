//! Error types for the utmzz domain.
//!
//! Resolution itself never fails; errors only surface at the edges where
//! untrusted input is turned into domain values.

use thiserror::Error;

/// The top-level error type for utmzz operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid attribution record: {0}")]
    InvalidRecord(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;
