//! Errors raised before analysis starts

use thiserror::Error;

/// Why an analyze request was rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("either url or html must be provided")]
    MissingSource,

    #[error("provide either url or html, not both")]
    AmbiguousSource,

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported URL scheme {0}; only http and https can be analyzed")]
    UnsupportedScheme(String),
}
