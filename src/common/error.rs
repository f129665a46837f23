//! Crate-level error type
//!
//! Module errors (`HeaderError`, `ConfigError`) stay specific to their
//! module and are wrapped here so callers can use `?` across modules.

use thiserror::Error;

use crate::config::ConfigError;
use crate::header::HeaderError;

#[derive(Error, Debug)]
pub enum Pt2Error {
    /// Header precondition failed; no records were processed
    #[error("Header error: {0}")]
    Header(#[from] HeaderError),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error other than a short read of the record stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Pt2Error {
    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Whether the error happened before any record was read
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Header(_) | Self::Config(_))
    }
}

/// Result type alias using Pt2Error
pub type Pt2Result<T> = Result<T, Pt2Error>;
