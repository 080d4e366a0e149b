//! Error taxonomy for the resume matcher.
//!
//! `ResumeMatcherError` enumerates the failure modes surfaced across the
//! pipeline; `Result<T>` is the crate-wide alias. An `From<anyhow::Error>`
//! bridge lets upstream `anyhow` failures collapse into the taxonomy.

use thiserror::Error;

/// The error type returned throughout the crate.
#[derive(Error, Debug)]
pub enum ResumeMatcherError {
    /// A failure originating from an external capability/provider.
    #[error("external capability error: {0}")]
    ExternalCapability(String),

    /// Input or schema validation failure.
    #[error("validation error: {0}")]
    Validation(String),

    /// Two vectors/collections had incompatible dimensions.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch { left: usize, right: usize },

    /// An input document format is not supported.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A parse failure while ingesting input.
    #[error("parse error: {0}")]
    Parse(String),

    /// A configuration failure.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ResumeMatcherError>;

impl From<anyhow::Error> for ResumeMatcherError {
    fn from(err: anyhow::Error) -> Self {
        ResumeMatcherError::ExternalCapability(err.to_string())
    }
}

impl From<reqwest::Error> for ResumeMatcherError {
    fn from(err: reqwest::Error) -> Self {
        ResumeMatcherError::ExternalCapability(err.to_string())
    }
}
