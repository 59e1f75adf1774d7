//! Typed errors for the lead pipeline.
//!
//! Two tiers. [`LeadError`] aborts a whole run and is returned to the caller.
//! [`ExtractionError`] belongs to a single hit; the pipeline logs it, drops
//! the hit and keeps going.

use chrono::NaiveDate;
use thiserror::Error;

use crate::traits::ai::AiError;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum LeadError {
    /// Sector was blank after trimming
    #[error("sector must not be empty")]
    EmptySector,

    /// Explicit start date after the end date
    #[error("invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    /// Credentials missing or rejected by the search provider
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// Search provider answered with a non-2xx status
    #[error("search provider error (status {status}): {body}")]
    Provider { status: u16, body: String },

    /// Could not reach or decode the search provider
    #[error("search transport error: {0}")]
    Transport(String),

    /// CSV serialization failed
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the export failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LeadError {
    /// Authentication failure with the standard remediation hint.
    pub fn authentication(detail: impl std::fmt::Display, env_var: &str) -> Self {
        LeadError::Authentication {
            message: format!("{detail}. Check that {env_var} is set to a valid key"),
        }
    }
}

/// Errors scoped to one search hit. Never fatal to the run.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Every attempt was rate limited
    #[error("rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    /// Model output did not match the expected shape
    #[error("unparseable model output: {0}")]
    Parse(String),

    /// Model call failed for a reason other than rate limiting
    #[error("model call failed: {0}")]
    Generation(#[source] AiError),
}

/// Result type alias for run-level operations.
pub type Result<T> = std::result::Result<T, LeadError>;

/// Result type alias for per-hit extraction.
pub type ExtractionResult<T> = std::result::Result<T, ExtractionError>;
