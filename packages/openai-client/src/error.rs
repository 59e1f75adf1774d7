//! Error types for OpenAI client.

use thiserror::Error;

/// Result type for OpenAI client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// OpenAI client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP 429 from the API
    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    /// HTTP 401 or 403: the key is missing, wrong or revoked
    #[error("Unauthorized (status {status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// Any other non-2xx response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl OpenAIError {
    /// Build the error for a non-2xx response.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            429 => OpenAIError::RateLimited { message },
            401 | 403 => OpenAIError::Unauthorized { status, message },
            _ => OpenAIError::Api { status, message },
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, OpenAIError::RateLimited { .. })
    }

    /// Rejected credentials. A blank key counts too.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, OpenAIError::Unauthorized { .. } | OpenAIError::Config(_))
    }
}
