//! Text generation capability.
//!
//! The extractor needs exactly one thing from a language model: prompt in,
//! text out. Everything provider-specific stays behind this trait.

use async_trait::async_trait;
use thiserror::Error;

/// Phrases that mark a rate-limit rejection when no status code is available.
const RATE_LIMIT_MARKERS: [&str; 5] = [
    "rate limit",
    "rate_limit",
    "too many requests",
    "quota",
    "resource exhausted",
];

/// Failure of a single generation call. Callers only care whether a retry
/// could help.
#[derive(Debug, Error)]
pub enum AiError {
    /// Provider asked us to slow down
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Provider rejected the credentials
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Anything else: network, bad request, empty reply
    #[error("{0}")]
    Request(String),
}

impl AiError {
    /// Classify a provider error message. Messages that read like a
    /// rate-limit rejection become [`AiError::RateLimited`].
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lowered = message.to_lowercase();
        if lowered.contains("429") || RATE_LIMIT_MARKERS.iter().any(|m| lowered.contains(m)) {
            AiError::RateLimited(message)
        } else {
            AiError::Request(message)
        }
    }

    /// The single retry predicate used by the extractor.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, AiError::RateLimited(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AiError::Unauthorized(_))
    }
}

/// Prompt-completion capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send one prompt and return the raw reply text.
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for std::sync::Arc<T> {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        (**self).generate(prompt).await
    }
}
