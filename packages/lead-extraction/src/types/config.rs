//! Configuration types for searching and extraction.
//!
//! Credentials never live here; they go straight to the searcher and
//! generator constructors.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

impl PipelineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_extraction(mut self, extraction: ExtractionConfig) -> Self {
        self.extraction = extraction;
        self
    }
}

/// Search provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Provider host. Default: `https://serpapi.com`.
    pub base_url: String,

    /// Search engine to query. Default: `google`.
    pub engine: String,

    /// Interface language (`hl`). Default: `en`.
    pub language: String,

    /// Country code (`gl`). Default: `in`.
    pub country: String,

    /// Page size requested, and the cap on hits returned. Default: 10.
    pub num_results: u32,

    /// Window length when the operator gives no start date. Default: 60.
    pub lookback_days: i64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://serpapi.com".to_string(),
            engine: "google".to_string(),
            language: "en".to_string(),
            country: "in".to_string(),
            num_results: 10,
            lookback_days: 60,
        }
    }
}

impl SearchConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_num_results(mut self, num: u32) -> Self {
        self.num_results = num;
        self
    }

    pub fn with_lookback_days(mut self, days: i64) -> Self {
        self.lookback_days = days;
        self
    }
}

/// Serialization convention the model is asked to answer in.
///
/// All formats carry the same verdict; JSON is the canonical one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    PipeDelimited,
    MarkdownTable,
}

/// Backoff schedule for rate-limited model calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Retries after the first attempt. Default: 3.
    pub max_retries: u32,

    /// Delay before the first retry; doubles each time. Default: 2000.
    pub base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 2000,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay_ms: base_delay.as_millis() as u64,
        }
    }

    /// Upper bound on calls for one hit.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before retry number `retry` (1-based): `base * 2^(retry-1)`.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u64 << retry.saturating_sub(1).min(16);
        Duration::from_millis(self.base_delay_ms.saturating_mul(factor))
    }
}

/// Relevance extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Chat model. Default: `gpt-4o-mini`.
    pub model: String,

    /// Sampling temperature. Default: 0.2.
    pub temperature: f32,

    #[serde(default)]
    pub output_format: OutputFormat,

    #[serde(default)]
    pub retry: RetryPolicy,

    /// Fixed gap between consecutive hits; 0 disables pacing. Default: 1000.
    pub pacing_delay_ms: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            output_format: OutputFormat::Json,
            retry: RetryPolicy::default(),
            pacing_delay_ms: 1000,
        }
    }
}

impl ExtractionConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_pacing_delay(mut self, delay: Duration) -> Self {
        self.pacing_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }
}
