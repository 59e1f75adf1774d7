use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use lead_extraction::{Credentials, ExtractionConfig, PipelineConfig, RetryPolicy, SearchConfig};

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub search_country: String,
    pub search_language: String,
    pub search_num_results: u32,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
    pub pacing_delay_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let search = SearchConfig::default();
        let extraction = ExtractionConfig::default();

        Ok(Self {
            // Missing keys stay blank; the gateways reject them with a hint.
            credentials: Credentials::new(
                env::var("SERPAPI_KEY").unwrap_or_default(),
                env::var("OPENAI_API_KEY").unwrap_or_default(),
            ),
            openai_model: env::var("OPENAI_MODEL").unwrap_or(extraction.model),
            openai_base_url: env::var("OPENAI_BASE_URL").ok(),
            search_country: env::var("SEARCH_COUNTRY").unwrap_or(search.country),
            search_language: env::var("SEARCH_LANGUAGE").unwrap_or(search.language),
            search_num_results: parse_var("SEARCH_NUM_RESULTS", search.num_results)?,
            max_retries: parse_var("MAX_RETRIES", extraction.retry.max_retries)?,
            retry_base_delay_ms: parse_var(
                "RETRY_BASE_DELAY_MS",
                extraction.retry.base_delay_ms,
            )?,
            pacing_delay_ms: parse_var("PACING_DELAY_MS", extraction.pacing_delay_ms)?,
        })
    }

    /// Library configuration for one run.
    pub fn pipeline(&self) -> PipelineConfig {
        let search = SearchConfig::default()
            .with_country(&self.search_country)
            .with_language(&self.search_language)
            .with_num_results(self.search_num_results);

        let extraction = ExtractionConfig::default()
            .with_model(&self.openai_model)
            .with_retry(RetryPolicy::new(
                self.max_retries,
                Duration::from_millis(self.retry_base_delay_ms),
            ))
            .with_pacing_delay(Duration::from_millis(self.pacing_delay_ms));

        PipelineConfig::new()
            .with_search(search)
            .with_extraction(extraction)
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a valid number")),
        Err(_) => Ok(default),
    }
}
