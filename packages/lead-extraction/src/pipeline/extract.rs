//! Relevance Extractor: one hit in, one verdict out.

use tokio::time::sleep;
use tracing::{debug, warn};

use super::{parse::parse_verdict, prompts::format_extraction_prompt};
use crate::error::{ExtractionError, ExtractionResult, LeadError, Result};
use crate::traits::ai::TextGenerator;
use crate::types::{
    config::{ExtractionConfig, OutputFormat, RetryPolicy},
    hit::RawHit,
    verdict::{ExtractionVerdict, HitOutcome},
};

/// Named in the remediation hint when the model rejects its key.
const MODEL_KEY_VAR: &str = "OPENAI_API_KEY";

/// Prompts the model about a hit and parses the reply.
///
/// Rate-limited calls are retried with exponential backoff; every other
/// failure ends the hit immediately.
pub struct RelevanceExtractor<G: TextGenerator> {
    generator: G,
    format: OutputFormat,
    retry: RetryPolicy,
}

impl<G: TextGenerator> RelevanceExtractor<G> {
    pub fn new(generator: G, config: &ExtractionConfig) -> Self {
        Self {
            generator,
            format: config.output_format,
            retry: config.retry,
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Classify one hit, surfacing per-hit errors to the caller.
    pub async fn extract(
        &self,
        hit: &RawHit,
        sector: &str,
    ) -> ExtractionResult<ExtractionVerdict> {
        let prompt = format_extraction_prompt(hit, sector, self.format);
        let reply = self.generate_with_retry(&prompt, hit).await?;

        debug!(
            position = hit.position,
            reply_len = reply.len(),
            "Model reply received"
        );

        parse_verdict(&reply, self.format, &hit.link)
    }

    /// Classify one hit into a terminal outcome.
    ///
    /// Per-hit errors are logged and folded into the outcome. A rejected model
    /// key would fail every remaining hit the same way, so it ends the run as
    /// [`LeadError::Authentication`].
    pub async fn classify(&self, hit: &RawHit, sector: &str) -> Result<HitOutcome> {
        let outcome = match self.extract(hit, sector).await {
            Ok(verdict) => {
                let outcome = HitOutcome::from(verdict);
                debug!(position = hit.position, outcome = outcome.label(), "Hit classified");
                outcome
            }
            Err(ExtractionError::Generation(e)) if e.is_unauthorized() => {
                return Err(LeadError::authentication(
                    format!("language model rejected credentials: {e}"),
                    MODEL_KEY_VAR,
                ));
            }
            Err(err) => {
                let reason = err.to_string();
                let outcome = HitOutcome::from(err);
                warn!(
                    position = hit.position,
                    title = %hit.title,
                    link = %hit.link,
                    outcome = outcome.label(),
                    error = %reason,
                    "Dropping hit"
                );
                outcome
            }
        };
        Ok(outcome)
    }

    async fn generate_with_retry(&self, prompt: &str, hit: &RawHit) -> ExtractionResult<String> {
        let max_attempts = self.retry.max_attempts();
        let mut attempt = 1;

        loop {
            match self.generator.generate(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_rate_limited() => {
                    if attempt >= max_attempts {
                        return Err(ExtractionError::RateLimited { attempts: attempt });
                    }
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        position = hit.position,
                        link = %hit.link,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Rate limited, backing off"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(ExtractionError::Generation(e)),
            }
        }
    }
}
