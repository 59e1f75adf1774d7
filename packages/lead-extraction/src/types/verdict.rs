//! Per-hit classification results.

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// A company planning an investment or expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub company_name: String,
    pub investment_summary: String,
    pub source_url: String,
}

impl Lead {
    pub fn new(
        company_name: impl Into<String>,
        investment_summary: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            investment_summary: investment_summary.into(),
            source_url: source_url.into(),
        }
    }
}

/// What the model decided about one hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionVerdict {
    Irrelevant,
    Lead(Lead),
}

impl ExtractionVerdict {
    pub fn into_lead(self) -> Option<Lead> {
        match self {
            ExtractionVerdict::Lead(lead) => Some(lead),
            ExtractionVerdict::Irrelevant => None,
        }
    }
}

/// Terminal state of a hit after extraction.
///
/// Only `Accepted` emits a lead. A hit reaches exactly one of these and
/// never leaves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitOutcome {
    Accepted(Lead),
    Irrelevant,
    ParseFailed { reason: String },
    /// Rate limited on every attempt
    Exhausted { attempts: u32 },
    /// Non-retryable model failure
    Failed { reason: String },
}

impl HitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, HitOutcome::Accepted(_))
    }

    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            HitOutcome::Accepted(_) => "accepted",
            HitOutcome::Irrelevant => "irrelevant",
            HitOutcome::ParseFailed { .. } => "parse_failed",
            HitOutcome::Exhausted { .. } => "exhausted",
            HitOutcome::Failed { .. } => "failed",
        }
    }
}

impl From<ExtractionVerdict> for HitOutcome {
    fn from(verdict: ExtractionVerdict) -> Self {
        match verdict {
            ExtractionVerdict::Lead(lead) => HitOutcome::Accepted(lead),
            ExtractionVerdict::Irrelevant => HitOutcome::Irrelevant,
        }
    }
}

impl From<ExtractionError> for HitOutcome {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::RateLimited { attempts } => HitOutcome::Exhausted { attempts },
            ExtractionError::Parse(reason) => HitOutcome::ParseFailed { reason },
            ExtractionError::Generation(e) => HitOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_map_to_terminal_states() {
        let exhausted: HitOutcome = ExtractionError::RateLimited { attempts: 4 }.into();
        assert_eq!(exhausted, HitOutcome::Exhausted { attempts: 4 });

        let parse: HitOutcome = ExtractionError::Parse("bad".into()).into();
        assert_eq!(parse.label(), "parse_failed");
    }

    #[test]
    fn test_verdicts_map_to_outcomes() {
        let lead = Lead::new("Acme", "New plant", "http://x");
        let outcome: HitOutcome = ExtractionVerdict::Lead(lead.clone()).into();
        assert_eq!(outcome, HitOutcome::Accepted(lead));
        assert!(outcome.is_accepted());

        let outcome: HitOutcome = ExtractionVerdict::Irrelevant.into();
        assert!(!outcome.is_accepted());
    }
}
