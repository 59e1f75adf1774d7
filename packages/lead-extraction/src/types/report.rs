//! Final output of a pipeline run.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::verdict::{HitOutcome, Lead};

/// Non-emitting outcomes, counted by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DroppedCounts {
    pub irrelevant: usize,
    pub parse_failed: usize,
    pub exhausted: usize,
    pub failed: usize,
}

impl DroppedCounts {
    pub fn total(&self) -> usize {
        self.irrelevant + self.parse_failed + self.exhausted + self.failed
    }

    pub(crate) fn record(&mut self, outcome: &HitOutcome) {
        match outcome {
            HitOutcome::Accepted(_) => {}
            HitOutcome::Irrelevant => self.irrelevant += 1,
            HitOutcome::ParseFailed { .. } => self.parse_failed += 1,
            HitOutcome::Exhausted { .. } => self.exhausted += 1,
            HitOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Accepted leads in provider order, plus run metadata.
///
/// Built once by the aggregator and read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct LeadReport {
    run_id: Uuid,
    sector: String,
    date_from: NaiveDate,
    date_to: NaiveDate,
    generated_at: DateTime<Utc>,
    total_considered: usize,
    leads: Vec<Lead>,
    dropped: DroppedCounts,
}

impl LeadReport {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        run_id: Uuid,
        sector: String,
        date_from: NaiveDate,
        date_to: NaiveDate,
        generated_at: DateTime<Utc>,
        total_considered: usize,
        leads: Vec<Lead>,
        dropped: DroppedCounts,
    ) -> Self {
        Self {
            run_id,
            sector,
            date_from,
            date_to,
            generated_at,
            total_considered,
            leads,
            dropped,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn sector(&self) -> &str {
        &self.sector
    }

    pub fn date_from(&self) -> NaiveDate {
        self.date_from
    }

    pub fn date_to(&self) -> NaiveDate {
        self.date_to
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Hits that went through extraction.
    pub fn total_considered(&self) -> usize {
        self.total_considered
    }

    pub fn total_accepted(&self) -> usize {
        self.leads.len()
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn dropped(&self) -> DroppedCounts {
        self.dropped
    }

    /// True when the operator should see "no leads found".
    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }
}
