//! Lead Aggregator: ordered outcomes -> [`LeadReport`].

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::types::{
    query::SearchQuery,
    report::{DroppedCounts, LeadReport},
    verdict::{HitOutcome, Lead},
};

/// In-progress report for a single run.
///
/// Outcomes must be recorded in provider order; accepted leads keep that
/// order and are never re-sorted or deduplicated.
pub struct LeadAggregator {
    run_id: Uuid,
    query: SearchQuery,
    considered: usize,
    leads: Vec<Lead>,
    dropped: DroppedCounts,
}

impl LeadAggregator {
    pub fn new(run_id: Uuid, query: SearchQuery) -> Self {
        Self {
            run_id,
            query,
            considered: 0,
            leads: Vec::new(),
            dropped: DroppedCounts::default(),
        }
    }

    pub fn record(&mut self, outcome: HitOutcome) {
        self.considered += 1;
        self.dropped.record(&outcome);
        if let HitOutcome::Accepted(lead) = outcome {
            self.leads.push(lead);
        }
    }

    pub fn finish(self, generated_at: DateTime<Utc>) -> LeadReport {
        LeadReport::new(
            self.run_id,
            self.query.sector().to_string(),
            self.query.date_from(),
            self.query.date_to(),
            generated_at,
            self.considered,
            self.leads,
            self.dropped,
        )
    }
}

/// Aggregate a complete outcome sequence in one go.
pub fn aggregate(
    run_id: Uuid,
    query: SearchQuery,
    outcomes: impl IntoIterator<Item = HitOutcome>,
    generated_at: DateTime<Utc>,
) -> LeadReport {
    let mut aggregator = LeadAggregator::new(run_id, query);
    for outcome in outcomes {
        aggregator.record(outcome);
    }
    aggregator.finish(generated_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::query::build_query;
    use crate::types::query::DateWindow;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn query() -> SearchQuery {
        let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        build_query("Automobile", &DateWindow::recent(), today, 60).unwrap()
    }

    fn lead(name: &str) -> Lead {
        Lead::new(name, "New plant", "https://x.example")
    }

    #[test]
    fn test_counts_and_drops() {
        let outcomes = vec![
            HitOutcome::Accepted(lead("A")),
            HitOutcome::Irrelevant,
            HitOutcome::ParseFailed { reason: "bad".into() },
            HitOutcome::Accepted(lead("B")),
            HitOutcome::Exhausted { attempts: 4 },
            HitOutcome::Failed { reason: "boom".into() },
        ];

        let report = aggregate(Uuid::now_v7(), query(), outcomes, Utc::now());

        assert_eq!(report.total_considered(), 6);
        assert_eq!(report.total_accepted(), 2);
        assert_eq!(report.leads()[0].company_name, "A");
        assert_eq!(report.leads()[1].company_name, "B");
        assert_eq!(
            report.dropped(),
            DroppedCounts {
                irrelevant: 1,
                parse_failed: 1,
                exhausted: 1,
                failed: 1,
            }
        );
        assert_eq!(report.dropped().total() + report.total_accepted(), report.total_considered());
    }

    #[test]
    fn test_empty_outcomes() {
        let report = aggregate(Uuid::now_v7(), query(), Vec::new(), Utc::now());
        assert_eq!(report.total_considered(), 0);
        assert_eq!(report.total_accepted(), 0);
        assert!(report.is_empty());
        assert_eq!(report.sector(), "Automobile");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let outcomes = vec![HitOutcome::Accepted(lead("A")), HitOutcome::Accepted(lead("A"))];
        let report = aggregate(Uuid::now_v7(), query(), outcomes, Utc::now());
        assert_eq!(report.total_accepted(), 2);
    }

    proptest! {
        #[test]
        fn prop_leads_keep_input_order(accepted in proptest::collection::vec(any::<bool>(), 0..40)) {
            let outcomes: Vec<HitOutcome> = accepted
                .iter()
                .enumerate()
                .map(|(i, keep)| {
                    if *keep {
                        HitOutcome::Accepted(lead(&format!("Company {i}")))
                    } else {
                        HitOutcome::Irrelevant
                    }
                })
                .collect();

            let expected: Vec<String> = accepted
                .iter()
                .enumerate()
                .filter(|(_, keep)| **keep)
                .map(|(i, _)| format!("Company {i}"))
                .collect();

            let report = aggregate(Uuid::now_v7(), query(), outcomes, Utc::now());
            let names: Vec<String> = report.leads().iter().map(|l| l.company_name.clone()).collect();
            prop_assert_eq!(names, expected);
            prop_assert_eq!(report.total_considered(), accepted.len());
        }
    }
}
