//! The lead pipeline: query -> search -> per-hit extraction -> report.
//!
//! Hits are processed one at a time in provider order, so at most one model
//! call is ever in flight. Run-level failures (bad input, search errors)
//! return before the first model call; per-hit failures only shrink the
//! report. A rejected model key is the one extraction failure that ends the
//! run.

pub mod aggregate;
pub mod extract;
pub mod pacing;
pub mod parse;
pub mod prompts;
pub mod query;

pub use aggregate::{aggregate, LeadAggregator};
pub use extract::RelevanceExtractor;
pub use pacing::Pacer;
pub use parse::{parse_verdict, strip_code_fences};
pub use prompts::format_extraction_prompt;
pub use query::build_query;

use chrono::{NaiveDate, Utc};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::error::Result;
use crate::traits::{ai::TextGenerator, searcher::WebSearcher};
use crate::types::{
    config::PipelineConfig,
    query::{DateWindow, SearchQuery},
    report::LeadReport,
};

/// Wires a searcher and a generator into one runnable pipeline.
///
/// Holds no per-run state; every [`run`](Self::run) builds its own query,
/// pacer and aggregator.
pub struct LeadPipeline<S: WebSearcher, G: TextGenerator> {
    searcher: S,
    extractor: RelevanceExtractor<G>,
    config: PipelineConfig,
}

impl<S: WebSearcher, G: TextGenerator> LeadPipeline<S, G> {
    pub fn new(searcher: S, generator: G, config: PipelineConfig) -> Self {
        let extractor = RelevanceExtractor::new(generator, &config.extraction);
        Self {
            searcher,
            extractor,
            config,
        }
    }

    pub fn searcher(&self) -> &S {
        &self.searcher
    }

    pub fn generator(&self) -> &G {
        self.extractor.generator()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline for `sector`, using today's date for open windows.
    pub async fn run(&self, sector: &str, window: DateWindow) -> Result<LeadReport> {
        self.run_as_of(sector, window, Utc::now().date_naive()).await
    }

    /// Run with an explicit "today". Useful for reproducible windows.
    pub async fn run_as_of(
        &self,
        sector: &str,
        window: DateWindow,
        today: NaiveDate,
    ) -> Result<LeadReport> {
        let query = build_query(sector, &window, today, self.config.search.lookback_days)?;
        let run_id = Uuid::now_v7();

        let span = info_span!("lead_run", %run_id, sector = %query.sector());
        self.execute(run_id, query).instrument(span).await
    }

    async fn execute(&self, run_id: Uuid, query: SearchQuery) -> Result<LeadReport> {
        info!(
            date_from = %query.date_from(),
            date_to = %query.date_to(),
            "Starting lead search"
        );

        let hits = self.searcher.search(&query).await?;
        info!(hits = hits.len(), "Search returned hits");

        let pacer = Pacer::new(self.config.extraction.pacing_delay());
        let mut aggregator = LeadAggregator::new(run_id, query.clone());

        for hit in &hits {
            pacer.wait().await;
            let outcome = self.extractor.classify(hit, query.sector()).await?;
            aggregator.record(outcome);
        }

        let report = aggregator.finish(Utc::now());
        info!(
            total_considered = report.total_considered(),
            total_accepted = report.total_accepted(),
            irrelevant = report.dropped().irrelevant,
            parse_failed = report.dropped().parse_failed,
            exhausted = report.dropped().exhausted,
            failed = report.dropped().failed,
            "Lead search finished"
        );

        Ok(report)
    }
}
