//! Investment Lead Extraction Library
//!
//! Turns an industry sector into a list of companies that recently announced
//! investment or expansion plans, with a one-line summary and a source link
//! for each.
//!
//! The flow is a straight line:
//!
//! 1. [`pipeline::build_query`] turns a sector and optional date window into
//!    a validated [`SearchQuery`].
//! 2. A [`WebSearcher`] runs that query once and returns ranked [`RawHit`]s.
//! 3. A [`RelevanceExtractor`] asks a [`TextGenerator`] about each hit, one at
//!    a time, retrying rate-limited calls with exponential backoff.
//! 4. A [`LeadAggregator`] folds per-hit outcomes into a [`LeadReport`],
//!    which can be exported to CSV.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lead_extraction::{DateWindow, LeadPipeline, PipelineConfig};
//! use lead_extraction::testing::{MockGenerator, MockWebSearcher};
//!
//! let searcher = MockWebSearcher::new().with_hit("Acme to build plant", "...", "https://news.example/acme");
//! let generator = MockGenerator::new();
//! let pipeline = LeadPipeline::new(searcher, generator, PipelineConfig::default());
//!
//! let report = pipeline.run("Automobile", DateWindow::recent()).await?;
//! report.write_csv(std::path::Path::new("."))?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - The search and text-generation seams
//! - [`types`] - Queries, hits, verdicts, reports and configuration
//! - [`pipeline`] - Query building, extraction, pacing and aggregation
//! - [`export`] - CSV rendering of a report
//! - [`searchers`] - Search provider implementations (SerpApiSearcher)
//! - [`ai`] - Language-model implementations (OpenAIGenerator)
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod export;
pub mod pipeline;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "serpapi")]
pub mod searchers;

#[cfg(feature = "openai")]
pub mod ai;

// Re-export core types at crate root
pub use error::{ExtractionError, LeadError, Result};
pub use export::{read_csv, CSV_HEADER};
pub use pipeline::{aggregate, build_query, LeadAggregator, LeadPipeline, RelevanceExtractor};
pub use security::{Credentials, SecretString};
pub use traits::{
    ai::{AiError, TextGenerator},
    searcher::WebSearcher,
};
pub use types::{
    config::{ExtractionConfig, OutputFormat, PipelineConfig, RetryPolicy, SearchConfig},
    hit::RawHit,
    query::{DateWindow, SearchQuery},
    report::{DroppedCounts, LeadReport},
    verdict::{ExtractionVerdict, HitOutcome, Lead},
};

#[cfg(feature = "openai")]
pub use ai::OpenAIGenerator;

#[cfg(feature = "serpapi")]
pub use searchers::SerpApiSearcher;
