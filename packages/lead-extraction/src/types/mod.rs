//! Data types flowing through the pipeline.

pub mod config;
pub mod hit;
pub mod query;
pub mod report;
pub mod verdict;
