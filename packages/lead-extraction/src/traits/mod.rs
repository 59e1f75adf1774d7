//! Core trait abstractions for the lead pipeline.
//!
//! The pipeline talks to the outside world only through these two seams.

pub mod ai;
pub mod searcher;
