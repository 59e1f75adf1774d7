//! Search Gateway implementations.

#[cfg(feature = "serpapi")]
pub mod serpapi;

#[cfg(feature = "serpapi")]
pub use serpapi::SerpApiSearcher;
