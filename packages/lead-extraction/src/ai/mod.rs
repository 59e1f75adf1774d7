//! Language-model implementations of [`TextGenerator`](crate::traits::ai::TextGenerator).

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "openai")]
pub use openai::OpenAIGenerator;
