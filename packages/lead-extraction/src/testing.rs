//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the lead pipeline
//! without making real search or LLM calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, RwLock};

use crate::error::{LeadError, Result};
use crate::traits::{
    ai::{AiError, TextGenerator},
    searcher::WebSearcher,
};
use crate::types::{hit::RawHit, query::SearchQuery};

type ErrorFactory = Arc<dyn Fn() -> LeadError + Send + Sync>;

/// Mock web searcher for testing.
///
/// Returns the same canned hits (or the same failure) for every query and
/// records each query text it receives.
#[derive(Default)]
pub struct MockWebSearcher {
    hits: Vec<RawHit>,
    failure: Option<ErrorFactory>,
    queries: RwLock<Vec<String>>,
}

impl MockWebSearcher {
    /// Create a new mock searcher that finds nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return these hits for every query.
    pub fn with_hits(mut self, hits: Vec<RawHit>) -> Self {
        self.hits = hits;
        self
    }

    /// Add one hit, positioned after the existing ones.
    pub fn with_hit(mut self, title: &str, snippet: &str, link: &str) -> Self {
        let position = self.hits.len() + 1;
        self.hits.push(RawHit::new(
            position,
            Some(title.to_string()),
            Some(snippet.to_string()),
            Some(link.to_string()),
        ));
        self
    }

    /// Fail every search with the error built by `make`.
    pub fn with_error(mut self, make: impl Fn() -> LeadError + Send + Sync + 'static) -> Self {
        self.failure = Some(Arc::new(make));
        self
    }

    /// Fail every search as a 401 from the provider would.
    pub fn unauthorized() -> Self {
        Self::new().with_error(|| {
            LeadError::authentication(
                "search provider rejected credentials (status 401)",
                "SERPAPI_KEY",
            )
        })
    }

    /// Number of searches performed.
    pub fn call_count(&self) -> usize {
        self.queries.read().unwrap().len()
    }

    /// Query texts received, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.read().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawHit>> {
        self.queries.write().unwrap().push(query.text());

        match &self.failure {
            Some(make) => Err(make()),
            None => Ok(self.hits.clone()),
        }
    }
}

/// One scripted response from [`MockGenerator`].
#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    RateLimit,
    Unauthorized,
    Failure(String),
}

impl Scripted {
    fn into_result(self) -> std::result::Result<String, AiError> {
        match self {
            Scripted::Reply(text) => Ok(text),
            Scripted::RateLimit => Err(AiError::RateLimited("429 Too Many Requests".into())),
            Scripted::Unauthorized => Err(AiError::Unauthorized("401 Incorrect API key".into())),
            Scripted::Failure(message) => Err(AiError::Request(message)),
        }
    }
}

/// A mock text generator for testing.
///
/// Resolution order per call: the next scripted response, then the first
/// rule whose needle appears in the prompt, then the fallback. The default
/// fallback is the irrelevance marker.
pub struct MockGenerator {
    script: Mutex<VecDeque<Scripted>>,
    rules: Vec<(String, Scripted)>,
    fallback: Scripted,
    prompts: RwLock<Vec<String>>,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            rules: Vec::new(),
            fallback: Scripted::Reply(r#"{"result": "Irrelevant"}"#.to_string()),
            prompts: RwLock::new(Vec::new()),
        }
    }
}

impl MockGenerator {
    /// Create a new mock generator with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rate limit every call, forever.
    pub fn always_rate_limited() -> Self {
        Self {
            fallback: Scripted::RateLimit,
            ..Self::default()
        }
    }

    /// Queue a reply.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.push(Scripted::Reply(text.into()))
    }

    /// Queue a rate-limit rejection.
    pub fn with_rate_limit(self) -> Self {
        self.push(Scripted::RateLimit)
    }

    /// Queue a credential rejection.
    pub fn with_unauthorized(self) -> Self {
        self.push(Scripted::Unauthorized)
    }

    /// Queue a non-retryable failure.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(Scripted::Failure(message.into()))
    }

    /// Reply with `text` whenever the prompt contains `needle`.
    pub fn when_prompt_contains(
        mut self,
        needle: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.rules.push((needle.into(), Scripted::Reply(text.into())));
        self
    }

    /// Reply used once the script and rules are exhausted.
    pub fn with_fallback_reply(mut self, text: impl Into<String>) -> Self {
        self.fallback = Scripted::Reply(text.into());
        self
    }

    /// Number of generate calls made.
    pub fn call_count(&self) -> usize {
        self.prompts.read().unwrap().len()
    }

    /// Prompts received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }

    fn push(self, scripted: Scripted) -> Self {
        self.script.lock().unwrap().push_back(scripted);
        self
    }

    fn next_response(&self, prompt: &str) -> Scripted {
        if let Some(scripted) = self.script.lock().unwrap().pop_front() {
            return scripted;
        }
        self.rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, scripted)| scripted.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, AiError> {
        self.prompts.write().unwrap().push(prompt.to_string());
        self.next_response(prompt).into_result()
    }
}
