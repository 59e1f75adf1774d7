//! OpenAI implementation of the TextGenerator trait.
//!
//! Works against any OpenAI-compatible chat-completions endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use lead_extraction::ai::OpenAIGenerator;
//!
//! let generator = OpenAIGenerator::new(api_key).with_model("gpt-4o-mini");
//! let pipeline = LeadPipeline::new(searcher, generator, config);
//! ```

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient, OpenAIError};

use crate::security::SecretString;
use crate::traits::ai::{AiError, TextGenerator};
use crate::types::config::{ExtractionConfig, OutputFormat};

/// Chat-completions backed generator.
#[derive(Clone)]
pub struct OpenAIGenerator {
    client: OpenAIClient,
    model: String,
    temperature: f32,
    json_mode: bool,
}

impl OpenAIGenerator {
    /// Create a new generator with the given API key.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            client: OpenAIClient::new(api_key.expose()),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            json_mode: false,
        }
    }

    /// Take model, temperature and reply format from the extraction config.
    pub fn from_config(api_key: SecretString, config: &ExtractionConfig) -> Self {
        Self::new(api_key)
            .with_model(&config.model)
            .with_temperature(config.temperature)
            .with_json_mode(config.output_format == OutputFormat::Json)
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Ask the API to guarantee a JSON object reply.
    pub fn with_json_mode(mut self, enabled: bool) -> Self {
        self.json_mode = enabled;
        self
    }

    /// Set a custom base URL (for Azure, proxies, compatible providers, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OpenAIGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let mut request = ChatRequest::new(&self.model)
            .message(Message::user(prompt))
            .temperature(self.temperature);
        if self.json_mode {
            request = request.json_mode();
        }

        let response = self.client.chat_completion(request).await.map_err(to_ai_error)?;
        Ok(response.content)
    }
}

/// Status first, then message text for providers that bury 429s in prose.
fn to_ai_error(err: OpenAIError) -> AiError {
    if err.is_rate_limited() {
        AiError::RateLimited(err.to_string())
    } else if err.is_unauthorized() {
        AiError::Unauthorized(err.to_string())
    } else {
        AiError::from_message(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = ExtractionConfig::new().with_model("gpt-4o");
        let generator = OpenAIGenerator::from_config(SecretString::new("sk-test"), &config);
        assert_eq!(generator.model(), "gpt-4o");
        assert!(generator.json_mode);

        let config = config.with_output_format(OutputFormat::PipeDelimited);
        let generator = OpenAIGenerator::from_config(SecretString::new("sk-test"), &config);
        assert!(!generator.json_mode);
    }

    #[test]
    fn test_error_classification() {
        let limited = to_ai_error(OpenAIError::RateLimited {
            message: "slow down".into(),
        });
        assert!(limited.is_rate_limited());

        let quota = to_ai_error(OpenAIError::Api {
            status: 400,
            message: "You exceeded your current quota".into(),
        });
        assert!(quota.is_rate_limited());

        let rejected = to_ai_error(OpenAIError::Unauthorized {
            status: 401,
            message: "Incorrect API key provided".into(),
        });
        assert!(rejected.is_unauthorized());
        assert!(!rejected.is_rate_limited());

        let blank = to_ai_error(OpenAIError::Config("OpenAI API key is empty".into()));
        assert!(blank.is_unauthorized());

        let other = to_ai_error(OpenAIError::Api {
            status: 400,
            message: "bad request".into(),
        });
        assert!(!other.is_rate_limited());
    }
}
