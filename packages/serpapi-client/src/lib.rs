//! Pure SerpAPI REST API client.
//!
//! A minimal client for SerpAPI's Google search endpoint. One call, one
//! request: no pagination and no retries. Callers decide what a failure means.
//!
//! # Example
//!
//! ```rust,ignore
//! use serpapi_client::{SerpApiClient, SearchParams};
//!
//! let client = SerpApiClient::new("your-api-key");
//!
//! let params = SearchParams::google("battery plant investment").country("in");
//! let response = client.search(&params).await?;
//! for result in &response.organic_results {
//!     println!("{}", result.title.as_deref().unwrap_or("(no title)"));
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Result, SerpApiError};
pub use types::{OrganicResult, SearchParams, SearchResponse};

const BASE_URL: &str = "https://serpapi.com";

/// In-band message SerpAPI returns with a 200 when Google found nothing.
const NO_RESULTS_MARKER: &str = "hasn't returned any results";

pub struct SerpApiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SerpApiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (proxies, local test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run one search. Exactly one HTTP round trip.
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResponse> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(q = %params.q, gl = %params.gl, num = params.num, "SerpAPI search");

        let resp = self
            .client
            .get(&url)
            .query(params)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| body.clone());
            tracing::warn!(status = %status, "SerpAPI error response");
            return Err(classify(status.as_u16(), message, body));
        }

        let mut response: SearchResponse = serde_json::from_str(&body)?;

        if let Some(message) = response.error.take() {
            if message.contains(NO_RESULTS_MARKER) {
                tracing::debug!("SerpAPI reported no results");
                response.organic_results.clear();
                return Ok(response);
            }
            return Err(classify(status.as_u16(), message, body));
        }

        Ok(response)
    }
}

/// Map a failed response to the matching error variant.
fn classify(status: u16, message: String, body: String) -> SerpApiError {
    let lowered = message.to_lowercase();
    if status == 401 || status == 403 || lowered.contains("invalid api key") {
        SerpApiError::Unauthorized { status, message }
    } else {
        SerpApiError::Api {
            status,
            message,
            body,
        }
    }
}

/// Extract the `error` field from a JSON error body, if there is one.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<SearchResponse>(body)
        .ok()
        .and_then(|r| r.error)
}
