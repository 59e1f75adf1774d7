//! SerpAPI-backed web searcher.

use async_trait::async_trait;
use serpapi_client::{OrganicResult, SearchParams, SerpApiClient, SerpApiError};

use crate::error::{LeadError, Result};
use crate::security::SecretString;
use crate::traits::searcher::WebSearcher;
use crate::types::{config::SearchConfig, hit::RawHit, query::SearchQuery};

const API_KEY_VAR: &str = "SERPAPI_KEY";

/// Google search through SerpAPI. One request per call, never retried.
pub struct SerpApiSearcher {
    api_key: SecretString,
    client: SerpApiClient,
    config: SearchConfig,
}

impl SerpApiSearcher {
    pub fn new(api_key: SecretString, config: SearchConfig) -> Self {
        let client = SerpApiClient::new(api_key.expose()).with_base_url(&config.base_url);
        Self {
            api_key,
            client,
            config,
        }
    }

    fn params(&self, query: &SearchQuery) -> SearchParams {
        let mut params = SearchParams::google(query.text())
            .language(&self.config.language)
            .country(&self.config.country)
            .time_filter(query.time_filter())
            .num(self.config.num_results);
        params.engine = self.config.engine.clone();
        params
    }
}

#[async_trait]
impl WebSearcher for SerpApiSearcher {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawHit>> {
        if self.api_key.is_blank() {
            return Err(LeadError::authentication("search API key is missing", API_KEY_VAR));
        }

        let params = self.params(query);
        tracing::debug!(q = %params.q, tbs = ?params.tbs, "Querying SerpAPI");

        let response = self.client.search(&params).await.map_err(map_error)?;

        Ok(to_hits(response.organic_results, self.config.num_results as usize))
    }
}

/// Normalize provider results, preserving rank order.
fn to_hits(results: Vec<OrganicResult>, limit: usize) -> Vec<RawHit> {
    results
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, r)| RawHit::new(i + 1, r.title, r.snippet, r.link))
        .collect()
}

fn map_error(err: SerpApiError) -> LeadError {
    match err {
        SerpApiError::Unauthorized { status, message } => LeadError::authentication(
            format!("search provider rejected credentials (status {status}): {message}"),
            API_KEY_VAR,
        ),
        SerpApiError::Api { status, body, .. } => LeadError::Provider { status, body },
        SerpApiError::Network(e) | SerpApiError::Parse(e) => LeadError::Transport(e),
    }
}
