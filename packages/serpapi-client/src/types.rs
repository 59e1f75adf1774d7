use serde::{Deserialize, Serialize};

/// Query parameters for the `/search` endpoint.
///
/// The API key is attached by the client and never lives here, so these
/// params are safe to log.
#[derive(Debug, Clone, Serialize)]
pub struct SearchParams {
    pub engine: String,
    pub q: String,
    pub hl: String,
    pub gl: String,
    /// Google "tools" filter, e.g. `cdr:1,cd_min:01/01/2026,cd_max:03/01/2026`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbs: Option<String>,
    pub num: u32,
}

impl SearchParams {
    pub fn google(q: impl Into<String>) -> Self {
        Self {
            engine: "google".to_string(),
            q: q.into(),
            hl: "en".to_string(),
            gl: "us".to_string(),
            tbs: None,
            num: 10,
        }
    }

    pub fn language(mut self, hl: impl Into<String>) -> Self {
        self.hl = hl.into();
        self
    }

    pub fn country(mut self, gl: impl Into<String>) -> Self {
        self.gl = gl.into();
        self
    }

    pub fn time_filter(mut self, tbs: impl Into<String>) -> Self {
        self.tbs = Some(tbs.into());
        self
    }

    pub fn num(mut self, num: u32) -> Self {
        self.num = num;
        self
    }
}

/// Top-level search response. Only the fields we consume are modelled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,
    /// SerpAPI reports some failures in-band with a 200 status.
    pub error: Option<String>,
}

/// A single organic (non-ad) result.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganicResult {
    pub position: Option<u32>,
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub link: Option<String>,
    pub date: Option<String>,
    pub source: Option<String>,
}
