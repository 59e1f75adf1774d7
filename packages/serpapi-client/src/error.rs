use thiserror::Error;

pub type Result<T> = std::result::Result<T, SerpApiError>;

#[derive(Debug, Error)]
pub enum SerpApiError {
    #[error("Network error: {0}")]
    Network(String),

    /// The API key was missing, invalid or revoked.
    #[error("Unauthorized (status {status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// Any other failure the server reported. `body` is the raw response.
    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        body: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl SerpApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            SerpApiError::Unauthorized { status, .. } | SerpApiError::Api { status, .. } => {
                Some(*status)
            }
            SerpApiError::Network(_) | SerpApiError::Parse(_) => None,
        }
    }
}

impl From<reqwest::Error> for SerpApiError {
    fn from(err: reqwest::Error) -> Self {
        SerpApiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SerpApiError {
    fn from(err: serde_json::Error) -> Self {
        SerpApiError::Parse(err.to_string())
    }
}
