use serde::{Deserialize, Serialize};

pub const NO_TITLE: &str = "No title";
pub const NO_SNIPPET: &str = "No summary available";
pub const NO_LINK: &str = "No URL available";

/// One unprocessed search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHit {
    /// 1-based rank as delivered by the provider.
    pub position: usize,
    pub title: String,
    pub snippet: String,
    pub link: String,
}

impl RawHit {
    /// Build a hit from optional upstream fields, filling placeholders for
    /// anything missing or blank.
    pub fn new(
        position: usize,
        title: Option<String>,
        snippet: Option<String>,
        link: Option<String>,
    ) -> Self {
        Self {
            position,
            title: or_placeholder(title, NO_TITLE),
            snippet: or_placeholder(snippet, NO_SNIPPET),
            link: or_placeholder(link, NO_LINK),
        }
    }
}

fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => placeholder.to_string(),
    }
}
