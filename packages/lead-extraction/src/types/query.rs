//! Search query and time window.

use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Terms appended after the sector to bias results toward capital projects.
pub const BOOST_TERMS: &str = "company expansion investment new plant setup";

/// Terms always excluded from the query to suppress recruiting noise.
pub const EXCLUDED_TERMS: [&str; 3] = ["job", "career", "vacancy"];

/// Format the search provider expects inside its date filter.
const PROVIDER_DATE_FORMAT: &str = "%m/%d/%Y";

/// Optional operator-supplied date range. Either end may be left open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    /// No explicit range; the default lookback applies.
    pub fn recent() -> Self {
        Self::default()
    }

    /// Both ends explicit.
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn with_from(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_to(mut self, to: NaiveDate) -> Self {
        self.to = Some(to);
        self
    }
}

/// A validated search query. Only the query builder constructs one, so
/// `date_from <= date_to` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    sector: String,
    boost_terms: String,
    excluded_terms: IndexSet<String>,
    date_from: NaiveDate,
    date_to: NaiveDate,
}

impl SearchQuery {
    pub(crate) fn new(sector: String, date_from: NaiveDate, date_to: NaiveDate) -> Self {
        debug_assert!(date_from <= date_to);
        Self {
            sector,
            boost_terms: BOOST_TERMS.to_string(),
            excluded_terms: EXCLUDED_TERMS.iter().map(|t| t.to_string()).collect(),
            date_from,
            date_to,
        }
    }

    pub fn sector(&self) -> &str {
        &self.sector
    }

    pub fn excluded_terms(&self) -> &IndexSet<String> {
        &self.excluded_terms
    }

    pub fn date_from(&self) -> NaiveDate {
        self.date_from
    }

    pub fn date_to(&self) -> NaiveDate {
        self.date_to
    }

    /// Full query text: sector, boost terms, then `-term` exclusions.
    pub fn text(&self) -> String {
        let mut text = format!("{} {}", self.sector, self.boost_terms);
        for term in &self.excluded_terms {
            text.push_str(" -");
            text.push_str(term);
        }
        text
    }

    /// Custom date range filter, e.g. `cdr:1,cd_min:08/15/2026,cd_max:10/14/2026`.
    pub fn time_filter(&self) -> String {
        format!(
            "cdr:1,cd_min:{},cd_max:{}",
            self.date_from.format(PROVIDER_DATE_FORMAT),
            self.date_to.format(PROVIDER_DATE_FORMAT)
        )
    }
}
