//! Query Builder: sector + optional window -> validated [`SearchQuery`].

use chrono::{Duration, NaiveDate};

use crate::error::{LeadError, Result};
use crate::types::query::{DateWindow, SearchQuery};

/// Build the search query for one run.
///
/// Missing window ends resolve as: `to` defaults to `today`, `from` defaults
/// to `to - lookback_days`. The resolved range must not be inverted. Pure,
/// no I/O, so callers can validate before touching the network.
pub fn build_query(
    sector: &str,
    window: &DateWindow,
    today: NaiveDate,
    lookback_days: i64,
) -> Result<SearchQuery> {
    let sector = sector.trim();
    if sector.is_empty() {
        return Err(LeadError::EmptySector);
    }

    let date_to = window.to.unwrap_or(today);
    let date_from = window
        .from
        .unwrap_or_else(|| date_to - Duration::days(lookback_days.max(0)));

    if date_from > date_to {
        return Err(LeadError::InvalidRange {
            from: date_from,
            to: date_to,
        });
    }

    Ok(SearchQuery::new(sector.to_string(), date_from, date_to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_window_is_sixty_days() {
        let today = date(2026, 10, 14);
        let query = build_query("Automobile", &DateWindow::recent(), today, 60).unwrap();
        assert_eq!(query.date_to(), today);
        assert_eq!(query.date_from(), date(2026, 8, 15));
    }

    #[test]
    fn test_explicit_window_kept() {
        let window = DateWindow::between(date(2026, 1, 1), date(2026, 2, 1));
        let query = build_query("Steel", &window, date(2026, 10, 14), 60).unwrap();
        assert_eq!(query.date_from(), date(2026, 1, 1));
        assert_eq!(query.date_to(), date(2026, 2, 1));
    }

    #[test]
    fn test_only_end_given_looks_back_from_end() {
        let window = DateWindow::recent().with_to(date(2026, 3, 1));
        let query = build_query("Steel", &window, date(2026, 10, 14), 60).unwrap();
        assert_eq!(query.date_from(), date(2025, 12, 31));
    }

    #[test]
    fn test_single_day_window_allowed() {
        let day = date(2026, 5, 5);
        let query = build_query("Steel", &DateWindow::between(day, day), day, 60).unwrap();
        assert_eq!(query.date_from(), query.date_to());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let window = DateWindow::between(date(2026, 3, 1), date(2026, 2, 1));
        let err = build_query("Steel", &window, date(2026, 10, 14), 60).unwrap_err();
        assert!(matches!(err, LeadError::InvalidRange { .. }));
    }

    #[test]
    fn test_start_after_today_rejected() {
        let window = DateWindow::recent().with_from(date(2026, 12, 1));
        let err = build_query("Steel", &window, date(2026, 10, 14), 60).unwrap_err();
        assert!(matches!(err, LeadError::InvalidRange { .. }));
    }

    #[test]
    fn test_blank_sector_rejected() {
        let err = build_query("   ", &DateWindow::recent(), date(2026, 10, 14), 60).unwrap_err();
        assert!(matches!(err, LeadError::EmptySector));
    }

    #[test]
    fn test_sector_trimmed() {
        let query = build_query("  Textiles ", &DateWindow::recent(), date(2026, 10, 14), 60).unwrap();
        assert_eq!(query.sector(), "Textiles");
        assert!(query.text().starts_with("Textiles company expansion"));
    }

    proptest! {
        #[test]
        fn prop_default_window_is_ordered(sector in "[A-Za-z][A-Za-z ]{0,30}", offset in 0i64..20_000, lookback in 0i64..400) {
            let today = date(1990, 1, 1) + Duration::days(offset);
            let query = build_query(&sector, &DateWindow::recent(), today, lookback).unwrap();
            prop_assert!(query.date_from() <= query.date_to());
        }

        #[test]
        fn prop_inverted_window_always_rejected(start in 1i64..10_000, gap in 1i64..1_000) {
            let base = date(2000, 1, 1);
            let from = base + Duration::days(start + gap);
            let to = base + Duration::days(start);
            let result = build_query("Steel", &DateWindow::between(from, to), base, 60);
            let is_invalid_range = matches!(result, Err(LeadError::InvalidRange { .. }));
            prop_assert!(is_invalid_range);
        }
    }
}
