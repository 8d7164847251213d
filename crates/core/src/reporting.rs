//! Shared reporting helpers: date-range validation and label-count merging.
//!
//! The report and analytics builders both filter on an inclusive capture
//! date range and both produce per-label count summaries; the pure pieces
//! of that live here. Row fetching and assembly are in `pestops-db`.

use chrono::NaiveDate;

use crate::error::CoreError;

/// An inclusive calendar date range on photo capture dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::Validation(format!(
                "start_date {start} is after end_date {end}"
            )));
        }
        Ok(DateRange { start, end })
    }
}

/// Resolve an optional date-range filter from two optional bounds.
///
/// Both bounds absent means "no filter". Exactly one bound present is a
/// validation error rather than a silently ignored filter.
pub fn optional_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Option<DateRange>, CoreError> {
    match (start, end) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => DateRange::new(start, end).map(Some),
        _ => Err(CoreError::Validation(
            "start_date and end_date must be provided together".into(),
        )),
    }
}

/// Resolve a mandatory date range. Fails if either bound is absent.
pub fn require_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<DateRange, CoreError> {
    match (start, end) {
        (Some(start), Some(end)) => DateRange::new(start, end),
        _ => Err(CoreError::Validation(
            "start_date and end_date are required".into(),
        )),
    }
}

/// Merge `(label, count)` pairs by label, summing counts, and return them
/// sorted descending by total.
///
/// First occurrence of a label fixes its position before sorting; the sort
/// is stable, so tied totals keep first-seen order.
pub fn merge_label_counts(
    pairs: impl IntoIterator<Item = (String, i64)>,
) -> Vec<(String, i64)> {
    let mut merged: Vec<(String, i64)> = Vec::new();
    for (label, count) in pairs {
        match merged.iter_mut().find(|(l, _)| *l == label) {
            Some((_, total)) => *total += count,
            None => merged.push((label, count)),
        }
    }
    merged.sort_by(|a, b| b.1.cmp(&a.1));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    // -- Date ranges -------------------------------------------------------

    #[test]
    fn optional_range_absent_is_no_filter() {
        assert_eq!(optional_range(None, None).unwrap(), None);
    }

    #[test]
    fn optional_range_with_both_bounds() {
        let range = optional_range(Some(d("2026-01-01")), Some(d("2026-01-31")))
            .unwrap()
            .unwrap();
        assert_eq!(range.start, d("2026-01-01"));
        assert_eq!(range.end, d("2026-01-31"));
    }

    #[test]
    fn optional_range_with_one_bound_fails() {
        let err = optional_range(Some(d("2026-01-01")), None).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        let err = optional_range(None, Some(d("2026-01-31"))).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn require_range_missing_bound_fails() {
        let err = require_range(None, Some(d("2026-01-31"))).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        let err = require_range(None, None).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn inverted_range_fails() {
        let err = require_range(Some(d("2026-02-01")), Some(d("2026-01-01"))).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn single_day_range_is_valid() {
        let range = require_range(Some(d("2026-01-15")), Some(d("2026-01-15"))).unwrap();
        assert_eq!(range.start, range.end);
    }

    // -- Label merging -----------------------------------------------------

    #[test]
    fn merge_sums_repeated_labels() {
        let merged = merge_label_counts(vec![
            ("Cockroach".to_string(), 3),
            ("Ant".to_string(), 2),
            ("Cockroach".to_string(), 4),
        ]);
        assert_eq!(
            merged,
            vec![("Cockroach".to_string(), 7), ("Ant".to_string(), 2)]
        );
    }

    #[test]
    fn merge_sorts_descending_by_count() {
        let merged = merge_label_counts(vec![
            ("Ant".to_string(), 1),
            ("Termite".to_string(), 9),
            ("Wasp".to_string(), 5),
        ]);
        assert_eq!(
            merged,
            vec![
                ("Termite".to_string(), 9),
                ("Wasp".to_string(), 5),
                ("Ant".to_string(), 1),
            ]
        );
    }

    #[test]
    fn merge_keeps_first_seen_order_on_ties() {
        let merged = merge_label_counts(vec![
            ("Ant".to_string(), 12),
            ("Cockroach".to_string(), 12),
        ]);
        assert_eq!(
            merged,
            vec![("Ant".to_string(), 12), ("Cockroach".to_string(), 12)]
        );
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        assert!(merge_label_counts(Vec::new()).is_empty());
    }
}
