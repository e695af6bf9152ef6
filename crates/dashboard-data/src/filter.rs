//! Month filtering over a loaded [`SalesTable`].

use std::collections::BTreeSet;

use dashboard_core::models::SalesTable;
use tracing::debug;

/// Records whose month key equals `month` exactly.
///
/// The match is case-sensitive with no normalisation; an unknown month
/// yields an empty table rather than an error.
pub fn filter_by_month(table: &SalesTable, month: &str) -> SalesTable {
    let filtered = SalesTable::new(
        table
            .iter()
            .filter(|r| r.month() == month)
            .cloned()
            .collect(),
    );
    debug!(month, rows = filtered.len(), "month filter applied");
    filtered
}

/// Distinct month keys present in `table`, oldest first.
pub fn month_keys(table: &SalesTable) -> Vec<String> {
    table
        .iter()
        .map(|r| r.month().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::models::SalesRecord;

    fn record(m: u32, d: u32, city: &str, total: f64) -> SalesRecord {
        SalesRecord::new(
            NaiveDate::from_ymd_opt(2019, m, d).unwrap(),
            city,
            "Health and beauty",
            "Cash",
            total,
            7.0,
        )
    }

    fn table() -> SalesTable {
        SalesTable::new(vec![
            record(3, 2, "Yangon", 10.0),
            record(1, 5, "CityA", 100.50),
            record(1, 12, "CityA", 50.25),
            record(2, 1, "CityB", 75.00),
            record(3, 9, "Mandalay", 20.0),
        ])
    }

    #[test]
    fn test_month_keys_chronological_and_distinct() {
        assert_eq!(month_keys(&table()), vec!["2019-01", "2019-02", "2019-03"]);
    }

    #[test]
    fn test_month_keys_empty_table() {
        assert!(month_keys(&SalesTable::default()).is_empty());
    }

    #[test]
    fn test_filter_returns_only_matching_month() {
        let filtered = filter_by_month(&table(), "2019-01");
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.month() == "2019-01"));
    }

    #[test]
    fn test_filter_unknown_month_is_empty() {
        let filtered = filter_by_month(&table(), "2020-07");
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_is_exact_match() {
        assert!(filter_by_month(&table(), "2019-1").is_empty());
        assert!(filter_by_month(&table(), " 2019-01").is_empty());
        assert!(filter_by_month(&table(), "2019").is_empty());
    }

    #[test]
    fn test_filters_are_disjoint_and_reconstruct_table() {
        let full = table();
        let keys = month_keys(&full);

        let mut rebuilt = Vec::new();
        for (i, k1) in keys.iter().enumerate() {
            let part = filter_by_month(&full, k1);
            for k2 in keys.iter().skip(i + 1) {
                let other = filter_by_month(&full, k2);
                assert!(part.iter().all(|r| !other.records().contains(r)));
            }
            rebuilt.extend(part.records().iter().cloned());
        }

        assert_eq!(SalesTable::new(rebuilt), full);
    }

    #[test]
    fn test_filter_preserves_date_order() {
        let filtered = filter_by_month(&table(), "2019-03");
        let cities: Vec<&str> = filtered.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, vec!["Yangon", "Mandalay"]);
    }
}
