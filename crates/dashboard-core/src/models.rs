use chrono::{Datelike, NaiveDate};

/// Format used for month keys, e.g. `"2019-03"`.
pub const MONTH_KEY_FORMAT: &str = "%Y-%m";

/// Truncate `date` to the first day of its month.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month, so this cannot fail.
    date.with_day(1).unwrap_or(date)
}

/// Derive the calendar month key (`"YYYY-MM"`) for `date`.
pub fn month_key(date: NaiveDate) -> String {
    first_of_month(date).format(MONTH_KEY_FORMAT).to_string()
}

/// One sale as loaded from the source file.
///
/// Built only through [`SalesRecord::new`], which derives the month key.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    /// Transaction date.
    pub date: NaiveDate,
    /// Branch city.
    pub city: String,
    /// Product line category.
    pub product_line: String,
    /// Payment method.
    pub payment: String,
    /// Total amount of the sale.
    pub total: f64,
    /// Customer rating, 0–10.
    pub rating: f64,
    month: String,
}

impl SalesRecord {
    /// Build a record, deriving the month key from `date`.
    pub fn new(
        date: NaiveDate,
        city: impl Into<String>,
        product_line: impl Into<String>,
        payment: impl Into<String>,
        total: f64,
        rating: f64,
    ) -> Self {
        Self {
            date,
            city: city.into(),
            product_line: product_line.into(),
            payment: payment.into(),
            total,
            rating,
            month: month_key(date),
        }
    }

    /// Derived `"YYYY-MM"` key; always `month_key(self.date)`.
    pub fn month(&self) -> &str {
        &self.month
    }
}

/// Immutable, date-ordered collection of [`SalesRecord`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
}

impl SalesTable {
    /// Build a table from arbitrary records.
    ///
    /// Records are stably sorted by date so rows sharing a date keep their
    /// input order.
    pub fn new(mut records: Vec<SalesRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    /// All records, sorted by date ascending.
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SalesRecord> {
        self.records.iter()
    }

    /// Sum of `total` over every record.
    pub fn total_revenue(&self) -> f64 {
        self.records.iter().map(|r| r.total).sum()
    }

    /// Distinct cities in order of first appearance.
    pub fn cities(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for record in &self.records {
            if !seen.iter().any(|c| c == &record.city) {
                seen.push(record.city.clone());
            }
        }
        seen
    }
}

impl<'a> IntoIterator for &'a SalesTable {
    type Item = &'a SalesRecord;
    type IntoIter = std::slice::Iter<'a, SalesRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
