//! Sales file loading for the dashboard.
//!
//! Reads the `;`-separated supermarket sales export, normalises dates and
//! European-formatted decimals, and produces a date-ordered [`SalesTable`].
//! Loading is all-or-nothing: the first bad row aborts the whole load.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use csv::StringRecord;
use dashboard_core::data_processors::{DateParser, DecimalParser};
use dashboard_core::models::{SalesRecord, SalesTable};
use dashboard_core::{DashboardError, Result};
use tracing::{debug, info, warn};

/// Column names the loader needs, as they appear in the header row.
pub const REQUIRED_COLUMNS: [&str; 6] = ["Date", "City", "Product line", "Payment", "Total", "Rating"];

/// Ratings outside this range are kept but logged.
const RATING_RANGE: std::ops::RangeInclusive<f64> = 0.0..=10.0;

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and normalise the sales file at `path`.
pub fn load_sales_table(path: &Path) -> Result<SalesTable> {
    let started = Instant::now();
    let file = File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let table = parse_sales_table(file)?;

    info!(
        path = %path.display(),
        rows = table.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "sales table loaded"
    );
    Ok(table)
}

/// Parse sales rows from any reader holding the `;`-separated format.
pub fn parse_sales_table<R: Read>(input: R) -> Result<SalesTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers().map_err(csv_error)?.clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(csv_error)?;
        // Header is line 1.
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 2);
        records.push(parse_row(&record, &columns, line)?);
    }

    debug!(rows = records.len(), "sales rows parsed");
    Ok(SalesTable::new(records))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Positions of the required columns within a row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    city: usize,
    product_line: usize,
    payment: usize,
    total: usize,
    rating: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let map: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (normalize_header_name(name), idx))
            .collect();

        let find = |name: &str| {
            map.get(&normalize_header_name(name))
                .copied()
                .ok_or_else(|| DashboardError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            date: find("Date")?,
            city: find("City")?,
            product_line: find("Product line")?,
            payment: find("Payment")?,
            total: find("Total")?,
            rating: find("Rating")?,
        })
    }
}

/// Lower-case and strip the UTF-8 BOM some spreadsheet exports prepend.
fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_lowercase()
}

fn parse_row(record: &StringRecord, columns: &ColumnIndex, line: u64) -> Result<SalesRecord> {
    let raw_date = record.get(columns.date).unwrap_or("");
    let date = DateParser::parse(raw_date).ok_or_else(|| DashboardError::DateParse {
        line,
        value: raw_date.to_string(),
    })?;

    let city = required_text(record, columns.city, "City", line)?;
    let product_line = required_text(record, columns.product_line, "Product line", line)?;
    let payment = required_text(record, columns.payment, "Payment", line)?;
    let total = required_number(record, columns.total, "Total", line)?;
    let rating = required_number(record, columns.rating, "Rating", line)?;

    if !RATING_RANGE.contains(&rating) {
        warn!(line, rating, "rating outside the 0-10 range");
    }

    Ok(SalesRecord::new(date, city, product_line, payment, total, rating))
}

fn required_text(record: &StringRecord, idx: usize, column: &str, line: u64) -> Result<String> {
    match record.get(idx) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(DashboardError::EmptyField {
            line,
            column: column.to_string(),
        }),
    }
}

fn required_number(record: &StringRecord, idx: usize, column: &str, line: u64) -> Result<f64> {
    let raw = record.get(idx).unwrap_or("");
    DecimalParser::parse(raw).ok_or_else(|| DashboardError::NumberParse {
        line,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

fn csv_error(e: csv::Error) -> DashboardError {
    let line = e.position().map(|p| p.line()).unwrap_or(0);
    DashboardError::Csv {
        line,
        message: e.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    const HEADER: &str = "Invoice ID;Branch;City;Customer type;Gender;Product line;Unit price;Quantity;Tax 5%;Total;Date;Time;Payment;cogs;gross margin percentage;gross income;Rating";

    fn row(date: &str, city: &str, product: &str, total: &str, payment: &str, rating: &str) -> String {
        format!("750-67-8428;A;{city};Member;Female;{product};74,69;7;26,1415;{total};{date};13:08;{payment};522,83;4,761904762;26,1415;{rating}")
    }

    fn scenario_csv() -> String {
        [
            HEADER.to_string(),
            row("01/12/2019", "CityA", "Health and beauty", "50,25", "Ewallet", "9,1"),
            row("01/05/2019", "CityA", "Health and beauty", "100,50", "Cash", "7,4"),
            row("02/01/2019", "CityB", "Sports and travel", "75,00", "Credit card", "8,0"),
        ]
        .join("\n")
    }

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write");
        file
    }

    // ── parse_sales_table ─────────────────────────────────────────────────────

    #[test]
    fn test_parse_scenario_rows() {
        let table = parse_sales_table(scenario_csv().as_bytes()).unwrap();
        assert_eq!(table.len(), 3);

        let first = &table.records()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2019, 1, 5).unwrap());
        assert_eq!(first.city, "CityA");
        assert_eq!(first.payment, "Cash");
        assert!((first.total - 100.50).abs() < 1e-9);
        assert!((first.rating - 7.4).abs() < 1e-9);
        assert_eq!(first.month(), "2019-01");
    }

    #[test]
    fn test_parse_sorts_by_date() {
        let table = parse_sales_table(scenario_csv().as_bytes()).unwrap();
        assert!(table.records().windows(2).all(|w| w[0].date <= w[1].date));
        let months: Vec<&str> = table.iter().map(|r| r.month()).collect();
        assert_eq!(months, vec!["2019-01", "2019-01", "2019-02"]);
    }

    #[test]
    fn test_parse_sort_is_stable_for_equal_dates() {
        let csv = [
            HEADER.to_string(),
            row("03/02/2019", "Third", "P", "1,00", "Cash", "5"),
            row("03/01/2019", "First", "P", "1,00", "Cash", "5"),
            row("03/02/2019", "Fourth", "P", "1,00", "Cash", "5"),
            row("03/01/2019", "Second", "P", "1,00", "Cash", "5"),
        ]
        .join("\n");
        let table = parse_sales_table(csv.as_bytes()).unwrap();
        let cities: Vec<&str> = table.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, vec!["First", "Second", "Third", "Fourth"]);
    }

    #[test]
    fn test_parse_european_grouped_decimal() {
        let csv = [HEADER.to_string(), row("01/05/2019", "A", "P", "1.234,56", "Cash", "7")].join("\n");
        let table = parse_sales_table(csv.as_bytes()).unwrap();
        assert!((table.records()[0].total - 1234.56).abs() < 1e-9);
    }

    #[test]
    fn test_parse_dot_grouping_consistent_within_file() {
        let csv = [
            HEADER.to_string(),
            row("01/05/2019", "A", "P", "1.234", "Cash", "5"),
            row("01/06/2019", "A", "P", "1.234,00", "Cash", "5"),
        ]
        .join("\n");
        let table = parse_sales_table(csv.as_bytes()).unwrap();
        let totals: Vec<f64> = table.iter().map(|r| r.total).collect();
        assert_eq!(totals, vec![1234.0, 1234.0]);
    }

    #[test]
    fn test_parse_dot_decimal_rejected() {
        let csv = [HEADER.to_string(), row("01/05/2019", "A", "P", "548.9715", "Cash", "5")].join("\n");
        let err = parse_sales_table(csv.as_bytes()).unwrap_err();
        assert!(
            matches!(err, DashboardError::NumberParse { line: 2, ref value, .. } if value == "548.9715"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_parse_month_key_matches_date() {
        let table = parse_sales_table(scenario_csv().as_bytes()).unwrap();
        for record in &table {
            assert_eq!(record.month(), dashboard_core::models::month_key(record.date));
        }
    }

    #[test]
    fn test_parse_minimal_column_set() {
        let csv = "Date;City;Product line;Payment;Total;Rating\n01/05/2019;Yangon;Food;Cash;10,5;6,1\n";
        let table = parse_sales_table(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].product_line, "Food");
    }

    #[test]
    fn test_parse_header_with_bom() {
        let csv = "\u{feff}Date;City;Product line;Payment;Total;Rating\n01/05/2019;Yangon;Food;Cash;10,5;6,1\n";
        let table = parse_sales_table(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_parse_header_only_yields_empty_table() {
        let table = parse_sales_table(HEADER.as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    // ── Failures ──────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_malformed_date_fails() {
        let csv = [
            HEADER.to_string(),
            row("01/05/2019", "A", "P", "1,00", "Cash", "5"),
            row("13/40/2019", "A", "P", "1,00", "Cash", "5"),
        ]
        .join("\n");
        let err = parse_sales_table(csv.as_bytes()).unwrap_err();
        match err {
            DashboardError::DateParse { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "13/40/2019");
            }
            other => panic!("expected DateParse, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_non_numeric_total_fails() {
        let csv = [HEADER.to_string(), row("01/05/2019", "A", "P", "abc", "Cash", "5")].join("\n");
        let err = parse_sales_table(csv.as_bytes()).unwrap_err();
        assert!(
            matches!(err, DashboardError::NumberParse { ref column, .. } if column == "Total"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_parse_non_numeric_rating_fails() {
        let csv = [HEADER.to_string(), row("01/05/2019", "A", "P", "1,00", "Cash", "n/a")].join("\n");
        let err = parse_sales_table(csv.as_bytes()).unwrap_err();
        assert!(
            matches!(err, DashboardError::NumberParse { ref column, .. } if column == "Rating"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_parse_missing_column_fails() {
        let csv = "Date;City;Product line;Payment;Total\n01/05/2019;A;P;Cash;1,00\n";
        let err = parse_sales_table(csv.as_bytes()).unwrap_err();
        assert!(
            matches!(err, DashboardError::MissingColumn(ref c) if c == "Rating"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_parse_empty_city_fails() {
        let csv = [HEADER.to_string(), row("01/05/2019", "", "P", "1,00", "Cash", "5")].join("\n");
        let err = parse_sales_table(csv.as_bytes()).unwrap_err();
        assert!(
            matches!(err, DashboardError::EmptyField { ref column, .. } if column == "City"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_parse_ragged_row_fails() {
        let csv = format!("{HEADER}\n01/05/2019;too;short\n");
        let err = parse_sales_table(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::Csv { .. }), "got {err:?}");
        assert!(err.line().is_some());
    }

    #[test]
    fn test_parse_empty_input_reports_missing_column() {
        let err = parse_sales_table("".as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn(_)), "got {err:?}");
    }

    // ── load_sales_table ──────────────────────────────────────────────────────

    #[test]
    fn test_load_from_file() {
        let file = write_temp(&scenario_csv());
        let table = load_sales_table(file.path()).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_sales_table(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::FileRead { .. }), "got {err:?}");
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_load_bundled_sample() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../data/supermarket_sales.csv");
        let table = load_sales_table(&path).unwrap();
        assert_eq!(table.len(), 37);
        assert_eq!(
            crate::filter::month_keys(&table),
            vec!["2019-01", "2019-02", "2019-03"]
        );
        assert!(table.iter().any(|r| (r.total - 1022.49).abs() < 1e-9));
    }
}
