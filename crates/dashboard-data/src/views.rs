//! Aggregate views feeding the dashboard charts.
//!
//! Each view is a [`ViewDef`] entry in [`VIEWS`]: grouping keys, a reduction
//! and the chart metadata the renderer needs. Adding a chart means adding an
//! entry, not a new type.

use std::collections::BTreeMap;

use dashboard_core::models::{SalesRecord, SalesTable};
use tracing::debug;

// ── Definitions ───────────────────────────────────────────────────────────────

/// A categorical dimension of a [`SalesRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Date,
    City,
    ProductLine,
    Payment,
}

impl GroupKey {
    /// Group value for `record`. Dates use `%Y-%m-%d` so they sort
    /// chronologically as strings.
    pub fn extract(&self, record: &SalesRecord) -> String {
        match self {
            GroupKey::Date => record.date.format("%Y-%m-%d").to_string(),
            GroupKey::City => record.city.clone(),
            GroupKey::ProductLine => record.product_line.clone(),
            GroupKey::Payment => record.payment.clone(),
        }
    }
}

/// Numeric field being reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Total,
    Rating,
}

impl Measure {
    fn of(&self, record: &SalesRecord) -> f64 {
        match self {
            Measure::Total => record.total,
            Measure::Rating => record.rating,
        }
    }
}

/// How the values of one group collapse into a single number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Sum(Measure),
    Mean(Measure),
}

impl Reduction {
    fn measure(&self) -> Measure {
        match self {
            Reduction::Sum(m) | Reduction::Mean(m) => *m,
        }
    }

    fn finish(&self, acc: &Accumulator) -> f64 {
        match self {
            Reduction::Sum(_) => acc.sum,
            // Groups only exist once a row was added, so count >= 1.
            Reduction::Mean(_) => acc.sum / acc.count as f64,
        }
    }
}

/// Chart shape the renderer should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Time series, one bar per key stacked by subkey.
    StackedBar,
    /// Horizontal bars per key, grouped by subkey.
    HorizontalGroupedBar,
    /// One vertical bar per key.
    Bar,
    /// Share of the whole per key.
    Pie,
}

/// Stable identifier for each of the dashboard's views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    RevenueByDay,
    RevenueByProductLine,
    RevenueByCity,
    RevenueByPayment,
    RatingByCity,
}

/// One entry of the view table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewDef {
    pub id: ViewId,
    /// Chart title.
    pub title: &'static str,
    /// Primary key first, optional subkey (series) second.
    pub group_by: &'static [GroupKey],
    pub reduction: Reduction,
    pub chart: ChartKind,
    /// Axis label for the grouping key.
    pub key_label: &'static str,
    /// Axis label for the reduced value.
    pub value_label: &'static str,
}

pub const REVENUE_BY_DAY: ViewDef = ViewDef {
    id: ViewId::RevenueByDay,
    title: "Faturamento por dia",
    group_by: &[GroupKey::Date, GroupKey::City],
    reduction: Reduction::Sum(Measure::Total),
    chart: ChartKind::StackedBar,
    key_label: "Data",
    value_label: "Faturamento",
};

pub const REVENUE_BY_PRODUCT_LINE: ViewDef = ViewDef {
    id: ViewId::RevenueByProductLine,
    title: "Faturamento por linha de produto",
    group_by: &[GroupKey::ProductLine, GroupKey::City],
    reduction: Reduction::Sum(Measure::Total),
    chart: ChartKind::HorizontalGroupedBar,
    key_label: "Linha de Produto",
    value_label: "Faturamento",
};

pub const REVENUE_BY_CITY: ViewDef = ViewDef {
    id: ViewId::RevenueByCity,
    title: "Faturamento por filial",
    group_by: &[GroupKey::City],
    reduction: Reduction::Sum(Measure::Total),
    chart: ChartKind::Bar,
    key_label: "Filial",
    value_label: "Faturamento",
};

pub const REVENUE_BY_PAYMENT: ViewDef = ViewDef {
    id: ViewId::RevenueByPayment,
    title: "Faturamento por forma de pagamento",
    group_by: &[GroupKey::Payment],
    reduction: Reduction::Sum(Measure::Total),
    chart: ChartKind::Pie,
    key_label: "Forma de Pagamento",
    value_label: "Faturamento",
};

pub const RATING_BY_CITY: ViewDef = ViewDef {
    id: ViewId::RatingByCity,
    title: "Avaliação média por filial",
    group_by: &[GroupKey::City],
    reduction: Reduction::Mean(Measure::Rating),
    chart: ChartKind::Bar,
    key_label: "Filial",
    value_label: "Avaliação Média",
};

/// Every view the dashboard renders, in layout order.
pub const VIEWS: [ViewDef; 5] = [
    REVENUE_BY_DAY,
    REVENUE_BY_PRODUCT_LINE,
    REVENUE_BY_CITY,
    REVENUE_BY_PAYMENT,
    RATING_BY_CITY,
];

// ── Results ───────────────────────────────────────────────────────────────────

/// One output row: `(key, subkey, value)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub key: String,
    pub subkey: Option<String>,
    pub value: f64,
}

/// A computed view, rows ordered by `(key, subkey)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateView {
    pub def: ViewDef,
    pub rows: Vec<AggregateRow>,
}

impl AggregateView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of every row value.
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.value).sum()
    }

    /// Largest row value, `None` when empty.
    pub fn max_value(&self) -> Option<f64> {
        self.rows.iter().map(|r| r.value).reduce(f64::max)
    }

    /// Distinct primary keys in output order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for row in &self.rows {
            if keys.last() != Some(&row.key.as_str()) {
                keys.push(&row.key);
            }
        }
        keys
    }

    /// Rows belonging to `key`.
    pub fn rows_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a AggregateRow> + 'a {
        self.rows.iter().filter(move |r| r.key == key)
    }

    /// Value for `key` (and `subkey`, for two-level views).
    pub fn value_of(&self, key: &str, subkey: Option<&str>) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.key == key && r.subkey.as_deref() == subkey)
            .map(|r| r.value)
    }
}

// ── Aggregation ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Accumulator {
    sum: f64,
    count: u32,
}

impl Accumulator {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }
}

impl ViewDef {
    /// Reduce `table` according to this definition.
    pub fn compute(&self, table: &SalesTable) -> AggregateView {
        let Some((primary, rest)) = self.group_by.split_first() else {
            return AggregateView {
                def: *self,
                rows: Vec::new(),
            };
        };
        let secondary = rest.first();
        let measure = self.reduction.measure();

        let mut groups: BTreeMap<(String, Option<String>), Accumulator> = BTreeMap::new();
        for record in table {
            let key = primary.extract(record);
            let subkey = secondary.map(|k| k.extract(record));
            groups.entry((key, subkey)).or_default().add(measure.of(record));
        }

        let rows: Vec<AggregateRow> = groups
            .into_iter()
            .map(|((key, subkey), acc)| AggregateRow {
                key,
                subkey,
                value: self.reduction.finish(&acc),
            })
            .collect();

        debug!(view = ?self.id, input_rows = table.len(), groups = rows.len(), "view computed");

        AggregateView { def: *self, rows }
    }
}

/// Compute every entry of [`VIEWS`] over `table`.
pub fn compute_all(table: &SalesTable) -> Vec<AggregateView> {
    VIEWS.iter().map(|def| def.compute(table)).collect()
}

/// Revenue per `(day, city)`.
pub fn revenue_by_day(table: &SalesTable) -> AggregateView {
    REVENUE_BY_DAY.compute(table)
}

/// Revenue per `(product line, city)`.
pub fn revenue_by_product_line(table: &SalesTable) -> AggregateView {
    REVENUE_BY_PRODUCT_LINE.compute(table)
}

/// Revenue per city.
pub fn revenue_by_city(table: &SalesTable) -> AggregateView {
    REVENUE_BY_CITY.compute(table)
}

/// Revenue per payment method.
pub fn revenue_by_payment(table: &SalesTable) -> AggregateView {
    REVENUE_BY_PAYMENT.compute(table)
}

/// Mean customer rating per city.
pub fn rating_by_city(table: &SalesTable) -> AggregateView {
    RATING_BY_CITY.compute(table)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
