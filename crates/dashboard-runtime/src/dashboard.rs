//! Month selection and per-month snapshots.
//!
//! [`Dashboard`] owns the shared table and the list of month keys, tracks the
//! selected month and recomputes a [`DashboardSnapshot`] whenever the
//! selection changes. The UI only ever reads the current snapshot.

use std::sync::Arc;

use dashboard_core::models::SalesTable;
use dashboard_data::filter::{filter_by_month, month_keys};
use dashboard_data::views::{compute_all, AggregateView, ViewId};

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything the presentation layer needs for one selected month.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    /// Selected month key, `None` when the table has no rows at all.
    pub month: Option<String>,
    /// Rows in the selected month.
    pub rows: usize,
    /// Revenue of the selected month.
    pub revenue: f64,
    /// Aggregate views in layout order.
    pub views: Vec<AggregateView>,
}

impl DashboardSnapshot {
    fn build(table: &SalesTable, month: Option<&str>) -> Self {
        let filtered = match month {
            Some(m) => filter_by_month(table, m),
            None => SalesTable::default(),
        };
        Self {
            month: month.map(str::to_string),
            rows: filtered.len(),
            revenue: filtered.total_revenue(),
            views: compute_all(&filtered),
        }
    }

    /// View with the given id.
    pub fn view(&self, id: ViewId) -> Option<&AggregateView> {
        self.views.iter().find(|v| v.def.id == id)
    }
}

// ── Dashboard ─────────────────────────────────────────────────────────────────

/// Selection state over a loaded table.
#[derive(Debug)]
pub struct Dashboard {
    table: Arc<SalesTable>,
    months: Vec<String>,
    selected: usize,
    snapshot: DashboardSnapshot,
}

impl Dashboard {
    /// Build a dashboard starting at `initial` when present in the table,
    /// otherwise at the earliest month.
    pub fn new(table: Arc<SalesTable>, initial: Option<&str>) -> Self {
        let months = month_keys(&table);
        let selected = match initial {
            Some(requested) => months.iter().position(|m| m == requested).unwrap_or_else(|| {
                tracing::warn!(
                    requested,
                    fallback = months.first().map(String::as_str).unwrap_or(""),
                    "requested month not in dataset; using first month"
                );
                0
            }),
            None => 0,
        };
        let snapshot = DashboardSnapshot::build(&table, months.get(selected).map(String::as_str));

        tracing::info!(
            rows = table.len(),
            months = months.len(),
            selected = snapshot.month.as_deref().unwrap_or(""),
            "dashboard initialised"
        );

        Self {
            table,
            months,
            selected,
            snapshot,
        }
    }

    /// All month keys, oldest first.
    pub fn months(&self) -> &[String] {
        &self.months
    }

    /// Currently selected month key.
    pub fn selected_month(&self) -> Option<&str> {
        self.months.get(self.selected).map(String::as_str)
    }

    /// Position of the selected month in [`Dashboard::months`].
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn table(&self) -> &SalesTable {
        &self.table
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    // ── Selection ─────────────────────────────────────────────────────────

    /// Select `month`. Returns `false` and leaves the selection unchanged
    /// when the key is unknown.
    pub fn select_month(&mut self, month: &str) -> bool {
        match self.months.iter().position(|m| m == month) {
            Some(idx) => {
                self.select_index(idx);
                true
            }
            None => {
                tracing::debug!(month, "ignoring unknown month");
                false
            }
        }
    }

    /// Move to the following month; stays put on the last one.
    pub fn next_month(&mut self) -> bool {
        if self.selected + 1 < self.months.len() {
            self.select_index(self.selected + 1);
            true
        } else {
            false
        }
    }

    /// Move to the preceding month; stays put on the first one.
    pub fn prev_month(&mut self) -> bool {
        if self.selected > 0 {
            self.select_index(self.selected - 1);
            true
        } else {
            false
        }
    }

    pub fn first_month(&mut self) -> bool {
        if self.selected != 0 && !self.months.is_empty() {
            self.select_index(0);
            true
        } else {
            false
        }
    }

    pub fn last_month(&mut self) -> bool {
        match self.months.len().checked_sub(1) {
            Some(last) if last != self.selected => {
                self.select_index(last);
                true
            }
            _ => false,
        }
    }

    fn select_index(&mut self, idx: usize) {
        self.selected = idx;
        self.snapshot = DashboardSnapshot::build(&self.table, self.selected_month());
        tracing::debug!(
            month = self.snapshot.month.as_deref().unwrap_or(""),
            rows = self.snapshot.rows,
            "month selected"
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
