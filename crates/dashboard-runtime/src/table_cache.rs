//! Single-slot, path-keyed cache for the loaded sales table.
//!
//! Callers use [`TableCache::get_or_load`] to obtain the parsed
//! [`SalesTable`] for a path; the file is read at most once per path until
//! the cache is invalidated or a different path is requested.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashboard_core::models::SalesTable;
use dashboard_core::Result;
use dashboard_data::reader::load_sales_table;

// ── Entry ─────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct CacheEntry {
    path: PathBuf,
    table: Arc<SalesTable>,
    loaded_at: Instant,
}

// ── TableCache ────────────────────────────────────────────────────────────────

/// Memoised loader holding the most recently loaded table.
///
/// Tables are handed out as `Arc` so repeated calls for the same path return
/// the very same allocation. Failed loads are never cached and leave any
/// previous entry in place.
///
/// # Example
/// ```no_run
/// use dashboard_runtime::table_cache::TableCache;
/// use std::path::Path;
///
/// let mut cache = TableCache::new();
/// let table = cache.get_or_load(Path::new("data/supermarket_sales.csv"))?;
/// println!("rows: {}", table.len());
/// # Ok::<(), dashboard_core::DashboardError>(())
/// ```
#[derive(Debug, Default)]
pub struct TableCache {
    entry: Option<CacheEntry>,
    /// Successful loads from disk since construction.
    loads: u64,
    last_error: Option<String>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the table for `path`, reading the file only on a cache miss.
    ///
    /// The key is the path exactly as given; `./a.csv` and `a.csv` are
    /// distinct entries.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<SalesTable>> {
        if let Some(entry) = &self.entry {
            if entry.path == path {
                tracing::debug!(path = %path.display(), "table cache hit");
                return Ok(Arc::clone(&entry.table));
            }
        }

        tracing::debug!(path = %path.display(), "table cache miss");
        match load_sales_table(path) {
            Ok(table) => {
                let table = Arc::new(table);
                if let Some(previous) = self.entry.take() {
                    tracing::debug!(previous = %previous.path.display(), "table cache entry replaced");
                }
                self.entry = Some(CacheEntry {
                    path: path.to_path_buf(),
                    table: Arc::clone(&table),
                    loaded_at: Instant::now(),
                });
                self.loads += 1;
                self.last_error = None;
                Ok(table)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "table load failed; cache unchanged");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Drop the cached table so the next request reads from disk again.
    pub fn invalidate(&mut self) {
        if let Some(entry) = self.entry.take() {
            tracing::debug!(path = %entry.path.display(), "table cache invalidated");
        }
    }

    /// Path of the cached table, if any.
    pub fn cached_path(&self) -> Option<&Path> {
        self.entry.as_ref().map(|e| e.path.as_path())
    }

    /// Age of the cached table, or `None` if nothing is cached.
    pub fn age(&self) -> Option<Duration> {
        self.entry.as_ref().map(|e| e.loaded_at.elapsed())
    }

    /// Number of successful reads from disk.
    pub fn loads(&self) -> u64 {
        self.loads
    }

    /// Message of the most recent failed load, cleared by a successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::DashboardError;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "Date;City;Product line;Payment;Total;Rating";

    fn write_csv(dir: &TempDir, name: &str, rows: &[&str]) -> PathBuf {
        let path = dir.path().join(name);
        let mut body = String::from(HEADER);
        for row in rows {
            body.push('\n');
            body.push_str(row);
        }
        body.push('\n');
        fs::write(&path, body).expect("write csv");
        path
    }

    fn sample(dir: &TempDir, name: &str) -> PathBuf {
        write_csv(
            dir,
            name,
            &[
                "01/05/2019;CityA;Health and beauty;Cash;100,50;8,0",
                "01/12/2019;CityA;Sports and travel;Ewallet;50,25;6,0",
                "02/01/2019;CityB;Health and beauty;Cash;75,00;9,0",
            ],
        )
    }

    // ── cache miss on first call ──────────────────────────────────────────

    #[test]
    fn test_empty_cache() {
        let cache = TableCache::new();
        assert!(cache.cached_path().is_none());
        assert!(cache.age().is_none());
        assert_eq!(cache.loads(), 0);
        assert!(cache.last_error().is_none());
    }

    #[test]
    fn test_first_call_loads() {
        let dir = TempDir::new().unwrap();
        let path = sample(&dir, "sales.csv");
        let mut cache = TableCache::new();

        let table = cache.get_or_load(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(cache.loads(), 1);
        assert_eq!(cache.cached_path(), Some(path.as_path()));
        assert!(cache.age().unwrap() < Duration::from_secs(5));
    }

    // ── cache hit ─────────────────────────────────────────────────────────

    #[test]
    fn test_repeat_call_returns_same_table() {
        let dir = TempDir::new().unwrap();
        let path = sample(&dir, "sales.csv");
        let mut cache = TableCache::new();

        let first = cache.get_or_load(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.loads(), 1);
    }

    #[test]
    fn test_hit_does_not_reread_file() {
        let dir = TempDir::new().unwrap();
        let path = sample(&dir, "sales.csv");
        let mut cache = TableCache::new();

        let first = cache.get_or_load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let second = cache.get_or_load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    // ── replacement ───────────────────────────────────────────────────────

    #[test]
    fn test_different_path_replaces_entry() {
        let dir = TempDir::new().unwrap();
        let a = sample(&dir, "a.csv");
        let b = write_csv(&dir, "b.csv", &["03/02/2019;Yangon;Food and beverages;Cash;10;5"]);
        let mut cache = TableCache::new();

        let first = cache.get_or_load(&a).unwrap();
        let second = cache.get_or_load(&b).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
        assert_eq!(cache.cached_path(), Some(b.as_path()));

        // Single slot: going back to `a` reads it again.
        let third = cache.get_or_load(&a).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(*first, *third);
        assert_eq!(cache.loads(), 3);
    }

    // ── invalidation ──────────────────────────────────────────────────────

    #[test]
    fn test_invalidate_forces_reload() {
        let dir = TempDir::new().unwrap();
        let path = sample(&dir, "sales.csv");
        let mut cache = TableCache::new();

        let first = cache.get_or_load(&path).unwrap();
        cache.invalidate();
        assert!(cache.cached_path().is_none());

        let second = cache.get_or_load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(cache.loads(), 2);
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn test_missing_file_is_not_cached() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.csv");
        let mut cache = TableCache::new();

        let err = cache.get_or_load(&missing).unwrap_err();
        assert!(matches!(err, DashboardError::FileRead { .. }));
        assert!(cache.cached_path().is_none());
        assert!(cache.last_error().is_some());
        assert_eq!(cache.loads(), 0);

        // Once the file appears the next call succeeds.
        fs::write(&missing, format!("{HEADER}\n01/05/2019;A;P;Cash;1;5\n")).unwrap();
        let table = cache.get_or_load(&missing).unwrap();
        assert_eq!(table.len(), 1);
        assert!(cache.last_error().is_none());
    }

    #[test]
    fn test_failed_load_keeps_previous_entry() {
        let dir = TempDir::new().unwrap();
        let good = sample(&dir, "good.csv");
        let bad = write_csv(&dir, "bad.csv", &["13/40/2019;A;P;Cash;1;5"]);
        let mut cache = TableCache::new();

        let first = cache.get_or_load(&good).unwrap();
        let err = cache.get_or_load(&bad).unwrap_err();
        assert!(matches!(err, DashboardError::DateParse { .. }));
        assert_eq!(cache.cached_path(), Some(good.as_path()));

        let again = cache.get_or_load(&good).unwrap();
        assert!(Arc::ptr_eq(&first, &again));
    }
}
