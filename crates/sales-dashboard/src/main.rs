mod bootstrap;

use anyhow::{Context, Result};
use dashboard_core::settings::Settings;
use dashboard_runtime::dashboard::Dashboard;
use dashboard_runtime::table_cache::TableCache;
use dashboard_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::ensure_directories()?;
    let log_file = settings
        .log_file
        .clone()
        .unwrap_or_else(bootstrap::default_log_file);
    bootstrap::setup_logging(&settings.log_level, &log_file)?;

    tracing::info!("Sales Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        data_path = %settings.data_path.display(),
        month = settings.month.as_deref().unwrap_or("-"),
        theme = %settings.theme,
        "settings resolved"
    );

    // Load failures stop the program before the terminal is taken over.
    let mut cache = TableCache::new();
    let table = match cache.get_or_load(&settings.data_path) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!(
                error = %e,
                line = ?e.line(),
                "failed to load sales data"
            );
            return Err(e).with_context(|| {
                format!("could not load sales data from {}", settings.data_path.display())
            });
        }
    };

    let dashboard = Dashboard::new(table, settings.month.as_deref());
    let app = App::new(&settings.theme, dashboard);

    // The TUI exits on 'q' / Esc / Ctrl+C. The OS-level Ctrl+C listener covers
    // signals that arrive outside raw mode.
    tokio::select! {
        result = app.run() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down");
            App::restore_terminal()?;
        }
    }

    tracing::info!("Sales Dashboard stopped");
    Ok(())
}
