use clap::Parser;
use std::path::PathBuf;

/// Location of the dataset when nothing else is configured.
pub const DEFAULT_DATA_PATH: &str = "data/supermarket_sales.csv";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive supermarket sales dashboard
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sales-dashboard",
    about = "Interactive supermarket sales dashboard",
    version
)]
pub struct Settings {
    /// Path to the `;`-separated sales file
    #[arg(long, env = "SALES_DASHBOARD_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,

    /// Month to show first (YYYY-MM); defaults to the earliest month
    #[arg(long)]
    pub month: Option<String>,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// Apply flag interactions and normalise free-form values.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings.month = settings
            .month
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
