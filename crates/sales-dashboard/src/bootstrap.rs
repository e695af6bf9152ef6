use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Name of the per-user state directory under `$HOME`.
pub const APP_DIR_NAME: &str = ".sales-dashboard";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// `~/.sales-dashboard`, or `./.sales-dashboard` when no home directory is
/// known.
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Default log destination, `~/.sales-dashboard/logs/dashboard.log`.
pub fn default_log_file() -> PathBuf {
    app_dir().join("logs").join("dashboard.log")
}

/// Ensure the `~/.sales-dashboard/logs/` hierarchy exists.
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    ensure_directories_in(&app_dir())
}

/// Create `root` and `root/logs`, returning `root`.
pub fn ensure_directories_in(root: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(root.join("logs"))
        .with_context(|| format!("creating {}", root.display()))?;
    Ok(root.to_path_buf())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a CLI log level onto an `EnvFilter` directive.
///
/// Falls back to `"info"` for unrecognised names.
pub fn level_directive(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" | "WARN" => "warn",
        "ERROR" | "CRITICAL" => "error",
        _ => "info",
    }
}

/// Open `path` for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}

/// Initialise the global `tracing` subscriber writing to `log_file`.
///
/// The terminal belongs to the TUI, so nothing is written to stderr. A set
/// `RUST_LOG` takes precedence over `log_level`.
pub fn setup_logging(log_level: &str, log_file: &Path) -> anyhow::Result<()> {
    let file = open_log_file(log_file)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(log_level)));

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
