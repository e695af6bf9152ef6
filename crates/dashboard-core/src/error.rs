use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the sales dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The delimited file itself is malformed (bad quoting, ragged row, ...).
    #[error("Malformed CSV at line {line}: {message}")]
    Csv { line: u64, message: String },

    /// A required column is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A category column holds an empty value.
    #[error("Empty value in column '{column}' at line {line}")]
    EmptyField { line: u64, column: String },

    /// A date did not match the fixed `MM/DD/YYYY` format.
    #[error("Invalid date '{value}' at line {line} (expected MM/DD/YYYY)")]
    DateParse { line: u64, value: String },

    /// A numeric column holds a value that is not a decimal number.
    #[error("Invalid number '{value}' in column '{column}' at line {line}")]
    NumberParse {
        line: u64,
        column: String,
        value: String,
    },
}

impl DashboardError {
    /// Source line the failure points at, when it is tied to one row.
    pub fn line(&self) -> Option<u64> {
        match self {
            DashboardError::Csv { line, .. }
            | DashboardError::EmptyField { line, .. }
            | DashboardError::DateParse { line, .. }
            | DashboardError::NumberParse { line, .. } => Some(*line),
            DashboardError::FileRead { .. } | DashboardError::MissingColumn(_) => None,
        }
    }
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
