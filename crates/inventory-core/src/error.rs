use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the inventory crates.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The inventory data file contains invalid JSON.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A CSV sheet could not be parsed at the given line.
    #[error("Failed to parse CSV {path} (line {line}): {message}")]
    CsvParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A required CSV header column is missing from the sheet.
    #[error("Missing CSV column: {0}")]
    MissingColumn(String),

    /// No record with the given id exists in the store.
    #[error("No inventory record with id {0}")]
    RecordNotFound(u64),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the inventory crates.
pub type Result<T> = std::result::Result<T, InventoryError>;
