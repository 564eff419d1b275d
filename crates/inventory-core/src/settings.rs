use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Terminal dashboard and editor for a PostgreSQL database inventory
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pg-inventory",
    about = "Terminal dashboard and editor for a PostgreSQL database inventory",
    version
)]
pub struct Settings {
    /// Path to the JSON inventory data file
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Display theme
    #[arg(long, global = true, default_value = "auto", value_parser = ["light", "dark", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, global = true, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (default: ~/.pg-inventory/logs/pg-inventory.log)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Settings {
    /// Resolve the data file path: the `--data-file` flag when given,
    /// otherwise `~/.pg-inventory/inventory.json`.
    pub fn resolve_data_file(&self) -> PathBuf {
        match &self.data_file {
            Some(path) => path.clone(),
            None => default_data_file_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))),
        }
    }
}

/// Return the default data file path rooted at `base_dir` (used for testing).
pub fn default_data_file_in(base_dir: &Path) -> PathBuf {
    base_dir.join(".pg-inventory").join("inventory.json")
}

// ── Subcommands ────────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the aggregate dashboard (distributions, roles, growth)
    Dashboard,

    /// Show the cumulative growth table
    Growth {
        /// Aggregation period
        #[arg(long, default_value = "monthly", value_parser = ["monthly", "yearly"])]
        view: String,
    },

    /// Print inventory records as a table
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Include dismantled records
        #[arg(long)]
        all: bool,
    },

    /// Show every field of a single record
    Show {
        /// Record id
        id: u64,
    },

    /// Add a new record
    Add {
        #[command(flatten)]
        fields: RecordArgs,
    },

    /// Update an existing record
    Update {
        /// Record id
        id: u64,

        #[command(flatten)]
        fields: RecordArgs,

        /// Mark the record as dismantled (or restore it with false)
        #[arg(long)]
        dismantled: Option<bool>,
    },

    /// Delete a record
    Delete {
        /// Record id
        id: u64,
    },

    /// Import records from a CSV sheet, replacing the current data set
    Import {
        /// Path to the CSV file
        path: PathBuf,

        /// Field delimiter used by the sheet
        #[arg(long, default_value = ";")]
        delimiter: char,
    },

    /// Export records to a comma-separated CSV file
    Export {
        /// Destination path
        path: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        /// Include dismantled records
        #[arg(long)]
        all: bool,
    },
}

// ── FilterArgs ─────────────────────────────────────────────────────────────────

/// Record filters shared by `list` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Hostname substring (case-insensitive)
    #[arg(long)]
    pub hostname: Option<String>,

    /// Database name substring (case-insensitive)
    #[arg(long)]
    pub db: Option<String>,

    /// Database status substring (case-insensitive)
    #[arg(long)]
    pub status: Option<String>,

    /// Exact category, e.g. "Production"
    #[arg(long)]
    pub category: Option<String>,

    /// Exact site code, e.g. "BSD"
    #[arg(long)]
    pub site: Option<String>,

    /// Business category substring (case-insensitive)
    #[arg(long)]
    pub business: Option<String>,

    /// Replication role
    #[arg(long, value_parser = ["master", "replica", "single"])]
    pub role: Option<String>,
}

// ── RecordArgs ─────────────────────────────────────────────────────────────────

/// Record fields accepted by `add` and `update`.
#[derive(Args, Debug, Clone, Default)]
pub struct RecordArgs {
    /// Server hostname
    #[arg(long)]
    pub hostname: Option<String>,

    /// Database name(s)
    #[arg(long)]
    pub db: Option<String>,

    /// Database status
    #[arg(long)]
    pub status: Option<String>,

    /// Category (Production, Development, Pre Production)
    #[arg(long)]
    pub category: Option<String>,

    /// Site code
    #[arg(long)]
    pub site: Option<String>,

    /// Full version string
    #[arg(long)]
    pub version: Option<String>,

    /// Listener port
    #[arg(long)]
    pub port: Option<String>,

    /// Business category
    #[arg(long)]
    pub business: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Replication role, folded into the notes text
    #[arg(long)]
    pub role: Option<String>,

    /// Installation date (free-form, e.g. "2023-04-01" or "March 2023")
    #[arg(long)]
    pub installation_date: Option<String>,
}

// ── Tests ──────────────────────────────────────────────────────────────────────
