//! JSON-file backed inventory store.
//!
//! The whole record set lives in one JSON array on disk. Loading a missing
//! file yields an empty store so a fresh installation works without setup;
//! saving writes through a temp file and rename so a crash mid-write never
//! truncates the data set.

use std::path::{Path, PathBuf};

use inventory_core::error::{InventoryError, Result};
use inventory_core::models::InventoryRecord;
use inventory_core::settings::FilterArgs;

// ── RecordPatch ───────────────────────────────────────────────────────────────

/// Optional field values applied to a record by `add` and `update`.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub hostname: Option<String>,
    pub db: Option<String>,
    pub database_status: Option<String>,
    pub category: Option<String>,
    pub site: Option<String>,
    pub version: Option<String>,
    pub port: Option<String>,
    pub business_category: Option<String>,
    pub notes: Option<String>,
    /// Replication role; folded into the notes text, see [`InventoryStore::update`].
    pub role: Option<String>,
    pub installation_date: Option<String>,
    pub is_dismantled: Option<bool>,
}

impl RecordPatch {
    /// Build a patch from the CLI's record arguments.
    pub fn from_args(args: &inventory_core::settings::RecordArgs) -> Self {
        Self {
            hostname: args.hostname.clone(),
            db: args.db.clone(),
            database_status: args.status.clone(),
            category: args.category.clone(),
            site: args.site.clone(),
            version: args.version.clone(),
            port: args.port.clone(),
            business_category: args.business.clone(),
            notes: args.notes.clone(),
            role: args.role.clone(),
            installation_date: args.installation_date.clone(),
            is_dismantled: None,
        }
    }

    /// Overwrite the plain fields of `record` with any values present.
    /// Notes and role are handled separately by the caller.
    fn apply_plain_fields(&self, record: &mut InventoryRecord) {
        if let Some(v) = &self.hostname {
            record.hostname = v.clone();
        }
        if let Some(v) = &self.db {
            record.db = v.clone();
        }
        if let Some(v) = &self.database_status {
            record.database_status = v.clone();
        }
        if let Some(v) = &self.category {
            record.category = v.clone();
        }
        if let Some(v) = &self.site {
            record.site = v.clone();
        }
        if let Some(v) = &self.version {
            record.version = v.clone();
        }
        if let Some(v) = &self.port {
            record.port = v.clone();
        }
        if let Some(v) = &self.business_category {
            record.business_category = v.clone();
        }
        if let Some(v) = &self.installation_date {
            record.installation_date = v.clone();
        }
        if let Some(v) = self.is_dismantled {
            record.is_dismantled = v;
        }
    }
}

// ── RecordFilter ──────────────────────────────────────────────────────────────

/// Replication-role filter values accepted by `list` and `export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleFilter {
    Master,
    Replica,
    Single,
}

impl RoleFilter {
    /// Parse the CLI flag value (`master`, `replica`, `single`).
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "master" => Some(Self::Master),
            "replica" => Some(Self::Replica),
            "single" => Some(Self::Single),
            _ => None,
        }
    }

    /// Whether a record with the given notes/status matches this filter.
    ///
    /// These are the raw substring rules of the original list filters; they
    /// intentionally do not go through [`inventory_core::classify`], which
    /// ranks the role checks for mutually exclusive chart buckets.
    fn matches(&self, notes: &str, status: &str) -> bool {
        let notes = notes.to_lowercase();
        match self {
            Self::Master => {
                notes.contains("master") && !notes.contains("slave") && !notes.contains("standby")
            }
            Self::Replica => notes.contains("slave") || notes.contains("standby"),
            Self::Single => {
                notes.contains("single instance")
                    || status.to_lowercase().contains("single instance")
            }
        }
    }
}

/// Record predicates shared by `list` and `export`.
///
/// Hostname, db, status and business match as case-insensitive substrings;
/// category and site match exactly.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub hostname: Option<String>,
    pub db: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub site: Option<String>,
    pub business: Option<String>,
    pub role: Option<RoleFilter>,
}

impl RecordFilter {
    /// Build a filter from the CLI's filter arguments.
    pub fn from_args(args: &FilterArgs) -> Self {
        Self {
            hostname: args.hostname.clone(),
            db: args.db.clone(),
            status: args.status.clone(),
            category: args.category.clone(),
            site: args.site.clone(),
            business: args.business.clone(),
            role: args.role.as_deref().and_then(RoleFilter::from_flag),
        }
    }

    /// Whether `record` satisfies every present predicate.
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        if let Some(needle) = &self.hostname {
            if !contains_ci(&record.hostname, needle) {
                return false;
            }
        }
        if let Some(needle) = &self.db {
            if !contains_ci(&record.db, needle) {
                return false;
            }
        }
        if let Some(needle) = &self.status {
            if !contains_ci(&record.database_status, needle) {
                return false;
            }
        }
        if let Some(wanted) = &self.category {
            if record.category != *wanted {
                return false;
            }
        }
        if let Some(wanted) = &self.site {
            if record.site != *wanted {
                return false;
            }
        }
        if let Some(needle) = &self.business {
            if !contains_ci(&record.business_category, needle) {
                return false;
            }
        }
        if let Some(role) = &self.role {
            if !role.matches(&record.notes, &record.database_status) {
                return false;
            }
        }
        true
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ── InventoryStore ────────────────────────────────────────────────────────────

/// The full record set plus the path it was loaded from.
pub struct InventoryStore {
    path: PathBuf,
    records: Vec<InventoryRecord>,
}

impl InventoryStore {
    // ── Load / save ───────────────────────────────────────────────────────────

    /// Load the store from `path`.
    ///
    /// A missing file yields an empty store (logged as a warning); malformed
    /// JSON is an error so a corrupted data set is never silently replaced.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "inventory data file not found; starting with an empty store"
            );
            return Ok(Self {
                path: path.to_path_buf(),
                records: Vec::new(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| InventoryError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<InventoryRecord> = serde_json::from_str(&content)?;

        tracing::debug!(count = records.len(), path = %path.display(), "loaded inventory");
        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    /// Persist the record set, creating parent directories if needed.
    /// Writes to a temp file then renames for atomicity.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.records)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, &self.path)?;

        tracing::debug!(count = self.records.len(), path = %self.path.display(), "saved inventory");
        Ok(())
    }

    // ── Read access ───────────────────────────────────────────────────────────

    /// All records, dismantled included.
    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    /// Records that have not been dismantled (the dashboard's input set).
    pub fn active_records(&self) -> Vec<&InventoryRecord> {
        self.records.iter().filter(|r| !r.is_dismantled).collect()
    }

    /// Look up one record by id.
    pub fn get(&self, id: u64) -> Option<&InventoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records matching `filter`, optionally restricted to active ones.
    pub fn filtered(&self, filter: &RecordFilter, include_dismantled: bool) -> Vec<&InventoryRecord> {
        self.records
            .iter()
            .filter(|r| include_dismantled || !r.is_dismantled)
            .filter(|r| filter.matches(r))
            .collect()
    }

    // ── Mutation ──────────────────────────────────────────────────────────────

    /// Add a new record built from `patch`, returning the assigned id.
    ///
    /// A role supplied without explicit notes is appended to the notes text
    /// so the classification heuristics pick it up.
    pub fn add(&mut self, patch: &RecordPatch) -> u64 {
        let id = self.records.iter().map(|r| r.id).max().unwrap_or(0) + 1;

        let mut record = InventoryRecord {
            id,
            ..InventoryRecord::default()
        };
        patch.apply_plain_fields(&mut record);

        let notes = patch.notes.clone().unwrap_or_default();
        record.notes = match &patch.role {
            Some(role) if !role.is_empty() => annotate_role(&notes, role),
            _ => notes,
        };

        tracing::info!(id, hostname = %record.hostname, "added inventory record");
        self.records.push(record);
        id
    }

    /// Update the record with `id` in place.
    ///
    /// Explicit notes win over a role value; a role supplied on its own
    /// substitutes the first recognized role word already present in the
    /// notes, or is appended when none is found.
    pub fn update(&mut self, id: u64, patch: &RecordPatch) -> Result<()> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(InventoryError::RecordNotFound(id))?;

        patch.apply_plain_fields(record);

        if let Some(notes) = &patch.notes {
            record.notes = notes.clone();
        } else if let Some(role) = &patch.role {
            if !role.is_empty() {
                record.notes = substitute_role(&record.notes, role);
            }
        }

        tracing::info!(id, "updated inventory record");
        Ok(())
    }

    /// Remove the record with `id`.
    pub fn delete(&mut self, id: u64) -> Result<()> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return Err(InventoryError::RecordNotFound(id));
        }
        tracing::info!(id, "deleted inventory record");
        Ok(())
    }

    /// Replace the whole record set (used by CSV import).
    pub fn replace_all(&mut self, records: Vec<InventoryRecord>) {
        tracing::info!(count = records.len(), "replacing inventory record set");
        self.records = records;
    }
}

// ── Role/notes helpers ────────────────────────────────────────────────────────

/// Role words recognized in existing notes when substituting a new role.
const ROLE_WORDS: &[&str] = &["Master", "Slave", "Standby", "Single Instance"];

/// New-record path: append the role to the notes unless already mentioned.
fn annotate_role(notes: &str, role: &str) -> String {
    if notes.contains(role) {
        return notes.to_string();
    }
    if notes.is_empty() {
        role.to_string()
    } else {
        format!("{} ({})", notes, role)
    }
}

/// Update path: swap the first recognized role word for the new role, or
/// append when the notes carry no role yet.
fn substitute_role(notes: &str, role: &str) -> String {
    for word in ROLE_WORDS {
        if notes.contains(word) {
            return notes.replace(word, role);
        }
    }
    if notes.contains(role) {
        notes.to_string()
    } else if notes.is_empty() {
        role.to_string()
    } else {
        format!("{} {}", notes, role)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
