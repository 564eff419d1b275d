//! Subcommand handlers for the pg-inventory CLI.
//!
//! Every handler takes the loaded store (plus its parsed arguments), does its
//! work, and prints a short human-readable result to stdout. Mutating
//! handlers save the store before returning.

use std::path::Path;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use inventory_core::classify;
use inventory_core::error::{InventoryError, Result};
use inventory_core::models::InventoryRecord;
use inventory_core::settings::{FilterArgs, RecordArgs};
use inventory_data::csv;
use inventory_data::store::{InventoryStore, RecordFilter, RecordPatch};

// ── list ──────────────────────────────────────────────────────────────────────

/// One row of the `list` table.
#[derive(Tabled)]
struct ListRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "Database")]
    db: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Business")]
    business: String,
}

impl ListRow {
    fn from_record(record: &InventoryRecord) -> Self {
        let role = classify::classify_role(&record.notes, &record.database_status)
            .map(|r| r.label().to_string())
            .unwrap_or_else(|| "-".to_string());
        let version =
            classify::short_version(&record.version).unwrap_or_else(|| record.version.clone());
        Self {
            id: record.id,
            hostname: record.hostname.clone(),
            db: record.db.clone(),
            status: record.database_status.clone(),
            category: record.category.clone(),
            site: record.site.clone(),
            version,
            role,
            business: classify::normalize_business_category(&record.business_category),
        }
    }
}

/// Print the filtered record set as a table.
pub fn run_list(store: &InventoryStore, filter: &FilterArgs, include_dismantled: bool) {
    let filter = RecordFilter::from_args(filter);
    let records = store.filtered(&filter, include_dismantled);

    if records.is_empty() {
        println!("No records match.");
        return;
    }

    let rows: Vec<ListRow> = records.iter().map(|r| ListRow::from_record(r)).collect();
    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("{}", table);
    println!("{} record(s)", records.len());
}

// ── show ──────────────────────────────────────────────────────────────────────

/// Print every field of one record.
pub fn run_show(store: &InventoryStore, id: u64) -> Result<()> {
    let record = store.get(id).ok_or(InventoryError::RecordNotFound(id))?;
    print!("{}", render_record(record));
    Ok(())
}

/// Field-per-line rendering used by `show`.
fn render_record(record: &InventoryRecord) -> String {
    let role = classify::classify_role(&record.notes, &record.database_status)
        .map(|r| r.label())
        .unwrap_or("-");

    let fields: &[(&str, String)] = &[
        ("ID", record.id.to_string()),
        ("No", record.no.to_string()),
        ("Hostname", record.hostname.clone()),
        ("Database", record.db.clone()),
        ("Status", record.database_status.clone()),
        ("Category", record.category.clone()),
        ("Site", record.site.clone()),
        ("Port", record.port.clone()),
        ("Version", record.version.clone()),
        ("Role", role.to_string()),
        (
            "Business Category",
            classify::normalize_business_category(&record.business_category),
        ),
        ("Installation Date", record.installation_date.clone()),
        ("Operating System", record.operating_system.clone()),
        ("IP OAM", record.ip_oam.clone()),
        ("IP Service", record.ip_service.clone()),
        ("Apps", record.apps.clone()),
        (
            "Apps on Product Catalog",
            record.apps_on_product_catalog.clone(),
        ),
        ("Department", record.department.clone()),
        ("Owner", record.owner.clone()),
        ("PIC Operational", record.pic_operational.clone()),
        ("Monitoring", record.monitoring.clone()),
        ("Installed By", record.installed_by.clone()),
        ("Size Mountpoint (GiB)", record.size_mountpoint.clone()),
        ("Size Database (GiB)", record.size_database.clone()),
        ("Notes", record.notes.clone()),
        ("Dismantled", record.is_dismantled.to_string()),
    ];

    let mut out = String::new();
    for (label, value) in fields {
        out.push_str(&format!("{:<24}{}\n", format!("{}:", label), value));
    }
    out
}

// ── add / update / delete ─────────────────────────────────────────────────────

/// Add a record and save.
pub fn run_add(store: &mut InventoryStore, fields: &RecordArgs) -> Result<()> {
    let id = store.add(&RecordPatch::from_args(fields));
    store.save()?;
    println!("Added record {}", id);
    Ok(())
}

/// Update a record in place and save.
pub fn run_update(
    store: &mut InventoryStore,
    id: u64,
    fields: &RecordArgs,
    dismantled: Option<bool>,
) -> Result<()> {
    let mut patch = RecordPatch::from_args(fields);
    patch.is_dismantled = dismantled;
    store.update(id, &patch)?;
    store.save()?;
    println!("Updated record {}", id);
    Ok(())
}

/// Delete a record and save.
pub fn run_delete(store: &mut InventoryStore, id: u64) -> Result<()> {
    store.delete(id)?;
    store.save()?;
    println!("Deleted record {}", id);
    Ok(())
}

// ── import / export ───────────────────────────────────────────────────────────

/// Import a CSV sheet, replacing the current record set, and save.
pub fn run_import(store: &mut InventoryStore, path: &Path, delimiter: char) -> Result<()> {
    let outcome = csv::import_records(path, delimiter)?;
    let imported = outcome.records.len();
    store.replace_all(outcome.records);
    store.save()?;
    println!(
        "Imported {} record(s) from {} ({} row(s) skipped)",
        imported,
        path.display(),
        outcome.skipped
    );
    Ok(())
}

/// Export the filtered record set to a comma-separated CSV file.
pub fn run_export(
    store: &InventoryStore,
    path: &Path,
    filter: &FilterArgs,
    include_dismantled: bool,
) -> Result<()> {
    let filter = RecordFilter::from_args(filter);
    let records = store.filtered(&filter, include_dismantled);
    let count = csv::export_records(&records, path)?;
    println!("Exported {} record(s) to {}", count, path.display());
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_one_record(dir: &TempDir) -> (InventoryStore, u64) {
        let mut store = InventoryStore::load(&dir.path().join("inventory.json")).unwrap();
        let id = store.add(&RecordPatch {
            hostname: Some("pg-prod-01".to_string()),
            db: Some("billing".to_string()),
            database_status: Some("Running".to_string()),
            category: Some("Production".to_string()),
            site: Some("BSD".to_string()),
            version: Some("PostgreSQL 14.5".to_string()),
            business_category: Some("bussiness critical".to_string()),
            notes: Some("Master".to_string()),
            ..RecordPatch::default()
        });
        (store, id)
    }

    // ── ListRow ───────────────────────────────────────────────────────────────

    #[test]
    fn test_list_row_classifies_and_normalizes() {
        let dir = TempDir::new().unwrap();
        let (store, id) = store_with_one_record(&dir);
        let row = ListRow::from_record(store.get(id).unwrap());

        assert_eq!(row.role, "Master");
        assert_eq!(row.version, "PostgreSQL 14");
        assert_eq!(row.business, "Business Critical");
    }

    #[test]
    fn test_list_row_unclassified_role_shows_dash() {
        let record = InventoryRecord {
            id: 1,
            version: "MariaDB 10.6".to_string(),
            ..InventoryRecord::default()
        };
        let row = ListRow::from_record(&record);
        assert_eq!(row.role, "-");
        // Unrecognized products keep their full version string.
        assert_eq!(row.version, "MariaDB 10.6");
    }

    // ── render_record ─────────────────────────────────────────────────────────

    #[test]
    fn test_render_record_lists_all_fields() {
        let dir = TempDir::new().unwrap();
        let (store, id) = store_with_one_record(&dir);
        let text = render_record(store.get(id).unwrap());

        assert!(text.contains("Hostname:"));
        assert!(text.contains("pg-prod-01"));
        assert!(text.contains("Role:"));
        assert!(text.contains("Master"));
        assert!(text.contains("Business Critical"));
        assert!(text.contains("Dismantled:"));
    }

    // ── handlers ──────────────────────────────────────────────────────────────

    #[test]
    fn test_run_show_unknown_id() {
        let dir = TempDir::new().unwrap();
        let (store, _) = store_with_one_record(&dir);
        let err = run_show(&store, 99).unwrap_err();
        assert!(matches!(err, InventoryError::RecordNotFound(99)));
    }

    #[test]
    fn test_run_add_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.json");
        let mut store = InventoryStore::load(&path).unwrap();

        run_add(
            &mut store,
            &RecordArgs {
                hostname: Some("pg-new".to_string()),
                ..RecordArgs::default()
            },
        )
        .unwrap();

        let reloaded = InventoryStore::load(&path).unwrap();
        assert_eq!(reloaded.records().len(), 1);
        assert_eq!(reloaded.records()[0].hostname, "pg-new");
    }

    #[test]
    fn test_run_update_dismantles_and_persists() {
        let dir = TempDir::new().unwrap();
        let (mut store, id) = store_with_one_record(&dir);

        run_update(&mut store, id, &RecordArgs::default(), Some(true)).unwrap();

        let reloaded = InventoryStore::load(&dir.path().join("inventory.json")).unwrap();
        assert!(reloaded.get(id).unwrap().is_dismantled);
    }

    #[test]
    fn test_run_delete_persists() {
        let dir = TempDir::new().unwrap();
        let (mut store, id) = store_with_one_record(&dir);

        run_delete(&mut store, id).unwrap();

        let reloaded = InventoryStore::load(&dir.path().join("inventory.json")).unwrap();
        assert!(reloaded.records().is_empty());
    }

    #[test]
    fn test_run_import_replaces_and_persists() {
        let dir = TempDir::new().unwrap();
        let (mut store, _) = store_with_one_record(&dir);

        let sheet = dir.path().join("sheet.csv");
        std::fs::write(&sheet, "No;Hostname;DB\n1;imported-01;sales\n").unwrap();

        run_import(&mut store, &sheet, ';').unwrap();

        let reloaded = InventoryStore::load(&dir.path().join("inventory.json")).unwrap();
        assert_eq!(reloaded.records().len(), 1);
        assert_eq!(reloaded.records()[0].hostname, "imported-01");
    }

    #[test]
    fn test_run_export_writes_filtered_records() {
        let dir = TempDir::new().unwrap();
        let (mut store, _) = store_with_one_record(&dir);
        store.add(&RecordPatch {
            hostname: Some("pg-dev-01".to_string()),
            category: Some("Development".to_string()),
            ..RecordPatch::default()
        });

        let out = dir.path().join("export.csv");
        run_export(
            &store,
            &out,
            &FilterArgs {
                category: Some("Production".to_string()),
                ..FilterArgs::default()
            },
            false,
        )
        .unwrap();

        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.contains("pg-prod-01"));
        assert!(!content.contains("pg-dev-01"));
    }

    #[test]
    fn test_run_export_skips_dismantled_by_default() {
        let dir = TempDir::new().unwrap();
        let (mut store, id) = store_with_one_record(&dir);
        store
            .update(
                id,
                &RecordPatch {
                    is_dismantled: Some(true),
                    ..RecordPatch::default()
                },
            )
            .unwrap();

        let out = dir.path().join("export.csv");
        run_export(&store, &out, &FilterArgs::default(), false).unwrap();
        let content = std::fs::read_to_string(&out).unwrap();
        assert!(!content.contains("pg-prod-01"));
    }

    #[test]
    fn test_run_export_all_includes_dismantled() {
        let dir = TempDir::new().unwrap();
        let (mut store, id) = store_with_one_record(&dir);
        store
            .update(
                id,
                &RecordPatch {
                    is_dismantled: Some(true),
                    ..RecordPatch::default()
                },
            )
            .unwrap();

        let out = dir.path().join("export.csv");
        run_export(&store, &out, &FilterArgs::default(), true).unwrap();
        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.contains("pg-prod-01"));
    }
}
