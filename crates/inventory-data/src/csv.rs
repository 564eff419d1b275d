//! CSV import/export for the inventory sheet.
//!
//! The upstream spreadsheet is exported with `;` as the field delimiter and
//! the column names below (a mix of English and Indonesian headers,
//! reproduced as-is). Import maps columns by header name so column order
//! does not matter; rows without a positive integer in the `No` column are
//! skipped, matching how the sheet marks section separators and blanks.
//!
//! Export writes a comma-separated file with a fixed column subset and
//! minimal quoting.

use std::collections::HashMap;
use std::path::Path;

use inventory_core::error::{InventoryError, Result};
use inventory_core::models::InventoryRecord;

/// Columns written by [`export_records`], in order.
pub const EXPORT_COLUMNS: &[&str] = &[
    "No",
    "Hostname",
    "Database",
    "Port",
    "Version",
    "Category",
    "Site",
    "Business Category",
    "Database Status",
    "Notes",
];

// ── Import ────────────────────────────────────────────────────────────────────

/// Result of one CSV import run.
#[derive(Debug)]
pub struct ImportOutcome {
    /// Parsed records with freshly assigned ids (1-based).
    pub records: Vec<InventoryRecord>,
    /// Rows skipped because the `No` column was empty or non-numeric.
    pub skipped: usize,
}

/// Parse the sheet at `path` into inventory records.
///
/// The first line must be a header containing at least the `No` column;
/// any other known column that is absent simply yields empty fields.
pub fn import_records(path: &Path, delimiter: char) -> Result<ImportOutcome> {
    let content = std::fs::read_to_string(path).map_err(|source| InventoryError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    // Excel exports prefix a UTF-8 BOM.
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let mut lines = content.lines().enumerate();
    let header = match lines.next() {
        Some((_, line)) => split_line(line, delimiter, path, 1)?,
        None => {
            return Err(InventoryError::CsvParse {
                path: path.to_path_buf(),
                line: 1,
                message: "empty file".to_string(),
            })
        }
    };

    let columns: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim().to_string(), i))
        .collect();
    if !columns.contains_key("No") {
        return Err(InventoryError::MissingColumn("No".to_string()));
    }

    let field = |row: &[String], name: &str| -> String {
        columns
            .get(name)
            .and_then(|&i| row.get(i))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let row = split_line(line, delimiter, path, index + 1)?;

        let no: i64 = match field(&row, "No").parse() {
            Ok(n) if n > 0 => n,
            _ => {
                skipped += 1;
                continue;
            }
        };

        records.push(InventoryRecord {
            id: records.len() as u64 + 1,
            no,
            hostname: field(&row, "Hostname"),
            db: field(&row, "DB"),
            database_status: field(&row, "Database Status"),
            ip_oam: field(&row, "IP OAM"),
            ip_service: field(&row, "IP SERVICE"),
            category: field(&row, "CATEGORY DATABASE"),
            notes: field(&row, "NOTES"),
            port: field(&row, "PORT"),
            version: field(&row, "Version"),
            installation_date: field(&row, "Tanggal Instalasi"),
            operating_system: field(&row, "OPERATION SYSTEM"),
            apps: field(&row, "APPS"),
            apps_on_product_catalog: field(&row, "Apps on Product Catalog"),
            business_category: field(&row, "BUSINESS CATEGORY"),
            department: field(&row, "Departemen"),
            owner: field(&row, "OWNER"),
            pic_operational: field(&row, "PIC Operational"),
            monitoring: field(&row, "Monitoring"),
            site: field(&row, "Site"),
            installed_by: field(&row, "Installed by"),
            size_mountpoint: field(&row, "Size Mountpoint datadir in (GiB)"),
            size_database: field(&row, "Size Database (GiB)"),
            is_dismantled: false,
        });
    }

    tracing::info!(
        imported = records.len(),
        skipped,
        path = %path.display(),
        "imported CSV sheet"
    );
    Ok(ImportOutcome { records, skipped })
}

// ── Export ────────────────────────────────────────────────────────────────────

/// Write `records` to `path` as comma-separated CSV, returning the row count.
pub fn export_records(records: &[&InventoryRecord], path: &Path) -> Result<usize> {
    let mut out = String::new();
    out.push_str(&join_row(
        &EXPORT_COLUMNS.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
        ',',
    ));
    out.push('\n');

    for record in records {
        let row = vec![
            record.no.to_string(),
            record.hostname.clone(),
            record.db.clone(),
            record.port.clone(),
            record.version.clone(),
            record.category.clone(),
            record.site.clone(),
            record.business_category.clone(),
            record.database_status.clone(),
            record.notes.clone(),
        ];
        out.push_str(&join_row(&row, ','));
        out.push('\n');
    }

    std::fs::write(path, out)?;
    tracing::info!(rows = records.len(), path = %path.display(), "exported CSV");
    Ok(records.len())
}

// ── Line-level helpers ────────────────────────────────────────────────────────

/// Split one CSV line into fields, honouring double-quoted fields with `""`
/// escapes. Embedded newlines inside quotes are not supported (the sheet
/// never contains them) and surface as an unterminated-quote error.
fn split_line(line: &str, delimiter: char, path: &Path, line_no: usize) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' && current.is_empty() {
            in_quotes = true;
        } else if c == delimiter {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }

    if in_quotes {
        return Err(InventoryError::CsvParse {
            path: path.to_path_buf(),
            line: line_no,
            message: "unterminated quoted field".to_string(),
        });
    }

    fields.push(current);
    Ok(fields)
}

/// Join fields into one CSV line, quoting any field that needs it.
fn join_row(fields: &[String], delimiter: char) -> String {
    fields
        .iter()
        .map(|f| quote_field(f, delimiter))
        .collect::<Vec<_>>()
        .join(&delimiter.to_string())
}

fn quote_field(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains('"') || field.contains('\n') || field.contains('\r')
    {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
