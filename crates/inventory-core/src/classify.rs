//! Free-text classification heuristics for inventory records.
//!
//! The source sheet carries replication roles inside the free-form notes
//! field, business criticality with inconsistent casing and a recurring
//! typo, and full version strings where the dashboard only wants the major
//! release. These helpers normalize all three on the fly.

// ── Replication role ──────────────────────────────────────────────────────────

/// Replication role recovered from a record's notes/status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Master,
    ReplicaStandby,
    SingleInstance,
}

impl Role {
    /// Display label used by dashboards and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Master => "Master",
            Role::ReplicaStandby => "Replica/Standby",
            Role::SingleInstance => "Single Instance",
        }
    }
}

/// Classify a record's replication role from its notes and status text.
///
/// Checked in order:
/// 1. notes mention "master" without "slave" or "standby" → [`Role::Master`];
/// 2. notes mention "slave" or "standby" → [`Role::ReplicaStandby`];
/// 3. notes *or* status mention "single instance" → [`Role::SingleInstance`];
/// 4. otherwise unclassified.
///
/// All matching is case-insensitive substring search.
pub fn classify_role(notes: &str, status: &str) -> Option<Role> {
    let notes = notes.to_lowercase();

    if notes.contains("master") && !notes.contains("slave") && !notes.contains("standby") {
        return Some(Role::Master);
    }
    if notes.contains("slave") || notes.contains("standby") {
        return Some(Role::ReplicaStandby);
    }
    if notes.contains("single instance") || status.to_lowercase().contains("single instance") {
        return Some(Role::SingleInstance);
    }
    None
}

// ── Business category ─────────────────────────────────────────────────────────

/// Canonical labels for the business-criticality values seen in the sheet,
/// including the recurring "bussiness" typo forms.
const BUSINESS_CANON: &[(&str, &str)] = &[
    ("mission critical", "Mission Critical"),
    ("business critical", "Business Critical"),
    ("business important", "Business Important"),
    ("business support", "Business Support"),
    ("bussiness critical", "Business Critical"),
    ("bussiness important", "Business Important"),
    ("bussiness support", "Business Support"),
];

/// Normalize a raw business-category label.
///
/// Known values (matched lowercase, trimmed) map to their canonical form;
/// anything else is title-cased. Empty input stays empty.
pub fn normalize_business_category(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let lower = trimmed.to_lowercase();
    for (variant, canonical) in BUSINESS_CANON {
        if *variant == lower {
            return (*canonical).to_string();
        }
    }
    title_case(trimmed)
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(c);
            at_word_start = true;
        }
    }
    result
}

// ── Version shortening ────────────────────────────────────────────────────────

/// Reduce a full version string to `<product> <major>`.
///
/// Only "PostgreSQL" and "EnterpriseDB" strings are recognized;
/// e.g. `"PostgreSQL 14.5 on x86_64"` → `Some("PostgreSQL 14")`.
pub fn short_version(raw: &str) -> Option<String> {
    let ver = raw.trim();
    if !ver.contains("PostgreSQL") && !ver.contains("EnterpriseDB") {
        return None;
    }
    let mut parts = ver.split_whitespace();
    let product = parts.next()?;
    let number = parts.next()?;
    let major = number.split('.').next().unwrap_or(number);
    Some(format!("{} {}", product, major))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
