//! Dashboard analysis pipeline.
//!
//! Folds the active record set into the distributions, role breakdown,
//! summary counts and growth series the dashboard screens render. All
//! counting happens here so the UI layer only formats.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use inventory_core::classify::{self, Role};
use inventory_core::growth::{GrowthAggregator, GrowthSeries};
use inventory_core::models::{
    InventoryRecord, CATEGORY_DEVELOPMENT, CATEGORY_PRE_PRODUCTION, CATEGORY_PRODUCTION,
};

/// Dashboard distributions are truncated to the busiest buckets so the
/// panels stay readable; statuses and versions keep 10, business
/// categories keep 8.
const TOP_STATUSES: usize = 10;
const TOP_VERSIONS: usize = 10;
const TOP_BUSINESS: usize = 8;

// ── Output types ──────────────────────────────────────────────────────────────

/// One labelled bucket of a distribution panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub label: String,
    pub count: u64,
}

/// Headline counters shown at the top of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCounts {
    /// Active (non-dismantled) records.
    pub total: u64,
    pub production: u64,
    pub development: u64,
    pub pre_production: u64,
    /// Production records classified as masters.
    pub master: u64,
    /// Production records classified as replicas or standbys.
    pub replica: u64,
}

/// Everything the dashboard renders, computed in one pass over the records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardData {
    pub summary: SummaryCounts,
    /// Database status, busiest first.
    pub status: Vec<DistributionEntry>,
    /// Category (Production / Development / Pre Production / others).
    pub category: Vec<DistributionEntry>,
    /// Site codes, busiest first.
    pub site: Vec<DistributionEntry>,
    /// Normalized business categories, busiest first.
    pub business: Vec<DistributionEntry>,
    /// Shortened version strings, busiest first.
    pub version: Vec<DistributionEntry>,
    /// Replication roles over production records, in fixed display order.
    pub role: Vec<DistributionEntry>,
    pub growth: GrowthSeries,
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Build the full dashboard from the record set. Dismantled records are
/// excluded from every panel.
pub fn build_dashboard(records: &[InventoryRecord]) -> DashboardData {
    let active: Vec<&InventoryRecord> = records.iter().filter(|r| !r.is_dismantled).collect();

    let status = top_distribution(
        active.iter().filter_map(|r| non_empty(&r.database_status)),
        TOP_STATUSES,
    );
    let category = top_distribution(
        active.iter().filter_map(|r| non_empty(&r.category)),
        usize::MAX,
    );
    let site = top_distribution(active.iter().filter_map(|r| non_empty(&r.site)), usize::MAX);
    let business = top_distribution(
        active.iter().filter_map(|r| {
            let normalized = classify::normalize_business_category(&r.business_category);
            (!normalized.is_empty()).then_some(normalized)
        }),
        TOP_BUSINESS,
    );
    let version = top_distribution(
        active.iter().filter_map(|r| classify::short_version(&r.version)),
        TOP_VERSIONS,
    );

    let (role, master, replica) = role_distribution(&active);

    let growth = GrowthAggregator::aggregate(
        active.iter().map(|r| r.installation_date.as_str()),
        active.len() as u64,
    );

    let summary = SummaryCounts {
        total: active.len() as u64,
        production: count_category(&active, CATEGORY_PRODUCTION),
        development: count_category(&active, CATEGORY_DEVELOPMENT),
        pre_production: count_category(&active, CATEGORY_PRE_PRODUCTION),
        master,
        replica,
    };

    tracing::debug!(
        total = summary.total,
        production = summary.production,
        monthly_points = growth.monthly.len(),
        "built dashboard data"
    );

    DashboardData {
        summary,
        status,
        category,
        site,
        business,
        version,
        role,
        growth,
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn count_category(records: &[&InventoryRecord], category: &str) -> u64 {
    records.iter().filter(|r| r.category == category).count() as u64
}

/// Count labels and keep the `limit` busiest, sorted by descending count
/// with ties broken by label (ascending) so the output is deterministic.
fn top_distribution<I>(labels: I, limit: usize) -> Vec<DistributionEntry>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: HashMap<String, u64> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut entries: Vec<DistributionEntry> = counts
        .into_iter()
        .map(|(label, count)| DistributionEntry { label, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    entries.truncate(limit);
    entries
}

/// Replication roles over production records, in a fixed display order.
/// Unclassified records appear as "Other" only when any exist. Also
/// returns the master and replica counts for the summary header.
fn role_distribution(active: &[&InventoryRecord]) -> (Vec<DistributionEntry>, u64, u64) {
    let mut master = 0u64;
    let mut replica = 0u64;
    let mut single = 0u64;
    let mut other = 0u64;

    for record in active.iter().filter(|r| r.is_production()) {
        match classify::classify_role(&record.notes, &record.database_status) {
            Some(Role::Master) => master += 1,
            Some(Role::ReplicaStandby) => replica += 1,
            Some(Role::SingleInstance) => single += 1,
            None => other += 1,
        }
    }

    let mut role = vec![
        DistributionEntry {
            label: Role::Master.label().to_string(),
            count: master,
        },
        DistributionEntry {
            label: Role::ReplicaStandby.label().to_string(),
            count: replica,
        },
        DistributionEntry {
            label: Role::SingleInstance.label().to_string(),
            count: single,
        },
    ];
    if other > 0 {
        role.push(DistributionEntry {
            label: "Other".to_string(),
            count: other,
        });
    }

    (role, master, replica)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
