use serde::{Deserialize, Serialize};

/// Category label used for production databases.
pub const CATEGORY_PRODUCTION: &str = "Production";
/// Category label used for development databases.
pub const CATEGORY_DEVELOPMENT: &str = "Development";
/// Category label used for pre-production databases.
pub const CATEGORY_PRE_PRODUCTION: &str = "Pre Production";

/// One PostgreSQL database server instance tracked by the inventory.
///
/// All text fields are free-form strings as found in the source sheet; the
/// dashboard layer normalizes them on the fly rather than at rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Store-assigned identifier, unique within one data file.
    pub id: u64,
    /// Row number carried over from the source sheet.
    #[serde(default)]
    pub no: i64,
    /// Server hostname.
    #[serde(default)]
    pub hostname: String,
    /// Database name(s) hosted on the server.
    #[serde(default)]
    pub db: String,
    /// Free-form database status, e.g. "Running" or "Single Instance".
    #[serde(default)]
    pub database_status: String,
    /// Operations-and-maintenance network address.
    #[serde(default)]
    pub ip_oam: String,
    /// Service network address.
    #[serde(default)]
    pub ip_service: String,
    /// Deployment category: Production, Development or Pre Production.
    #[serde(default)]
    pub category: String,
    /// Free-form notes; the master/replica role heuristics read this field.
    #[serde(default)]
    pub notes: String,
    /// Listener port as written in the sheet (not always numeric).
    #[serde(default)]
    pub port: String,
    /// Full version string, e.g. "PostgreSQL 14.5".
    #[serde(default)]
    pub version: String,
    /// Raw installation date in whatever format the sheet used.
    #[serde(default)]
    pub installation_date: String,
    /// Operating system description.
    #[serde(default)]
    pub operating_system: String,
    /// Applications served by this database.
    #[serde(default)]
    pub apps: String,
    /// Application names as they appear in the product catalog.
    #[serde(default)]
    pub apps_on_product_catalog: String,
    /// Business criticality label (inconsistently cased in source data).
    #[serde(default)]
    pub business_category: String,
    /// Owning department.
    #[serde(default)]
    pub department: String,
    /// Owner contact.
    #[serde(default)]
    pub owner: String,
    /// Person in charge of operations.
    #[serde(default)]
    pub pic_operational: String,
    /// Monitoring system coverage.
    #[serde(default)]
    pub monitoring: String,
    /// Site code, e.g. "BSD", "TBS" or "BRN".
    #[serde(default)]
    pub site: String,
    /// Who performed the installation.
    #[serde(default)]
    pub installed_by: String,
    /// Data-directory mountpoint size (GiB, as text).
    #[serde(default)]
    pub size_mountpoint: String,
    /// Database size (GiB, as text).
    #[serde(default)]
    pub size_database: String,
    /// Dismantled servers are kept for history but excluded from dashboards.
    #[serde(default)]
    pub is_dismantled: bool,
}

impl InventoryRecord {
    /// Whether this record belongs to the production category.
    pub fn is_production(&self) -> bool {
        self.category == CATEGORY_PRODUCTION
    }
}
