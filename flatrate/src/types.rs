use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound on the `category` column.
pub const MAX_CATEGORY_LEN: usize = 64;
/// Upper bound on the `ro_number` column.
pub const MAX_RO_NUMBER_LEN: usize = 64;
/// Upper bound on the `location` column.
pub const MAX_LOCATION_LEN: usize = 128;

/// A single record of billable work as stored in the database.
///
/// `id` is assigned by the database and never reused. `created_at` is set
/// once at insert time; `updated_at` is refreshed by every mutating
/// operation, so `updated_at >= created_at` always holds. Records are
/// never physically removed: `is_deleted` hides them from listing and
/// export while keeping the row around for recovery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkLog {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub work_date: NaiveDate,
    pub category: String,
    pub ro_number: Option<String>,
    pub description: Option<String>,
    pub flat_hours: f64,
    pub cash_amount: f64,
    pub location: Option<String>,
}

/// The caller-supplied fields of a work log, used both when creating a new
/// record and when replacing an existing one.
///
/// `work_date` is the only required field. Updates have full-replace
/// semantics: omitted optional fields fall back to these defaults rather
/// than keeping their stored values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkLogInput {
    pub work_date: NaiveDate,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub ro_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub flat_hours: f64,
    #[serde(default)]
    pub cash_amount: f64,
    #[serde(default)]
    pub location: Option<String>,
}

fn default_category() -> String {
    "work".to_string()
}

impl WorkLogInput {
    /// A minimal input for the given date, everything else defaulted.
    #[must_use]
    pub fn for_date(work_date: NaiveDate) -> Self {
        WorkLogInput {
            work_date,
            category: default_category(),
            ro_number: None,
            description: None,
            flat_hours: 0.0,
            cash_amount: 0.0,
            location: None,
        }
    }
}

/// Confirmation returned by the delete operation.
///
/// `soft` is always true: the API only ever hides records, it never
/// removes them. Bringing a record back requires editing the stored data
/// directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletionReceipt {
    pub deleted: bool,
    pub id: i64,
    pub soft: bool,
}

/// Row ordering for range queries: listing wants the most recent work
/// first, the CSV export wants chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}
