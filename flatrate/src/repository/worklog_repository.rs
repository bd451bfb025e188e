/// A trait for managing work log records in a storage repository.
///
/// This trait defines the persistence operations behind the work log
/// service: inserting, replacing, soft-deleting, and querying records.
/// Implementations must serialize each write so that a reader never
/// observes a half-written record.
use crate::error::WorklogError;
use crate::types::{SortOrder, WorkLog, WorkLogInput};
use chrono::NaiveDate;

pub trait WorkLogRepository: Send + Sync {
    /// Inserts a new work log record.
    ///
    /// Assigns a fresh id and sets both `created_at` and `updated_at` to
    /// the current time. Ids are strictly increasing and never reused,
    /// including after deletes.
    ///
    /// # Errors
    /// Returns a `WorklogError` if the insert fails.
    fn insert(&self, input: &WorkLogInput) -> Result<WorkLog, WorklogError>;

    /// Inserts a batch of work log records as one unit of work.
    ///
    /// Either every record is inserted or none are: the batch runs inside
    /// a single transaction.
    ///
    /// # Returns
    /// The number of records inserted.
    ///
    /// # Errors
    /// Returns a `WorklogError` if any insert fails; no records are kept
    /// in that case.
    fn insert_batch(&self, inputs: &[WorkLogInput]) -> Result<usize, WorklogError>;

    /// Replaces the mutable fields of an existing record.
    ///
    /// The lookup spans ALL records, including soft-deleted ones; a
    /// deleted record can have its visible fields rewritten but keeps its
    /// deleted flag. `id` and `created_at` are untouched, `updated_at` is
    /// refreshed.
    ///
    /// # Errors
    /// Returns `WorklogError::NotFound` if no record with that id exists
    /// at all.
    fn update(&self, id: i64, input: &WorkLogInput) -> Result<WorkLog, WorklogError>;

    /// Marks a record as deleted and refreshes `updated_at`.
    ///
    /// Deleting an already-deleted record succeeds again and still bumps
    /// `updated_at`; the record is never physically removed.
    ///
    /// # Errors
    /// Returns `WorklogError::NotFound` if no record with that id exists.
    fn soft_delete(&self, id: i64) -> Result<(), WorklogError>;

    /// Fetches a single record by id, regardless of its deleted flag.
    ///
    /// # Errors
    /// Returns `WorklogError::NotFound` if no record with that id exists.
    fn find_by_id(&self, id: i64) -> Result<WorkLog, WorklogError>;

    /// Returns the non-deleted records whose `work_date` falls inside the
    /// inclusive `[from_date, to_date]` range; either bound may be absent
    /// for an open-ended range.
    ///
    /// `SortOrder::Descending` orders by `(work_date, id)` most recent
    /// first, `SortOrder::Ascending` the reverse.
    ///
    /// # Errors
    /// Returns a `WorklogError` if the query fails.
    fn find_active(
        &self,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
        order: SortOrder,
    ) -> Result<Vec<WorkLog>, WorklogError>;

    /// Retrieves the total count of records, deleted ones included.
    ///
    /// # Errors
    /// Returns a `WorklogError` if the query fails.
    fn count(&self) -> Result<i64, WorklogError>;
}
