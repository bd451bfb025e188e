//! This module provides the implementation of `WorkLogService`, the
//! service owning the collection of work log records. It validates caller
//! input, applies the soft-delete rules, and renders the CSV export. The
//! service interacts with a repository that implements the
//! `WorkLogRepository` trait to perform the storage operations.
use crate::error::WorklogError;
use crate::export;
use crate::repository::worklog_repository::WorkLogRepository;
use crate::types::{
    DeletionReceipt, SortOrder, WorkLog, WorkLogInput, MAX_CATEGORY_LEN, MAX_LOCATION_LEN,
    MAX_RO_NUMBER_LEN,
};
use chrono::NaiveDate;
use std::sync::Arc;

pub struct WorkLogService {
    repo: Arc<dyn WorkLogRepository>,
}

impl WorkLogService {
    /// Creates a new instance of `WorkLogService`.
    ///
    /// # Arguments
    ///
    /// * `repo` - A shared reference to a type that implements the `WorkLogRepository` trait.
    pub fn new(repo: Arc<dyn WorkLogRepository>) -> Self {
        Self { repo }
    }

    /// Lists the non-deleted work logs inside the inclusive date range,
    /// most recent `work_date` first (ties broken by descending id).
    ///
    /// # Errors
    /// Returns a `WorklogError` if the query fails.
    pub fn list(
        &self,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
    ) -> Result<Vec<WorkLog>, WorklogError> {
        self.repo
            .find_active(from_date, to_date, SortOrder::Descending)
    }

    /// Creates a new work log record from the given input.
    ///
    /// # Errors
    /// Returns `WorklogError::Validation` if a field exceeds its length
    /// bound; nothing is stored in that case.
    pub fn create(&self, input: &WorkLogInput) -> Result<WorkLog, WorklogError> {
        validate_input(input)?;
        self.repo.insert(input)
    }

    /// Replaces the mutable fields of the record with the given id.
    ///
    /// Full-replace semantics: every mutable field is taken from `input`.
    /// The record is looked up among all records, soft-deleted ones
    /// included; the deleted flag itself is left untouched.
    ///
    /// # Errors
    /// Returns `WorklogError::NotFound` if the id does not exist, or
    /// `WorklogError::Validation` for an out-of-bounds field.
    pub fn update(&self, id: i64, input: &WorkLogInput) -> Result<WorkLog, WorklogError> {
        validate_input(input)?;
        self.repo.update(id, input)
    }

    /// Soft-deletes the record with the given id.
    ///
    /// The record stays in storage and can only be brought back by direct
    /// data edit, not through the API. Repeating the delete succeeds
    /// again.
    ///
    /// # Errors
    /// Returns `WorklogError::NotFound` if the id does not exist.
    pub fn delete(&self, id: i64) -> Result<DeletionReceipt, WorklogError> {
        self.repo.soft_delete(id)?;
        Ok(DeletionReceipt {
            deleted: true,
            id,
            soft: true,
        })
    }

    /// Renders the non-deleted work logs inside the range as a CSV
    /// document, chronological order (`work_date` ascending, ties broken
    /// by ascending id).
    ///
    /// # Errors
    /// Returns a `WorklogError` if the query or the CSV rendering fails.
    pub fn export_csv(
        &self,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
    ) -> Result<Vec<u8>, WorklogError> {
        let work_logs = self
            .repo
            .find_active(from_date, to_date, SortOrder::Ascending)?;
        let mut buf = Vec::new();
        export::write_csv(&mut buf, &work_logs)?;
        Ok(buf)
    }

    /// Creates one record per input, as one unit of work.
    ///
    /// Every input is validated before anything is stored, and the batch
    /// itself runs in a single transaction, so a failing item leaves the
    /// store untouched.
    ///
    /// # Returns
    /// The number of records created.
    ///
    /// # Errors
    /// Returns `WorklogError::Validation` for the first out-of-bounds
    /// item, or a storage error from the batch insert.
    pub fn import(&self, inputs: &[WorkLogInput]) -> Result<usize, WorklogError> {
        for input in inputs {
            validate_input(input)?;
        }
        self.repo.insert_batch(inputs)
    }
}

fn validate_input(input: &WorkLogInput) -> Result<(), WorklogError> {
    check_len("category", &input.category, MAX_CATEGORY_LEN)?;
    if let Some(ro_number) = &input.ro_number {
        check_len("ro_number", ro_number, MAX_RO_NUMBER_LEN)?;
    }
    if let Some(location) = &input.location {
        check_len("location", location, MAX_LOCATION_LEN)?;
    }
    Ok(())
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), WorklogError> {
    let len = value.chars().count();
    if len > max {
        return Err(WorklogError::validation(
            field,
            format!("at most {max} characters allowed, got {len}"),
        ));
    }
    Ok(())
}
