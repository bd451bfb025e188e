use std::io;

use thiserror::Error;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum WorklogError {
    #[error("Unable to open DBMS in file {path}: {reason}")]
    OpenDbms { path: String, reason: String },
    #[error("SQL dbms error: {0}")]
    Sql(String),
    #[error("Unable to create database SQL schema: {0}")]
    Schema(String),
    #[error("No work log with id {0}")]
    NotFound(i64),
    #[error("Invalid value for field '{field}': {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("Unable to render CSV: {0}")]
    Csv(String),
    #[error("Directory creation failed")]
    CreateDir(#[from] io::Error),
    #[error("Invalid listen address: {0}")]
    BadListenAddr(String),
    #[error("Mutex locking error")]
    LockPoisoned,
}

impl From<rusqlite::Error> for WorklogError {
    fn from(err: rusqlite::Error) -> Self {
        WorklogError::Sql(format!("Sqlite error {err}"))
    }
}

impl From<csv::Error> for WorklogError {
    fn from(err: csv::Error) -> Self {
        WorklogError::Csv(format!("{err}"))
    }
}

impl WorklogError {
    /// Convenience constructor for field-level validation failures.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        WorklogError::Validation {
            field,
            reason: reason.into(),
        }
    }
}
