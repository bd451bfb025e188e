use crate::error::WorklogError;
use crate::repository::sqlite;
use crate::repository::sqlite::sqlite_worklog_repo::SqliteWorkLogRepository;
use crate::repository::SharedSqliteConnection;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Represents parameters for initializing the database connection
pub enum DatabaseConfig {
    /// SQLite database with a specific file path
    SqliteOnDisk { path: PathBuf },

    /// SQLite database that runs entirely in memory
    SqliteInMemory,
}

pub struct DatabaseManager {
    connection: SharedSqliteConnection,
}

impl DatabaseManager {
    /// Creates a new `DatabaseManager` based on the provided configuration.
    ///
    /// For an on-disk database the parent directories are created if
    /// needed. The schema is initialized on open.
    ///
    /// # Errors
    /// Returns a `WorklogError` if the database cannot be opened, the
    /// directory creation fails, or the schema cannot be created.
    pub fn new(config: &DatabaseConfig) -> Result<Self, WorklogError> {
        let connection = match config {
            DatabaseConfig::SqliteOnDisk { path } => {
                if let Some(parent) = path.parent() {
                    if !parent.exists() {
                        fs::create_dir_all(parent)?;
                    }
                }
                Connection::open(path).map_err(|e| WorklogError::OpenDbms {
                    path: path.to_string_lossy().into(),
                    reason: e.to_string(),
                })?
            }
            DatabaseConfig::SqliteInMemory => Connection::open_in_memory()?,
        };

        let connection = Arc::new(Mutex::new(connection));

        // Creates the schema if needed
        sqlite::create_schema(&connection)?;

        Ok(Self { connection })
    }

    /// Provide access to the shared database connection.
    pub(crate) fn get_connection(&self) -> SharedSqliteConnection {
        self.connection.clone()
    }

    pub fn create_worklog_repository(&self) -> Arc<SqliteWorkLogRepository> {
        Arc::new(SqliteWorkLogRepository::new(self.get_connection()))
    }
}
