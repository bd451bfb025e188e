use crate::config::AppConfiguration;
use crate::error::WorklogError;
use crate::repository::database_manager::{DatabaseConfig, DatabaseManager};
use crate::service::worklog_service::WorkLogService;
use std::sync::Arc;

pub mod config;
pub mod error;
pub mod export;
pub mod repository;
pub mod service;
pub mod types;

/// Wires the configuration, the database and the work log service
/// together. The HTTP layer receives this explicitly instead of reaching
/// for process-global state, so tests can build an isolated in-memory
/// runtime per case.
pub struct ApplicationRuntime {
    config: AppConfiguration,
    worklog_service: Arc<WorkLogService>,
}

impl ApplicationRuntime {
    /// Creates a new instance of `ApplicationRuntime` from the process
    /// environment, opening (or creating) the configured SQLite file.
    ///
    /// # Errors
    ///
    /// - Returns an error if the configuration fails to load.
    /// - Returns an error if the database cannot be opened or its schema
    ///   cannot be created.
    pub fn new() -> Result<Self, WorklogError> {
        Self::with_config(config::load()?)
    }

    /// Creates a runtime for an already-loaded configuration.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or its schema
    /// cannot be created.
    pub fn with_config(config: AppConfiguration) -> Result<Self, WorklogError> {
        let database_manager = DatabaseManager::new(&DatabaseConfig::SqliteOnDisk {
            path: config.database_path.clone(),
        })?;
        Ok(Self::assemble(config, &database_manager))
    }

    /// Creates a runtime backed by an in-memory database, for tests.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn in_memory(config: AppConfiguration) -> Result<Self, WorklogError> {
        let database_manager = DatabaseManager::new(&DatabaseConfig::SqliteInMemory)?;
        Ok(Self::assemble(config, &database_manager))
    }

    fn assemble(config: AppConfiguration, database_manager: &DatabaseManager) -> Self {
        let worklog_service = Arc::new(WorkLogService::new(
            database_manager.create_worklog_repository(),
        ));
        ApplicationRuntime {
            config,
            worklog_service,
        }
    }

    pub fn config(&self) -> &AppConfiguration {
        &self.config
    }

    pub fn worklog_service(&self) -> Arc<WorkLogService> {
        self.worklog_service.clone()
    }
}
