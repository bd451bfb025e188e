use crate::error::WorklogError;
use crate::repository::SharedSqliteConnection;

pub mod sqlite_worklog_repo;

/// Creates the entire database schema by running schema creation functions
/// for all entities.
#[allow(clippy::module_name_repetitions)]
pub(crate) fn create_schema(connection: &SharedSqliteConnection) -> Result<(), WorklogError> {
    sqlite_worklog_repo::create_work_log_table(connection)?;
    Ok(())
}
