use crate::error::WorklogError;
use crate::repository::worklog_repository::WorkLogRepository;
use crate::repository::SharedSqliteConnection;
use crate::types::{SortOrder, WorkLog, WorkLogInput};
use chrono::{NaiveDate, Utc};
use log::debug;
use rusqlite::{named_params, params, Connection};

pub struct SqliteWorkLogRepository {
    connection: SharedSqliteConnection,
}

/// SQL statement to create the `work_log` table.
///
/// AUTOINCREMENT keeps assigned ids strictly increasing: a rowid is never
/// handed out twice, even if the highest row were ever removed by hand.
const CREATE_WORK_LOG_TABLE_SQL: &str = r"
    CREATE TABLE IF NOT EXISTS work_log (
        id integer primary key autoincrement not null,
        created_at datetime not null,
        updated_at datetime not null,
        is_deleted integer not null default 0,
        work_date date not null,
        category varchar(64) not null default 'work',
        ro_number varchar(64),
        description text,
        flat_hours real not null default 0.0,
        cash_amount real not null default 0.0,
        location varchar(128)
    );
";

/// Creates the `work_log` table in the database.
pub fn create_work_log_table(connection: &SharedSqliteConnection) -> Result<(), WorklogError> {
    let conn = connection.lock().map_err(|_| WorklogError::LockPoisoned)?;
    conn.execute(CREATE_WORK_LOG_TABLE_SQL, [])
        .map_err(|e| WorklogError::Schema(format!("Unable to create table 'work_log': {e}")))?;
    Ok(())
}

impl SqliteWorkLogRepository {
    pub(crate) fn new(connection: SharedSqliteConnection) -> Self {
        Self { connection }
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<WorkLog> {
        Ok(WorkLog {
            id: row.get(0)?,
            created_at: row.get(1)?,
            updated_at: row.get(2)?,
            is_deleted: row.get(3)?,
            work_date: row.get(4)?,
            category: row.get(5)?,
            ro_number: row.get(6)?,
            description: row.get(7)?,
            flat_hours: row.get(8)?,
            cash_amount: row.get(9)?,
            location: row.get(10)?,
        })
    }

    fn fetch_by_id(conn: &Connection, id: i64) -> Result<WorkLog, WorklogError> {
        let mut stmt = conn.prepare(
            "SELECT id, created_at, updated_at, is_deleted, work_date, category, ro_number, description, flat_hours, cash_amount, location
             FROM work_log WHERE id = ?1",
        )?;
        match stmt.query_row(params![id], Self::map_row) {
            Ok(work_log) => Ok(work_log),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(WorklogError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }
}

impl WorkLogRepository for SqliteWorkLogRepository {
    fn insert(&self, input: &WorkLogInput) -> Result<WorkLog, WorklogError> {
        debug!("Adding {:?} to DBMS", &input);
        let conn = self
            .connection
            .lock()
            .map_err(|_| WorklogError::LockPoisoned)?;
        let now = Utc::now();
        conn.execute(
            "INSERT INTO work_log (
            created_at, updated_at, is_deleted, work_date, category, ro_number, description, flat_hours, cash_amount, location
        ) VALUES (
            :created_at, :updated_at, 0, :work_date, :category, :ro_number, :description, :flat_hours, :cash_amount, :location
        )",
            named_params! {
            ":created_at": now.to_rfc3339(),
            ":updated_at": now.to_rfc3339(),
            ":work_date": input.work_date,
            ":category": input.category,
            ":ro_number": input.ro_number,
            ":description": input.description,
            ":flat_hours": input.flat_hours,
            ":cash_amount": input.cash_amount,
            ":location": input.location
            },
        )
        .map_err(|e| WorklogError::Sql(format!("Unable to insert into work_log: {e}")))?;

        let id = conn.last_insert_rowid();
        Self::fetch_by_id(&conn, id)
    }

    fn insert_batch(&self, inputs: &[WorkLogInput]) -> Result<usize, WorklogError> {
        let mut conn = self
            .connection
            .lock()
            .map_err(|_| WorklogError::LockPoisoned)?;
        let now = Utc::now();

        // All-or-nothing: a failing row rolls the whole batch back.
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                r"
                INSERT INTO work_log
                    (created_at, updated_at, is_deleted, work_date, category, ro_number, description, flat_hours, cash_amount, location)
                VALUES (?, ?, 0, ?, ?, ?, ?, ?, ?, ?)
            ",
            )?;

            for input in inputs {
                stmt.execute(params![
                    now.to_rfc3339(),
                    now.to_rfc3339(),
                    input.work_date,
                    input.category,
                    input.ro_number,
                    input.description,
                    input.flat_hours,
                    input.cash_amount,
                    input.location,
                ])?;
            }
        }
        tx.commit()?;

        Ok(inputs.len())
    }

    fn update(&self, id: i64, input: &WorkLogInput) -> Result<WorkLog, WorklogError> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| WorklogError::LockPoisoned)?;
        // The lookup deliberately spans soft-deleted rows; only the
        // mutable fields and updated_at are rewritten.
        let changed = conn.execute(
            "UPDATE work_log SET
                work_date = :work_date,
                category = :category,
                ro_number = :ro_number,
                description = :description,
                flat_hours = :flat_hours,
                cash_amount = :cash_amount,
                location = :location,
                updated_at = :updated_at
             WHERE id = :id",
            named_params! {
            ":id": id,
            ":work_date": input.work_date,
            ":category": input.category,
            ":ro_number": input.ro_number,
            ":description": input.description,
            ":flat_hours": input.flat_hours,
            ":cash_amount": input.cash_amount,
            ":location": input.location,
            ":updated_at": Utc::now().to_rfc3339()
            },
        )?;
        if changed == 0 {
            return Err(WorklogError::NotFound(id));
        }
        Self::fetch_by_id(&conn, id)
    }

    fn soft_delete(&self, id: i64) -> Result<(), WorklogError> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| WorklogError::LockPoisoned)?;
        // Matches already-deleted rows too: repeating a delete succeeds
        // and refreshes updated_at again.
        let changed = conn.execute(
            "UPDATE work_log SET is_deleted = 1, updated_at = ?1 WHERE id = ?2",
            params![Utc::now().to_rfc3339(), id],
        )?;
        if changed == 0 {
            return Err(WorklogError::NotFound(id));
        }
        Ok(())
    }

    fn find_by_id(&self, id: i64) -> Result<WorkLog, WorklogError> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| WorklogError::LockPoisoned)?;
        Self::fetch_by_id(&conn, id)
    }

    fn find_active(
        &self,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
        order: SortOrder,
    ) -> Result<Vec<WorkLog>, WorklogError> {
        // Base SQL query
        let mut sql = String::from(
            "SELECT id, created_at, updated_at, is_deleted, work_date, category, ro_number, description, flat_hours, cash_amount, location
         FROM work_log
         WHERE is_deleted = 0",
        );

        // Dynamic parameters for the query
        let mut sql_params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(from_date) = from_date {
            sql.push_str(" AND work_date >= ?");
            sql_params.push(Box::new(from_date));
        }
        if let Some(to_date) = to_date {
            sql.push_str(" AND work_date <= ?");
            sql_params.push(Box::new(to_date));
        }

        match order {
            SortOrder::Descending => sql.push_str(" ORDER BY work_date DESC, id DESC"),
            SortOrder::Ascending => sql.push_str(" ORDER BY work_date ASC, id ASC"),
        }

        // Convert `sql_params` to a slice of `&dyn ToSql`
        let params_slice: Vec<&dyn rusqlite::ToSql> =
            sql_params.iter().map(AsRef::as_ref).collect();

        debug!("find_active():- {sql}");

        let conn = self
            .connection
            .lock()
            .map_err(|_| WorklogError::LockPoisoned)?;
        let mut stmt = conn.prepare(&sql)?;

        let work_logs = stmt
            .query_map(params_slice.as_slice(), Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(work_logs)
    }

    fn count(&self) -> Result<i64, WorklogError> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| WorklogError::LockPoisoned)?;
        let mut stmt = conn.prepare("select count(*) from work_log").map_err(|e| {
            WorklogError::Sql(format!("Unable to retrieve count(*) from work_log: {e}"))
        })?;
        let count = stmt.query_row([], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::sqlite::tests::test_database_manager;

    fn sample_input(date: &str) -> WorkLogInput {
        WorkLogInput::for_date(date.parse().unwrap())
    }

    #[test]
    fn insert_assigns_increasing_ids() -> Result<(), WorklogError> {
        let db_manager = test_database_manager()?;
        let repo = db_manager.create_worklog_repository();

        let first = repo.insert(&sample_input("2024-01-05"))?;
        let second = repo.insert(&sample_input("2024-01-06"))?;
        assert!(second.id > first.id);

        repo.soft_delete(second.id)?;
        let third = repo.insert(&sample_input("2024-01-07"))?;
        assert!(third.id > second.id, "ids must never be reused");

        assert_eq!(repo.count()?, 3);
        Ok(())
    }

    #[test]
    fn insert_sets_both_timestamps_and_defaults() -> Result<(), WorklogError> {
        let db_manager = test_database_manager()?;
        let repo = db_manager.create_worklog_repository();

        let created = repo.insert(&sample_input("2024-01-05"))?;
        assert_eq!(created.created_at, created.updated_at);
        assert!(!created.is_deleted);
        assert_eq!(created.category, "work");
        assert_eq!(created.flat_hours, 0.0);
        Ok(())
    }

    #[test]
    fn find_by_id_reports_not_found() -> Result<(), WorklogError> {
        let db_manager = test_database_manager()?;
        let repo = db_manager.create_worklog_repository();

        match repo.find_by_id(42) {
            Err(WorklogError::NotFound(42)) => Ok(()),
            other => panic!("expected NotFound(42), got {other:?}"),
        }
    }

    #[test]
    fn update_replaces_fields_and_keeps_identity() -> Result<(), WorklogError> {
        let db_manager = test_database_manager()?;
        let repo = db_manager.create_worklog_repository();

        let created = repo.insert(&sample_input("2024-01-05"))?;

        let replacement = WorkLogInput {
            work_date: "2024-02-01".parse().unwrap(),
            category: "diag".to_string(),
            ro_number: Some("RO-1001".to_string()),
            description: Some("replaced".to_string()),
            flat_hours: 2.5,
            cash_amount: 150.0,
            location: Some("bay 3".to_string()),
        };
        let updated = repo.update(created.id, &replacement)?;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(!updated.is_deleted);
        assert_eq!(updated.work_date.to_string(), "2024-02-01");
        assert_eq!(updated.category, "diag");
        assert_eq!(updated.ro_number, Some("RO-1001".to_string()));
        assert_eq!(updated.flat_hours, 2.5);
        assert!(updated.updated_at > created.updated_at);
        Ok(())
    }

    #[test]
    fn update_unknown_id_reports_not_found() -> Result<(), WorklogError> {
        let db_manager = test_database_manager()?;
        let repo = db_manager.create_worklog_repository();

        match repo.update(99, &sample_input("2024-01-05")) {
            Err(WorklogError::NotFound(99)) => {}
            other => panic!("expected NotFound(99), got {other:?}"),
        }
        assert_eq!(repo.count()?, 0, "a failed update must not create rows");
        Ok(())
    }

    #[test]
    fn soft_delete_hides_record_but_keeps_row() -> Result<(), WorklogError> {
        let db_manager = test_database_manager()?;
        let repo = db_manager.create_worklog_repository();

        let created = repo.insert(&sample_input("2024-01-05"))?;
        repo.soft_delete(created.id)?;

        let listed = repo.find_active(None, None, SortOrder::Descending)?;
        assert!(listed.is_empty());

        let fetched = repo.find_by_id(created.id)?;
        assert!(fetched.is_deleted);
        assert_eq!(repo.count()?, 1);
        Ok(())
    }

    #[test]
    fn soft_delete_twice_succeeds_and_bumps_updated_at() -> Result<(), WorklogError> {
        let db_manager = test_database_manager()?;
        let repo = db_manager.create_worklog_repository();

        let created = repo.insert(&sample_input("2024-01-05"))?;
        repo.soft_delete(created.id)?;
        let after_first = repo.find_by_id(created.id)?;

        repo.soft_delete(created.id)?;
        let after_second = repo.find_by_id(created.id)?;

        assert!(after_second.is_deleted);
        assert!(after_second.updated_at > after_first.updated_at);
        Ok(())
    }

    #[test]
    fn update_on_deleted_record_keeps_the_flag() -> Result<(), WorklogError> {
        let db_manager = test_database_manager()?;
        let repo = db_manager.create_worklog_repository();

        let created = repo.insert(&sample_input("2024-01-05"))?;
        repo.soft_delete(created.id)?;

        let mut replacement = sample_input("2024-03-01");
        replacement.description = Some("still hidden".to_string());
        let updated = repo.update(created.id, &replacement)?;

        assert!(updated.is_deleted);
        assert_eq!(updated.description, Some("still hidden".to_string()));
        assert!(repo.find_active(None, None, SortOrder::Descending)?.is_empty());
        Ok(())
    }

    #[test]
    fn find_active_filters_inclusive_range_and_orders() -> Result<(), WorklogError> {
        let db_manager = test_database_manager()?;
        let repo = db_manager.create_worklog_repository();

        for date in ["2024-01-01", "2024-01-03", "2024-01-05", "2024-01-07"] {
            repo.insert(&sample_input(date))?;
        }

        let all_desc = repo.find_active(None, None, SortOrder::Descending)?;
        let dates: Vec<String> = all_desc.iter().map(|w| w.work_date.to_string()).collect();
        assert_eq!(dates, ["2024-01-07", "2024-01-05", "2024-01-03", "2024-01-01"]);

        let bounded = repo.find_active(
            Some("2024-01-03".parse().unwrap()),
            Some("2024-01-05".parse().unwrap()),
            SortOrder::Ascending,
        )?;
        let dates: Vec<String> = bounded.iter().map(|w| w.work_date.to_string()).collect();
        assert_eq!(dates, ["2024-01-03", "2024-01-05"]);
        Ok(())
    }

    #[test]
    fn find_active_same_date_ties_break_on_id() -> Result<(), WorklogError> {
        let db_manager = test_database_manager()?;
        let repo = db_manager.create_worklog_repository();

        let first = repo.insert(&sample_input("2024-01-05"))?;
        let second = repo.insert(&sample_input("2024-01-05"))?;

        let desc = repo.find_active(None, None, SortOrder::Descending)?;
        assert_eq!(desc[0].id, second.id);
        assert_eq!(desc[1].id, first.id);

        let asc = repo.find_active(None, None, SortOrder::Ascending)?;
        assert_eq!(asc[0].id, first.id);
        assert_eq!(asc[1].id, second.id);
        Ok(())
    }

    #[test]
    fn insert_batch_creates_every_record() -> Result<(), WorklogError> {
        let db_manager = test_database_manager()?;
        let repo = db_manager.create_worklog_repository();

        let inputs = vec![
            sample_input("2024-02-01"),
            sample_input("2024-02-02"),
            sample_input("2024-02-03"),
        ];
        let imported = repo.insert_batch(&inputs)?;

        assert_eq!(imported, 3);
        assert_eq!(repo.count()?, 3);
        let listed = repo.find_active(None, None, SortOrder::Descending)?;
        assert_eq!(listed[0].work_date.to_string(), "2024-02-03");
        Ok(())
    }
}
