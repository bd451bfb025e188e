use rusqlite::Connection;
use std::sync::{Arc, Mutex};

// Application repository modules for the work log store.
pub mod worklog_repository;

// Database-related utilities and managers.
pub mod database_manager;
pub mod sqlite;

/// A thread-safe, shared connection to an ``SQLite`` database,
/// used across the repository layer.
pub type SharedSqliteConnection = Arc<Mutex<Connection>>;
