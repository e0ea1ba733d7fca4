// SQLite store setup and migrations
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

use super::storage::{get_app_data_dir, StorageError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Store initialization failed: {0}")]
    InitFailed(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

// Thread-safe connection wrapper
pub struct StoreConnection {
    conn: Arc<Mutex<Connection>>,
}

impl StoreConnection {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clone for StoreConnection {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

/// Open the store in the app data directory
pub fn init_store() -> StoreResult<StoreConnection> {
    let app_data_dir = get_app_data_dir()?;
    let db_path = app_data_dir.join("plasmalink.db");

    let conn = Connection::open(&db_path)?;
    run_migrations(&conn)?;

    log::info!("Opened preference store at {}", db_path.display());
    Ok(StoreConnection::new(conn))
}

/// Open a migrated in-memory store
pub fn open_in_memory() -> StoreResult<StoreConnection> {
    let conn = Connection::open_in_memory()?;
    run_migrations(&conn)?;
    Ok(StoreConnection::new(conn))
}

/// Highest schema version this build knows how to use
const LATEST_SCHEMA_VERSION: i32 = 1;

fn run_migrations(conn: &Connection) -> StoreResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    let current_version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;

    // Refuse stores written by a newer build
    if current_version > LATEST_SCHEMA_VERSION {
        return Err(StoreError::InitFailed(format!(
            "schema at version {}, newest supported is {}",
            current_version, LATEST_SCHEMA_VERSION
        )));
    }

    if current_version < 1 {
        migration_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (?1)", [1])?;
    }

    Ok(())
}

fn migration_v1(conn: &Connection) -> StoreResult<()> {
    // Key-value preferences, grouped by namespace (one per former prefs file)
    conn.execute(
        "CREATE TABLE IF NOT EXISTS preferences (
            namespace TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (namespace, key)
        )",
        [],
    )?;

    Ok(())
}
