// Preference CRUD operations
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::db::{StoreConnection, StoreResult};

/// Insert or replace a preference value
pub fn put_preference(
    store: &StoreConnection,
    namespace: &str,
    key: &str,
    value: &str,
) -> StoreResult<()> {
    let conn = store.lock();
    conn.execute(
        "INSERT INTO preferences (namespace, key, value, updated_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(namespace, key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at",
        params![namespace, key, value, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

/// Read a preference value
pub fn get_preference(
    store: &StoreConnection,
    namespace: &str,
    key: &str,
) -> StoreResult<Option<String>> {
    let conn = store.lock();
    let value = conn
        .query_row(
            "SELECT value FROM preferences WHERE namespace = ?1 AND key = ?2",
            params![namespace, key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

/// Delete a preference; returns whether a value existed
pub fn remove_preference(store: &StoreConnection, namespace: &str, key: &str) -> StoreResult<bool> {
    let conn = store.lock();
    let removed = conn.execute(
        "DELETE FROM preferences WHERE namespace = ?1 AND key = ?2",
        params![namespace, key],
    )?;
    Ok(removed > 0)
}
