use crate::errors::SidebarError;
use crate::storage::KeyValueStore;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

/// Local persistence for the sidebar, one row per key.
pub struct SqliteStore {
    db: Connection,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SidebarError> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, SidebarError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(db: Connection) -> Result<Self, SidebarError> {
        db.execute(
            "CREATE TABLE IF NOT EXISTS local_storage
                (
                    key            TEXT PRIMARY KEY,
                    value          TEXT NOT NULL
                );",
            (),
        )?;
        Ok(Self { db })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, SidebarError> {
        let value = self
            .db
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                (key,),
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SidebarError> {
        self.db.execute(
            "INSERT OR REPLACE INTO local_storage(key, value) VALUES (?1, ?2)",
            (key, value),
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SidebarError> {
        self.db
            .execute("DELETE FROM local_storage WHERE key = ?1", (key,))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get("sidebarToggleYn").unwrap().is_none());
    }

    #[test]
    fn test_set_get_remove() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.set("sidebarToggleYn", "true").unwrap();
        assert_eq!(
            store.get("sidebarToggleYn").unwrap().as_deref(),
            Some("true")
        );

        store.set("sidebarToggleYn", "false").unwrap();
        assert_eq!(
            store.get("sidebarToggleYn").unwrap().as_deref(),
            Some("false")
        );

        store.remove("sidebarToggleYn").unwrap();
        assert!(store.get("sidebarToggleYn").unwrap().is_none());
    }

    #[test]
    fn test_numeric_value_reads_back_as_text() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .db
            .execute(
                "INSERT INTO local_storage(key, value) VALUES ('sidebarToggleYn', ?1)",
                (1_i64,),
            )
            .unwrap();
        assert_eq!(store.get("sidebarToggleYn").unwrap().as_deref(), Some("1"));
    }
}
