//! Boolean flag storage

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

#[cfg(test)]
use mockall::automock;

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::version::error::StoreError;

/// Trait for persisting boolean flags by key
#[cfg_attr(test, automock)]
pub trait FlagStore: Send + Sync {
    /// Read a flag; unset keys read as `false`
    fn get_bool(&self, key: &str) -> Result<bool, StoreError>;

    /// Write a flag
    fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError>;
}

/// Flag store backed by a SQLite database
pub struct SqliteFlagStore {
    conn: Mutex<Connection>,
}

impl SqliteFlagStore {
    pub fn new(db_path: &Path) -> Result<Self, StoreError> {
        info!("Opening flag store at {:?}", db_path);

        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::with_connection(conn)
    }

    /// Flag store that lives only as long as the process
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS flags (
                key TEXT PRIMARY KEY,
                value INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
            [],
        )?;
        debug!("Flag schema ready");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl FlagStore for SqliteFlagStore {
    fn get_bool(&self, key: &str) -> Result<bool, StoreError> {
        let conn = self.lock_conn()?;
        let value: Option<bool> = conn
            .query_row("SELECT value FROM flags WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(value.unwrap_or(false))
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        let now = chrono::Utc::now().timestamp_millis();
        let conn = self.lock_conn()?;
        conn.execute(
            r#"
            INSERT INTO flags (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            (key, value, now),
        )?;

        debug!("Set flag {} = {}", key, value);
        Ok(())
    }
}

/// Flag store kept in memory
#[derive(Default)]
pub struct MemoryFlagStore {
    flags: Mutex<HashMap<String, bool>>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryFlagStore {
    fn get_bool(&self, key: &str) -> Result<bool, StoreError> {
        let flags = self.flags.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(flags.get(key).copied().unwrap_or(false))
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        let mut flags = self.flags.lock().map_err(|_| StoreError::LockPoisoned)?;
        flags.insert(key.to_string(), value);
        Ok(())
    }
}
