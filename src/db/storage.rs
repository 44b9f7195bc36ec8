use super::db::Db;
use crate::libs::error::Result;
use crate::libs::store::StateStore;
use crate::libs::task::TaskId;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

const SCHEMA_STORAGE: &str = "CREATE TABLE IF NOT EXISTS storage (
    key TEXT NOT NULL PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);";
const SELECT_VALUE: &str = "SELECT value FROM storage WHERE key = ?1";
const UPSERT_VALUE: &str = "INSERT INTO storage (key, value, updated_at) VALUES (?1, ?2, datetime(CURRENT_TIMESTAMP, 'localtime'))
    ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

/// Key the application state record is stored under.
pub const STATE_KEY: &str = "homekeep_state";
/// Key of the id high-water mark.
pub const NEXT_ID_KEY: &str = "homekeep_next_id";

pub struct Storage {
    pub conn: Connection,
}

impl Storage {
    pub fn new() -> Result<Storage> {
        Self::from_db(Db::new()?)
    }

    /// Opens a storage database at an explicit path.
    pub fn open(path: &Path) -> Result<Storage> {
        Self::from_db(Db::open(path)?)
    }

    fn from_db(db: Db) -> Result<Storage> {
        db.conn.execute(SCHEMA_STORAGE, [])?;
        Ok(Storage { conn: db.conn })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(SELECT_VALUE, params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(UPSERT_VALUE, params![key, value])?;
        debug!(key, bytes = value.len(), "storage value written");
        Ok(())
    }
}

impl StateStore for Storage {
    fn load(&self) -> Result<Option<String>> {
        self.get(STATE_KEY)
    }

    fn save(&mut self, record: &str) -> Result<()> {
        self.set(STATE_KEY, record)
    }

    fn load_next_id(&self) -> Result<Option<TaskId>> {
        Ok(self.get(NEXT_ID_KEY)?.and_then(|value| value.trim().parse().ok()))
    }

    fn save_next_id(&mut self, next_id: TaskId) -> Result<()> {
        self.set(NEXT_ID_KEY, &next_id.to_string())
    }
}
