use crate::libs::data_storage::DataStorage;
use crate::libs::error::{Result, ScheduleError};
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "homekeep.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the platform data directory, creating it if needed.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new()
            .get_path(DB_FILE_NAME)
            .map_err(|e| ScheduleError::PersistenceFailure(e.to_string()))?;
        Self::open(&db_file_path)
    }

    pub fn open(path: &Path) -> Result<Db> {
        let conn = Connection::open(path)?;
        Ok(Db { conn })
    }
}
