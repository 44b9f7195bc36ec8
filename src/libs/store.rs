//! Persistence contract for the serialized application state.
//!
//! A store holds one record, the JSON-encoded [`AppState`], plus the id
//! high-water mark kept beside it so deleted ids are never handed out again.
//! Saves are synchronous: when `save` returns `Ok`, the record is durable as
//! far as the backend is concerned.
//!
//! [`AppState`]: super::state::AppState

use super::error::{Result, ScheduleError};
use super::task::TaskId;

/// Load/save contract for the state record.
pub trait StateStore {
    /// Returns the stored record, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<String>>;

    /// Replaces the stored record.
    fn save(&mut self, record: &str) -> Result<()>;

    /// Returns the next id to hand out, or `None` when it was never saved.
    fn load_next_id(&self) -> Result<Option<TaskId>>;

    /// Records the next id to hand out.
    fn save_next_id(&mut self, next_id: TaskId) -> Result<()>;
}

/// In-memory store, optionally limited to a byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<String>,
    next_id: Option<TaskId>,
    quota: Option<usize>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an existing record, e.g. a legacy state document.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
            ..Self::default()
        }
    }

    /// Rejects any save larger than `bytes`, like a full browser storage area.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn set_quota(&mut self, bytes: Option<usize>) {
        self.quota = bytes;
    }

    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }

    pub fn next_id(&self) -> Option<TaskId> {
        self.next_id
    }

    /// Number of successful saves so far.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            if record.len() > quota {
                return Err(ScheduleError::PersistenceFailure(format!(
                    "quota exceeded: {} bytes requested, {} allowed",
                    record.len(),
                    quota
                )));
            }
        }
        self.record = Some(record.to_string());
        self.saves += 1;
        Ok(())
    }

    fn load_next_id(&self) -> Result<Option<TaskId>> {
        Ok(self.next_id)
    }

    fn save_next_id(&mut self, next_id: TaskId) -> Result<()> {
        self.next_id = Some(next_id);
        Ok(())
    }
}
