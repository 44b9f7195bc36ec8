//! Error taxonomy for the task scheduling core.
//!
//! Scheduling computations (`InvalidFrequency`, `InvalidDate`) fail a single
//! task and never the batch it belongs to. Persistence and validation failures
//! always leave the in-memory collection exactly as it was before the call.

use super::task::TaskId;
use std::fmt;

/// A single offending field reported by import validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path of the field, e.g. `homeData.state` or `tasks[3].frequency`.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Itemised list of validation problems found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Names of every offending field, in discovery order.
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.field.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", items.join("; "))
    }
}

/// Errors raised by scheduling, persistence and import operations.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// Frequency was zero, negative or not a number.
    #[error("invalid frequency {frequency}: must be a positive number of days")]
    InvalidFrequency { frequency: i64 },

    /// A date could not be parsed or falls outside the calendar.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// The referenced task id is not in the collection.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    /// The storage backend rejected the write.
    #[error("failed to persist tasks: {0}")]
    PersistenceFailure(String),

    /// An imported document did not pass validation.
    #[error("validation failed: {0}")]
    ValidationFailure(ValidationErrors),
}

impl From<rusqlite::Error> for ScheduleError {
    fn from(err: rusqlite::Error) -> Self {
        ScheduleError::PersistenceFailure(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
