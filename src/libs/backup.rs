//! Full-state backup export and import.
//!
//! A backup is the persisted state record plus an `exportDate`. Importing
//! validates the whole file first and applies nothing unless every field
//! passes; a valid backup replaces the home data and task list in one commit.
//!
//! ## Usage
//!
//! ```rust
//! use homekeep::libs::backup::{export_backup, import_backup};
//! use homekeep::libs::config::ScheduleConfig;
//! use homekeep::libs::scheduler::TaskScheduler;
//! use homekeep::libs::store::MemoryStore;
//! use chrono::{Local, NaiveDate};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let (source, _) = TaskScheduler::open(MemoryStore::new(), ScheduleConfig::default(), today)?;
//! let json = export_backup(&source, Local::now().naive_local()).to_json()?;
//!
//! // A backup without home data is rejected and changes nothing.
//! let (mut target, _) = TaskScheduler::open(MemoryStore::new(), ScheduleConfig::default(), today)?;
//! assert!(import_backup(&mut target, &json, today).is_err());
//! assert!(target.get_tasks().is_empty());
//! # Ok::<(), homekeep::libs::error::ScheduleError>(())
//! ```

use super::dates;
use super::error::{Result, ScheduleError};
use super::scheduler::{schedule_pending, TaskScheduler};
use super::state::{decode_state, parse_record, HomeData, SCHEMA_VERSION};
use super::store::StateStore;
use super::task::Task;
use super::validation::ValidationMode;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Backup file layout: the state record plus its export timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub home_data: Option<HomeData>,
    pub tasks: Vec<Task>,
    pub version: String,
    #[serde(with = "dates::timestamp")]
    pub export_date: NaiveDateTime,
}

impl ExportDocument {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ScheduleError::PersistenceFailure(e.to_string()))
    }
}

/// Summary of an applied import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    pub tasks: usize,
    /// Undated records that were given a first due date.
    pub scheduled: usize,
    pub date_repairs: usize,
    pub normalized: usize,
    pub unknown_categories: usize,
}

/// Snapshot of the scheduler's state as a backup document. Held records are
/// not exported, since an import would reject them.
pub fn export_backup<S: StateStore>(scheduler: &TaskScheduler<S>, now: NaiveDateTime) -> ExportDocument {
    ExportDocument {
        home_data: scheduler.home_data().cloned(),
        tasks: scheduler.get_tasks().to_vec(),
        version: SCHEMA_VERSION.to_string(),
        export_date: now,
    }
}

/// Validates and applies a backup document.
///
/// Any validation problem rejects the file as a whole with an itemised
/// `ValidationFailure`; the scheduler is not touched.
pub fn import_backup<S: StateStore>(scheduler: &mut TaskScheduler<S>, document: &str, today: NaiveDate) -> Result<ImportSummary> {
    let root = parse_record(document)?;
    let decoded = decode_state(root, ValidationMode::Import, today)?;
    let mut tasks = decoded.tasks;
    let mut next_id = tasks
        .iter()
        .map(|t| t.id + 1)
        .chain(decoded.pending.iter().filter_map(|p| p.id.map(|id| id + 1)))
        .max()
        .unwrap_or(1)
        .max(scheduler.next_id());
    let outcome = schedule_pending(decoded.pending, &tasks, &mut next_id, scheduler.config(), today);
    if let Some(failure) = outcome.failed.into_iter().next() {
        return Err(failure.error);
    }

    let summary = ImportSummary {
        tasks: tasks.len() + outcome.scheduled.len(),
        scheduled: outcome.scheduled.len(),
        date_repairs: decoded.date_repairs,
        normalized: decoded.normalized,
        unknown_categories: decoded.unknown_categories,
    };
    tasks.extend(outcome.scheduled);
    scheduler.replace_all(decoded.home_data, tasks)?;
    tracing::info!(tasks = summary.tasks, "backup imported");
    Ok(summary)
}

/// Writes the task list as CSV, one row per task.
pub fn write_tasks_csv<W: Write>(tasks: &[Task], writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["id", "title", "category", "priority", "frequency", "cost", "dueDate", "lastCompleted"])?;
    for task in tasks {
        wtr.write_record([
            task.id.to_string(),
            task.title.clone(),
            task.category.to_string(),
            task.priority.to_string(),
            task.frequency.to_string(),
            format!("{:.2}", task.cost),
            dates::format_timestamp(&task.due_date),
            task.last_completed.as_ref().map(dates::format_timestamp).unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
