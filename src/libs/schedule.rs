//! Pure scheduling rules for recurring maintenance tasks.
//!
//! Nothing here touches storage or observers; [`TaskScheduler`] wraps these
//! functions with the mutate, persist, notify sequence.
//!
//! [`TaskScheduler`]: super::scheduler::TaskScheduler

use super::config::ScheduleConfig;
use super::dates::{at_midday, parse_due_date};
use super::error::{Result, ScheduleError};
use super::task::{Priority, Season, Task, TaskTemplate};
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Persisted field holding the authoritative due date.
pub const DUE_DATE_FIELD: &str = "dueDate";

/// Shadow copy of the due date written by older calendar code.
pub const SHADOW_DUE_FIELD: &str = "nextDue";

/// Day of the canonical month that anchors a seasonal task.
pub const SEASONAL_ANCHOR_DAY: u32 = 15;

pub fn validate_frequency(frequency: i64) -> Result<()> {
    if frequency <= 0 {
        return Err(ScheduleError::InvalidFrequency { frequency });
    }
    Ok(())
}

fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    let days = u64::try_from(days).map_err(|_| ScheduleError::InvalidDate(format!("{date} + {days} days")))?;
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| ScheduleError::InvalidDate(format!("{date} + {days} days")))
}

/// Resolves a season to the 15th of its canonical month, this year or next.
///
/// The current year is used up to and including the anchor day; any later
/// date rolls over to the following year.
pub fn seasonal_due_date(season: Season, today: NaiveDate) -> Result<NaiveDate> {
    let month = season.canonical_month();
    let this_year = NaiveDate::from_ymd_opt(today.year(), month, SEASONAL_ANCHOR_DAY)
        .ok_or_else(|| ScheduleError::InvalidDate(format!("{}-{month:02}-{SEASONAL_ANCHOR_DAY}", today.year())))?;
    if today <= this_year {
        return Ok(this_year);
    }
    NaiveDate::from_ymd_opt(today.year() + 1, month, SEASONAL_ANCHOR_DAY)
        .ok_or_else(|| ScheduleError::InvalidDate(format!("{}-{month:02}-{SEASONAL_ANCHOR_DAY}", today.year() + 1)))
}

/// Lead time before a freshly generated, non-seasonal task first falls due.
pub fn lead_days(priority: Priority, frequency: i64, config: &ScheduleConfig) -> i64 {
    if priority == Priority::High {
        config.high_priority_lead_days
    } else if frequency <= config.short_cycle_max_frequency {
        config.short_cycle_lead_days
    } else {
        config.default_lead_days
    }
}

/// Computes the first due date of a template task.
pub fn schedule_initial_due_date(template: &TaskTemplate, today: NaiveDate, config: &ScheduleConfig) -> Result<NaiveDateTime> {
    validate_frequency(template.frequency)?;
    let date = match template.seasonal_hint {
        Some(season) => seasonal_due_date(season, today)?,
        None => add_days(today, lead_days(template.priority, template.frequency, config))?,
    };
    Ok(at_midday(date))
}

/// Next occurrence on a fixed cadence: previous due date plus the frequency.
pub fn next_due_date(previous: NaiveDateTime, frequency: i64) -> Result<NaiveDateTime> {
    validate_frequency(frequency)?;
    Ok(at_midday(add_days(previous.date(), frequency)?))
}

/// Advances a task to its next occurrence.
///
/// `completed_at` is only recorded for display; it never shifts the cadence.
pub fn complete(task: &Task, completed_at: NaiveDateTime) -> Result<Task> {
    let due_date = next_due_date(task.due_date, task.frequency)?;
    Ok(Task {
        due_date,
        last_completed: Some(completed_at),
        is_completed: false,
        ..task.clone()
    })
}

/// Outcome of an explicit reschedule.
#[derive(Debug, Clone, PartialEq)]
pub struct Rescheduled {
    pub task: Task,
    /// Set when the new date lies before `today`.
    pub backdated: bool,
}

/// Moves a task to a user-chosen date. Past dates are allowed.
pub fn reschedule(task: &Task, new_due_date: &str, today: NaiveDate) -> Result<Rescheduled> {
    let due_date = parse_due_date(new_due_date)?;
    Ok(Rescheduled {
        backdated: due_date.date() < today,
        task: Task { due_date, ..task.clone() },
    })
}

fn has_date(record: &Value, field: &str) -> bool {
    matches!(record.get(field), Some(Value::String(s)) if !s.trim().is_empty())
}

/// Repairs divergence between `dueDate` and its legacy shadow copy.
///
/// Whichever field is missing is filled from the other; when both exist and
/// differ, `dueDate` wins. Records that never carried the shadow key are not
/// a pair and are left alone. Returns the number of records touched. Running it
/// a second time over the same records repairs nothing.
pub fn ensure_date_consistency(records: &mut [Value]) -> usize {
    let mut repairs = 0;
    for record in records.iter_mut() {
        let Some(fields) = record.as_object_mut() else { continue };
        let primary = fields.get(DUE_DATE_FIELD).filter(|v| has_date_value(v)).cloned();
        let shadow = fields.get(SHADOW_DUE_FIELD).filter(|v| has_date_value(v)).cloned();
        match (primary, shadow) {
            (None, Some(shadow)) => {
                fields.insert(DUE_DATE_FIELD.to_string(), shadow);
                repairs += 1;
            }
            (Some(primary), None) if fields.contains_key(SHADOW_DUE_FIELD) => {
                fields.insert(SHADOW_DUE_FIELD.to_string(), primary);
                repairs += 1;
            }
            (Some(primary), Some(shadow)) if primary != shadow => {
                fields.insert(SHADOW_DUE_FIELD.to_string(), primary);
                repairs += 1;
            }
            _ => {}
        }
    }
    repairs
}

fn has_date_value(value: &&Value) -> bool {
    matches!(value, Value::String(s) if !s.trim().is_empty())
}

/// Drops the shadow field once the pair agrees, leaving `dueDate` as the
/// only date on the record.
pub fn strip_shadow_dates(records: &mut [Value]) {
    for record in records.iter_mut() {
        if let Some(fields) = record.as_object_mut() {
            fields.remove(SHADOW_DUE_FIELD);
        }
    }
}

/// Returns true if the record carries a usable `dueDate`.
pub fn is_scheduled_record(record: &Value) -> bool {
    has_date(record, DUE_DATE_FIELD)
}
