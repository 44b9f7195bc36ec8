//! Formatting helpers for dates, costs and recurrence intervals.
//!
//! Used by the dashboard and calendar tables and by command output.
//!
//! ## Examples
//!
//! ```rust
//! use homekeep::libs::formatter::{format_cost, format_frequency};
//!
//! assert_eq!(format_cost(25.0, "$"), "$25.00");
//! assert_eq!(format_frequency(90), "quarterly");
//! assert_eq!(format_frequency(45), "every 45 days");
//! ```

use super::task::Task;
use chrono::{NaiveDate, NaiveDateTime};

/// Formats a due date as `Mon DD, YYYY`.
pub fn format_date(dt: &NaiveDateTime) -> String {
    dt.format("%b %d, %Y").to_string()
}

pub fn format_cost(amount: f64, currency: &str) -> String {
    format!("{}{:.2}", currency, amount.max(0.0))
}

/// Human name for a recurrence interval in days.
pub fn format_frequency(days: i64) -> String {
    match days {
        1 => "daily".to_string(),
        7 => "weekly".to_string(),
        14 => "every 2 weeks".to_string(),
        30 => "monthly".to_string(),
        90 => "quarterly".to_string(),
        180 => "twice a year".to_string(),
        365 => "yearly".to_string(),
        730 => "every 2 years".to_string(),
        d if d > 0 && d % 365 == 0 => format!("every {} years", d / 365),
        d => format!("every {} days", d),
    }
}

/// Describes a due date relative to `today`.
pub fn format_relative(due: &NaiveDateTime, today: NaiveDate) -> String {
    let days = (due.date() - today).num_days();
    match days {
        0 => "due today".to_string(),
        1 => "due tomorrow".to_string(),
        -1 => "overdue by 1 day".to_string(),
        d if d < 0 => format!("overdue by {} days", -d),
        d => format!("in {} days", d),
    }
}

/// Sum of the projected yearly cost of every task.
pub fn annual_cost(tasks: &[Task]) -> f64 {
    tasks.iter().map(Task::annual_cost).sum()
}
