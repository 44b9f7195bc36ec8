//! Maintenance task data model.
//!
//! A [`TaskTemplate`] is what the setup wizard produces: a task definition with
//! a cadence but no date. The scheduling core turns templates into [`Task`]s,
//! which always carry exactly one authoritative due date.

use super::dates;
use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type TaskId = u64;

/// Fixed set of task categories, used for grouping and icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Category {
    Hvac,
    Plumbing,
    Electrical,
    Exterior,
    Interior,
    Appliances,
    Safety,
    Landscaping,
    Pool,
    Seasonal,
    General,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Hvac,
        Category::Plumbing,
        Category::Electrical,
        Category::Exterior,
        Category::Interior,
        Category::Appliances,
        Category::Safety,
        Category::Landscaping,
        Category::Pool,
        Category::Seasonal,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hvac => "hvac",
            Category::Plumbing => "plumbing",
            Category::Electrical => "electrical",
            Category::Exterior => "exterior",
            Category::Interior => "interior",
            Category::Appliances => "appliances",
            Category::Safety => "safety",
            Category::Landscaping => "landscaping",
            Category::Pool => "pool",
            Category::Seasonal => "seasonal",
            Category::General => "general",
        }
    }

    /// Parses a known category label, ignoring case and surrounding space.
    pub fn parse(raw: &str) -> Option<Category> {
        let raw = raw.trim().to_lowercase();
        Category::ALL.into_iter().find(|c| c.as_str() == raw)
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Hvac => "🌡️",
            Category::Plumbing => "🚰",
            Category::Electrical => "⚡",
            Category::Exterior => "🏠",
            Category::Interior => "🛋️",
            Category::Appliances => "🔌",
            Category::Safety => "🚨",
            Category::Landscaping => "🌳",
            Category::Pool => "🏊",
            Category::Seasonal => "🍂",
            Category::General => "🔧",
        }
    }
}

// Stored data predates the fixed set, so unknown labels fall back to `General`.
impl From<String> for Category {
    fn from(raw: String) -> Self {
        Category::parse(&raw).unwrap_or(Category::General)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority. Older data used `normal`, which reads as `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[serde(alias = "normal")]
    Medium,
    Low,
}

impl Priority {
    /// Parses a stored priority label, including the legacy `normal`.
    pub fn parse(raw: &str) -> Option<Priority> {
        match raw.trim().to_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" | "normal" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse time-of-year anchor for a task's first due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    #[serde(alias = "autumn")]
    Fall,
    Winter,
}

impl Season {
    /// Month whose 15th anchors the season.
    pub fn canonical_month(&self) -> u32 {
        match self {
            Season::Spring => 3,
            Season::Summer => 6,
            Season::Fall => 9,
            Season::Winter => 12,
        }
    }

    pub fn parse(raw: &str) -> Option<Season> {
        match raw.trim().to_lowercase().as_str() {
            "spring" => Some(Season::Spring),
            "summer" => Some(Season::Summer),
            "fall" | "autumn" => Some(Season::Fall),
            "winter" => Some(Season::Winter),
            _ => None,
        }
    }
}

/// A task definition produced by the generation step, before scheduling.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskTemplate {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub frequency: i64,
    pub cost: f64,
    pub priority: Priority,
    pub seasonal_hint: Option<Season>,
}

impl TaskTemplate {
    pub fn new(title: &str, category: Category, frequency: i64, cost: f64, priority: Priority) -> Self {
        TaskTemplate {
            title: title.to_string(),
            description: String::new(),
            category,
            frequency,
            cost,
            priority,
            seasonal_hint: None,
        }
    }

    pub fn described(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn in_season(mut self, season: Season) -> Self {
        self.seasonal_hint = Some(season);
        self
    }

    /// Attaches an id and a due date, producing a scheduled task.
    pub fn into_task(self, id: TaskId, due_date: NaiveDateTime) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            frequency: self.frequency,
            cost: self.cost,
            priority: self.priority,
            due_date,
            last_completed: None,
            is_completed: false,
        }
    }
}

/// A scheduled recurring maintenance task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    /// Days between recurrences.
    pub frequency: i64,
    #[serde(default)]
    pub cost: f64,
    pub priority: Priority,
    #[serde(with = "dates::due_date")]
    pub due_date: NaiveDateTime,
    #[serde(default, with = "dates::optional_timestamp")]
    pub last_completed: Option<NaiveDateTime>,
    #[serde(default)]
    pub is_completed: bool,
}

/// Derived lifecycle state of a scheduled task. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Scheduled,
    Overdue,
}

impl Task {
    pub fn state(&self, now: NaiveDateTime) -> TaskState {
        if self.due_date < now {
            TaskState::Overdue
        } else {
            TaskState::Scheduled
        }
    }

    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.state(now) == TaskState::Overdue
    }

    /// Projected yearly spend for this task, `cost * 365 / frequency`.
    pub fn annual_cost(&self) -> f64 {
        if self.frequency <= 0 {
            return 0.0;
        }
        self.cost * 365.0 / self.frequency as f64
    }
}

#[derive(Debug, Clone)]
pub enum TaskFilter {
    All,
    Overdue,
    /// Due within the given number of days, overdue tasks excluded.
    Upcoming(i64),
    Category(Category),
}
