//! Dashboard and calendar views.
//!
//! Views never hold a reference into the scheduler. They keep their own
//! snapshot, refreshed from the slice handed to every change notification,
//! and read dates straight from each task's single `due_date`.

use super::config::DashboardConfig;
use super::formatter::{annual_cost, format_cost, format_date, format_frequency, format_relative};
use super::task::{Task, TaskFilter, TaskId};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use prettytable::{row, Cell, Row, Table};
use std::collections::BTreeMap;

/// Headline numbers shown above the dashboard table.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total: usize,
    pub overdue: usize,
    pub upcoming: usize,
    pub annual_cost: f64,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    tasks: Vec<Task>,
    config: DashboardConfig,
    refreshes: usize,
}

impl DashboardView {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            tasks: Vec::new(),
            config,
            refreshes: 0,
        }
    }

    /// Replaces the snapshot with the current collection.
    pub fn refresh(&mut self, tasks: &[Task]) {
        self.tasks = tasks.to_vec();
        self.refreshes += 1;
    }

    /// How many times the view has been refreshed.
    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    pub fn due_date_of(&self, id: TaskId) -> Option<NaiveDateTime> {
        self.tasks.iter().find(|t| t.id == id).map(|t| t.due_date)
    }

    pub fn stats(&self, now: NaiveDateTime) -> DashboardStats {
        DashboardStats {
            total: self.tasks.len(),
            overdue: self.tasks.iter().filter(|t| t.is_overdue(now)).count(),
            upcoming: self.filtered(&TaskFilter::Upcoming(self.config.upcoming_days), now).len(),
            annual_cost: annual_cost(&self.tasks),
        }
    }

    /// Tasks matching `filter`, soonest first.
    pub fn filtered(&self, filter: &TaskFilter, now: NaiveDateTime) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| match filter {
                TaskFilter::All => true,
                TaskFilter::Overdue => t.is_overdue(now),
                TaskFilter::Upcoming(days) => !t.is_overdue(now) && due_within(t.due_date, now, *days),
                TaskFilter::Category(category) => t.category == *category,
            })
            .collect();
        tasks.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.id.cmp(&b.id)));
        tasks
    }

    pub fn table(&self, filter: &TaskFilter, now: NaiveDateTime) -> Table {
        let mut table = Table::new();
        table.add_row(row!["ID", "TASK", "CATEGORY", "PRIORITY", "EVERY", "DUE", "STATUS", "COST"]);
        for task in self.filtered(filter, now) {
            table.add_row(row![
                task.id,
                task.title,
                format!("{} {}", task.category.icon(), task.category),
                task.priority,
                format_frequency(task.frequency),
                format_date(&task.due_date),
                format_relative(&task.due_date, now.date()),
                format_cost(task.cost, &self.config.currency)
            ]);
        }
        table
    }

    /// One-line headline of the dashboard stats.
    pub fn summary(&self, now: NaiveDateTime) -> String {
        let stats = self.stats(now);
        format!(
            "Tasks: {}  Overdue: {}  Due in {} days: {}  Projected yearly cost: {}",
            stats.total,
            stats.overdue,
            self.config.upcoming_days,
            stats.upcoming,
            format_cost(stats.annual_cost, &self.config.currency)
        )
    }

    pub fn render(&self, filter: &TaskFilter, now: NaiveDateTime) {
        println!("{}", self.summary(now));
        self.table(filter, now).printstd();
    }
}

// A window past the end of the calendar covers every later date.
fn due_within(due_date: NaiveDateTime, now: NaiveDateTime, days: i64) -> bool {
    match Duration::try_days(days).and_then(|window| now.checked_add_signed(window)) {
        Some(limit) => due_date <= limit,
        None => days > 0,
    }
}

/// Month view grouping tasks by due day.
#[derive(Debug, Clone)]
pub struct CalendarView {
    year: i32,
    month: u32,
    days: BTreeMap<NaiveDate, Vec<(TaskId, String)>>,
    refreshes: usize,
}

impl CalendarView {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            days: BTreeMap::new(),
            refreshes: 0,
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn month(&self) -> (i32, u32) {
        (self.year, self.month)
    }

    /// Indexes every task by its due day. All months are kept so navigation
    /// does not need a new snapshot.
    pub fn refresh(&mut self, tasks: &[Task]) {
        self.days.clear();
        for task in tasks {
            self.days
                .entry(task.due_date.date())
                .or_default()
                .push((task.id, task.title.clone()));
        }
        self.refreshes += 1;
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    pub fn due_date_of(&self, id: TaskId) -> Option<NaiveDate> {
        self.days
            .iter()
            .find(|(_, entries)| entries.iter().any(|(task_id, _)| *task_id == id))
            .map(|(date, _)| *date)
    }

    pub fn tasks_on(&self, date: NaiveDate) -> &[(TaskId, String)] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn next_month(&mut self) {
        if self.month == 12 {
            self.year += 1;
            self.month = 1;
        } else {
            self.month += 1;
        }
    }

    pub fn previous_month(&mut self) {
        if self.month == 1 {
            self.year -= 1;
            self.month = 12;
        } else {
            self.month -= 1;
        }
    }

    fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Days of the displayed month, in order.
    pub fn month_days(&self) -> Vec<NaiveDate> {
        let Some(first) = self.first_day() else { return Vec::new() };
        first.iter_days().take_while(|d| d.month() == self.month).collect()
    }

    /// Monday-first grid, one cell per day, listing task ids due that day.
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"]);
        let days = self.month_days();
        let Some(first) = days.first() else { return table };

        let mut cells: Vec<String> = vec![String::new(); first.weekday().num_days_from_monday() as usize];
        for day in &days {
            let ids: Vec<String> = self.tasks_on(*day).iter().map(|(id, _)| format!("#{id}")).collect();
            cells.push(if ids.is_empty() {
                day.day().to_string()
            } else {
                format!("{}\n{}", day.day(), ids.join(" "))
            });
        }
        while cells.len() % 7 != 0 {
            cells.push(String::new());
        }
        for week in cells.chunks(7) {
            table.add_row(Row::new(week.iter().map(|c| Cell::new(c)).collect()));
        }
        table
    }

    pub fn render(&self) {
        if let Some(first) = self.first_day() {
            println!("{}", first.format("%B %Y"));
        }
        self.table().printstd();
        for day in self.month_days() {
            for (id, title) in self.tasks_on(day) {
                println!("{}  #{:<4} {}", day.format("%b %d"), id, title);
            }
        }
    }
}
