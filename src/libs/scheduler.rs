//! The task scheduling core.
//!
//! [`TaskScheduler`] is the only writer of the task collection. Every mutation
//! runs as one unit: compute the new collection on a copy, persist it, swap it
//! in, then notify subscribers once. If any step fails the in-memory state is
//! left exactly as it was and no subscriber is called.
//!
//! ## Usage
//!
//! ```rust
//! use homekeep::libs::config::ScheduleConfig;
//! use homekeep::libs::scheduler::TaskScheduler;
//! use homekeep::libs::store::MemoryStore;
//! use homekeep::libs::task::{Category, Priority, TaskTemplate};
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let (mut scheduler, _) = TaskScheduler::open(MemoryStore::new(), ScheduleConfig::default(), today)?;
//! let task = scheduler.add_task(TaskTemplate::new("Replace HVAC filter", Category::Hvac, 90, 25.0, Priority::Medium), today)?;
//! scheduler.complete_task(task.id, None)?;
//! # Ok::<(), homekeep::libs::error::ScheduleError>(())
//! ```

use super::config::ScheduleConfig;
use super::error::{Result, ScheduleError};
use super::generator::generate_templates;
use super::schedule::{self, Rescheduled};
use super::state::{decode_state, parse_record, record_id, record_title, AppState, HomeData, PendingTemplate, SCHEMA_VERSION};
use super::store::StateStore;
use super::task::{Task, TaskId, TaskTemplate};
use super::validation::ValidationMode;
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::{debug, info, warn};

pub type SubscriptionId = usize;

type Listener = Box<dyn FnMut(&[Task])>;

/// A template that could not be scheduled, with the reason.
#[derive(Debug)]
pub struct TemplateFailure {
    pub title: String,
    pub error: ScheduleError,
    /// Stored JSON of the record, when the template came from saved state.
    pub record: Option<Value>,
}

/// Outcome of scheduling a batch of templates.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub scheduled: Vec<Task>,
    pub failed: Vec<TemplateFailure>,
}

/// What happened while opening the stored state.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub date_repairs: usize,
    pub normalized: usize,
    /// Tasks whose category label is unknown and reads as `general`.
    pub unknown_categories: usize,
    pub scheduled: usize,
    /// Stored records that could not be loaded. They stay in storage as is.
    pub failed: Vec<TemplateFailure>,
    /// Whether the repaired state was written back.
    pub saved: bool,
}

/// A task removed by [`TaskScheduler::delete_task`].
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedTask {
    pub id: TaskId,
    pub title: String,
}

pub struct TaskScheduler<S: StateStore> {
    store: S,
    config: ScheduleConfig,
    home_data: Option<HomeData>,
    tasks: Vec<Task>,
    held: Vec<Value>,
    next_id: TaskId,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl<S: StateStore> TaskScheduler<S> {
    /// Loads, repairs and, if anything changed, re-saves the stored state.
    ///
    /// Stored records that fail validation or scheduling are reported in the
    /// [`LoadReport`] and kept in storage unchanged. Only `delete_task`
    /// removes them.
    pub fn open(store: S, config: ScheduleConfig, today: NaiveDate) -> Result<(Self, LoadReport)> {
        let mut scheduler = TaskScheduler {
            store,
            config,
            home_data: None,
            tasks: Vec::new(),
            held: Vec::new(),
            next_id: 1,
            listeners: Vec::new(),
            next_subscription: 0,
        };

        let stored_next_id = scheduler.store.load_next_id()?.unwrap_or(1);
        let Some(record) = scheduler.store.load()? else {
            debug!("no stored state, starting empty");
            scheduler.next_id = stored_next_id;
            return Ok((scheduler, LoadReport::default()));
        };

        let decoded = decode_state(parse_record(&record)?, ValidationMode::Load, today)?;
        let repaired = decoded.needs_save();
        let mut report = LoadReport {
            date_repairs: decoded.date_repairs,
            normalized: decoded.normalized,
            unknown_categories: decoded.unknown_categories,
            ..LoadReport::default()
        };

        let mut held = Vec::new();
        for rejected in decoded.rejected {
            warn!(title = %rejected.title, errors = %rejected.errors, "stored task is invalid, keeping it unchanged");
            report.failed.push(TemplateFailure {
                title: rejected.title,
                error: ScheduleError::ValidationFailure(rejected.errors),
                record: Some(rejected.record.clone()),
            });
            held.push(rejected.record);
        }

        let mut tasks = decoded.tasks;
        let mut next_id = next_free_id(&tasks, &decoded.pending, &held).max(stored_next_id);
        let outcome = schedule_pending(decoded.pending, &tasks, &mut next_id, &scheduler.config, today);
        report.scheduled = outcome.scheduled.len();
        tasks.extend(outcome.scheduled);

        for failure in outcome.failed {
            warn!(title = %failure.title, error = %failure.error, "stored task could not be scheduled, keeping it unchanged");
            held.extend(failure.record.clone());
            report.failed.push(failure);
        }
        if report.date_repairs > 0 {
            info!(repairs = report.date_repairs, "repaired diverging due dates");
        }
        if report.normalized > 0 {
            info!(count = report.normalized, "normalized legacy priorities");
        }
        if report.unknown_categories > 0 {
            warn!(count = report.unknown_categories, "stored tasks use unknown categories, shown as general");
        }

        let needs_save = repaired || report.scheduled > 0;
        scheduler.home_data = decoded.home_data;
        scheduler.tasks = tasks;
        scheduler.held = held;
        scheduler.next_id = next_id;

        if needs_save {
            let state = scheduler.snapshot(scheduler.tasks.clone());
            scheduler.store.save(&state.to_record()?)?;
            report.saved = true;
        }

        Ok((scheduler, report))
    }

    /// Current task collection.
    pub fn get_tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Stored records that could not be loaded, as raw JSON.
    pub fn held_records(&self) -> &[Value] {
        &self.held
    }

    /// Title of a task or held record, for prompts.
    pub fn title_of(&self, id: TaskId) -> Option<String> {
        self.task(id).map(|t| t.title.clone()).or_else(|| {
            self.held
                .iter()
                .find(|record| record_id(record) == Some(id))
                .map(record_title)
        })
    }

    pub fn home_data(&self) -> Option<&HomeData> {
        self.home_data.as_ref()
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Registers a callback run after every successful mutation.
    pub fn on_tasks_changed<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&[Task]) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Schedules and adds one template.
    pub fn add_task(&mut self, template: TaskTemplate, today: NaiveDate) -> Result<Task> {
        let due_date = schedule::schedule_initial_due_date(&template, today, &self.config)?;
        let task = template.into_task(self.next_id, due_date);
        let mut tasks = self.tasks.clone();
        tasks.push(task.clone());
        self.commit(self.snapshot(tasks), self.next_id + 1)?;
        debug!(id = task.id, due = %task.due_date, "task added");
        Ok(task)
    }

    /// Schedules a batch of templates. A template that fails is reported and
    /// skipped; the rest are saved together with a single notification.
    pub fn schedule_templates(&mut self, templates: Vec<TaskTemplate>, today: NaiveDate) -> Result<BatchOutcome> {
        let pending = templates.into_iter().map(PendingTemplate::new).collect();
        let mut next_id = self.next_id;
        let outcome = schedule_pending(pending, &self.tasks, &mut next_id, &self.config, today);
        if outcome.scheduled.is_empty() {
            return Ok(outcome);
        }
        let mut tasks = self.tasks.clone();
        tasks.extend(outcome.scheduled.iter().cloned());
        self.commit(self.snapshot(tasks), next_id)?;
        Ok(outcome)
    }

    /// Stores the home description and replaces the task list with the
    /// generated maintenance plan. Held records are kept.
    pub fn setup_home(&mut self, home: HomeData, today: NaiveDate) -> Result<BatchOutcome> {
        let pending = generate_templates(&home, today).into_iter().map(PendingTemplate::new).collect();
        let mut next_id = self.next_id;
        let outcome = schedule_pending(pending, &[], &mut next_id, &self.config, today);
        let mut state = self.snapshot(outcome.scheduled.clone());
        state.home_data = Some(home);
        self.commit(state, next_id)?;
        info!(scheduled = outcome.scheduled.len(), failed = outcome.failed.len(), "home maintenance plan generated");
        Ok(outcome)
    }

    /// Marks the current occurrence done and advances to the next one.
    ///
    /// The next due date is the previous due date plus the frequency, no
    /// matter when the work was actually done. `completed_at` defaults to now
    /// and only feeds `last_completed`.
    pub fn complete_task(&mut self, id: TaskId, completed_at: Option<NaiveDateTime>) -> Result<Task> {
        let index = self.index_of(id)?;
        let completed_at = completed_at.unwrap_or_else(|| Local::now().naive_local());
        let updated = schedule::complete(&self.tasks[index], completed_at)?;
        let mut tasks = self.tasks.clone();
        tasks[index] = updated.clone();
        self.commit(self.snapshot(tasks), self.next_id)?;
        debug!(id, next_due = %updated.due_date, "task completed");
        Ok(updated)
    }

    /// Moves a task to an explicit date. Backdating is allowed and flagged.
    pub fn reschedule_task(&mut self, id: TaskId, new_due_date: &str) -> Result<Rescheduled> {
        let index = self.index_of(id)?;
        let outcome = schedule::reschedule(&self.tasks[index], new_due_date, Local::now().date_naive())?;
        let mut tasks = self.tasks.clone();
        tasks[index] = outcome.task.clone();
        self.commit(self.snapshot(tasks), self.next_id)?;
        if outcome.backdated {
            warn!(id, due = %outcome.task.due_date, "task rescheduled into the past");
        }
        Ok(outcome)
    }

    /// Removes a task, or a held record with that id, for good.
    pub fn delete_task(&mut self, id: TaskId) -> Result<RemovedTask> {
        let mut state = self.snapshot(self.tasks.clone());
        let title = if let Some(index) = state.tasks.iter().position(|t| t.id == id) {
            state.tasks.remove(index).title
        } else if let Some(index) = state.held.iter().position(|record| record_id(record) == Some(id)) {
            record_title(&state.held.remove(index))
        } else {
            return Err(ScheduleError::TaskNotFound(id));
        };
        self.commit(state, self.next_id)?;
        debug!(id, "task deleted");
        Ok(RemovedTask { id, title })
    }

    /// Replaces home data and tasks wholesale, as an import does. Held
    /// records are dropped with the rest of the old state.
    pub(crate) fn replace_all(&mut self, home_data: Option<HomeData>, tasks: Vec<Task>) -> Result<()> {
        let next_id = tasks.iter().map(|t| t.id + 1).max().unwrap_or(1).max(self.next_id);
        let state = AppState {
            home_data,
            tasks,
            version: SCHEMA_VERSION.to_string(),
            held: Vec::new(),
        };
        self.commit(state, next_id)
    }

    pub(crate) fn next_id(&self) -> TaskId {
        self.next_id
    }

    fn index_of(&self, id: TaskId) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(ScheduleError::TaskNotFound(id))
    }

    fn snapshot(&self, tasks: Vec<Task>) -> AppState {
        AppState {
            home_data: self.home_data.clone(),
            tasks,
            version: SCHEMA_VERSION.to_string(),
            held: self.held.clone(),
        }
    }

    // Persist first, then swap, then notify. Nothing changes on failure.
    // The id mark is written before the record, so a failed save can only
    // leave it ahead of the ids in use.
    fn commit(&mut self, state: AppState, next_id: TaskId) -> Result<()> {
        let record = state.to_record()?;
        self.store.save_next_id(next_id)?;
        self.store.save(&record)?;
        self.home_data = state.home_data;
        self.tasks = state.tasks;
        self.held = state.held;
        self.next_id = next_id;
        self.notify();
        Ok(())
    }

    fn notify(&mut self) {
        debug!(listeners = self.listeners.len(), "notifying task subscribers");
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.tasks);
        }
    }
}

fn next_free_id(tasks: &[Task], pending: &[PendingTemplate], held: &[Value]) -> TaskId {
    let from_tasks = tasks.iter().map(|t| t.id);
    let from_pending = pending.iter().filter_map(|p| p.id);
    let from_held = held.iter().filter_map(record_id);
    from_tasks.chain(from_pending).chain(from_held).max().map_or(1, |id| id + 1)
}

/// Schedules undated templates, keeping their stored id when it is free.
pub(crate) fn schedule_pending(
    pending: Vec<PendingTemplate>,
    existing: &[Task],
    next_id: &mut TaskId,
    config: &ScheduleConfig,
    today: NaiveDate,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for PendingTemplate { id, template, record } in pending {
        match schedule::schedule_initial_due_date(&template, today, config) {
            Ok(due_date) => {
                let taken = |candidate: TaskId| {
                    existing.iter().any(|t| t.id == candidate) || outcome.scheduled.iter().any(|t: &Task| t.id == candidate)
                };
                let id = match id {
                    Some(id) if !taken(id) => id,
                    _ => {
                        let id = *next_id;
                        *next_id += 1;
                        id
                    }
                };
                *next_id = (*next_id).max(id + 1);
                outcome.scheduled.push(template.into_task(id, due_date));
            }
            Err(error) => outcome.failed.push(TemplateFailure {
                title: template.title.clone(),
                error,
                record,
            }),
        }
    }
    outcome
}
