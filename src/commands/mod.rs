//! Command-line interface for homekeep.
//!
//! Each subcommand lives in its own module with an `Args` struct and a
//! `cmd` entry point. Commands that touch tasks open the scheduler through
//! [`open_scheduler`], which also reports any repairs made while loading.

pub mod add;
pub mod calendar;
pub mod complete;
pub mod config;
pub mod delete;
pub mod export;
pub mod import;
pub mod init;
pub mod reschedule;
pub mod tasks;

use crate::db::storage::Storage;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::scheduler::TaskScheduler;
use crate::libs::view::DashboardView;
use crate::{msg_info, msg_warning};
use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Describe your home and generate a maintenance plan")]
    Init(init::InitArgs),
    #[command(about = "Configure scheduling and dashboard settings")]
    Config,
    #[command(about = "Show the task dashboard")]
    Tasks(tasks::TasksArgs),
    #[command(about = "Show tasks on a monthly calendar")]
    Calendar(calendar::CalendarArgs),
    #[command(about = "Add a custom recurring task", arg_required_else_help = true)]
    Add(add::AddArgs),
    #[command(about = "Mark a task done and schedule its next occurrence", arg_required_else_help = true)]
    Complete(complete::CompleteArgs),
    #[command(about = "Move a task to a new due date", arg_required_else_help = true)]
    Reschedule(reschedule::RescheduleArgs),
    #[command(about = "Delete a task", arg_required_else_help = true)]
    Delete(delete::DeleteArgs),
    #[command(about = "Export a backup or a CSV task list")]
    Export(export::ExportArgs),
    #[command(about = "Replace all data with a backup file", arg_required_else_help = true)]
    Import(import::ImportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Config => config::cmd(),
            Commands::Tasks(args) => tasks::cmd(args),
            Commands::Calendar(args) => calendar::cmd(args),
            Commands::Add(args) => add::cmd(args),
            Commands::Complete(args) => complete::cmd(args),
            Commands::Reschedule(args) => reschedule::cmd(args),
            Commands::Delete(args) => delete::cmd(args),
            Commands::Export(args) => export::cmd(args),
            Commands::Import(args) => import::cmd(args),
        }
    }
}

/// Opens the stored state with the configured lead times.
pub(crate) fn open_scheduler(config: &Config) -> Result<TaskScheduler<Storage>> {
    let (scheduler, report) = TaskScheduler::open(Storage::new()?, config.schedule(), Local::now().date_naive())?;
    if report.date_repairs > 0 {
        msg_info!(Message::DatesRepaired(report.date_repairs));
    }
    if report.normalized > 0 {
        msg_info!(Message::PrioritiesNormalized(report.normalized));
    }
    if report.unknown_categories > 0 {
        msg_warning!(Message::UnknownCategories(report.unknown_categories));
    }
    if report.scheduled > 0 {
        msg_info!(Message::StoredTasksScheduled(report.scheduled));
    }
    for failure in &report.failed {
        msg_warning!(Message::StoredTaskUnschedulable {
            title: failure.title.clone(),
            reason: failure.error.to_string(),
        });
    }
    Ok(scheduler)
}

/// Subscribes a dashboard snapshot that follows every change.
pub(crate) fn watch_dashboard(scheduler: &mut TaskScheduler<Storage>, config: &Config) -> Rc<RefCell<DashboardView>> {
    let view = Rc::new(RefCell::new(DashboardView::new(config.dashboard())));
    view.borrow_mut().refresh(scheduler.get_tasks());
    let listener = Rc::clone(&view);
    scheduler.on_tasks_changed(move |tasks| listener.borrow_mut().refresh(tasks));
    view
}
