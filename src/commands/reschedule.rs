use super::{open_scheduler, watch_dashboard};
use crate::{
    libs::{config::Config, dates, formatter::format_date, messages::Message, view::CalendarView},
    msg_bail_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Args)]
pub struct RescheduleArgs {
    #[arg(required = true)]
    id: u64,

    /// New due date (YYYY-MM-DD)
    #[arg(required = true)]
    date: String,

    /// Do not ask before moving a task into the past
    #[arg(short, long)]
    yes: bool,
}

pub fn cmd(args: RescheduleArgs) -> Result<()> {
    let config = Config::read()?;
    let mut scheduler = open_scheduler(&config)?;

    let Some(task) = scheduler.task(args.id) else {
        msg_bail_anyhow!(Message::TaskNotFound(args.id));
    };
    let Ok(new_due) = dates::parse_due_date(&args.date) else {
        msg_bail_anyhow!(Message::InvalidDate(args.date.clone()));
    };
    let title = task.title.clone();

    if new_due.date() < Local::now().date_naive() && !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmBackdate(format_date(&new_due)).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    let dashboard = watch_dashboard(&mut scheduler, &config);
    let calendar = Rc::new(RefCell::new(CalendarView::for_date(new_due.date())));
    let listener = Rc::clone(&calendar);
    scheduler.on_tasks_changed(move |tasks| listener.borrow_mut().refresh(tasks));

    let outcome = scheduler.reschedule_task(args.id, &args.date)?;
    if outcome.backdated {
        msg_warning!(Message::TaskRescheduledIntoPast(format_date(&outcome.task.due_date)));
    }
    msg_success!(Message::TaskRescheduled {
        title,
        due: format_date(&outcome.task.due_date),
    });
    msg_print!(dashboard.borrow().summary(Local::now().naive_local()));
    calendar.borrow().render();
    Ok(())
}
