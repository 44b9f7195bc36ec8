use super::open_scheduler;
use crate::{
    libs::{
        config::Config,
        messages::Message,
        task::{Category, TaskFilter},
        view::DashboardView,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

/// Longest `--upcoming` window, in days.
const MAX_UPCOMING_DAYS: i64 = 36_500;

#[derive(Debug, Args)]
pub struct TasksArgs {
    /// Only overdue tasks
    #[arg(short, long, conflicts_with_all = ["upcoming", "category"])]
    overdue: bool,

    /// Only tasks due within N days (defaults to the configured window)
    #[arg(
        short,
        long,
        num_args = 0..=1,
        default_missing_value = "0",
        value_parser = clap::value_parser!(i64).range(0..=MAX_UPCOMING_DAYS),
        conflicts_with = "category"
    )]
    upcoming: Option<i64>,

    /// Only tasks in this category
    #[arg(short, long, value_enum)]
    category: Option<Category>,
}

pub fn cmd(args: TasksArgs) -> Result<()> {
    let config = Config::read()?;
    let scheduler = open_scheduler(&config)?;
    if scheduler.home_data().is_none() && scheduler.get_tasks().is_empty() {
        msg_info!(Message::NoHomeData);
        return Ok(());
    }

    let dashboard_config = config.dashboard();
    let filter = if args.overdue {
        msg_print!(Message::OverdueHeader);
        TaskFilter::Overdue
    } else if let Some(days) = args.upcoming {
        let days = if days > 0 { days } else { dashboard_config.upcoming_days };
        msg_print!(Message::UpcomingHeader(days));
        TaskFilter::Upcoming(days)
    } else if let Some(category) = args.category {
        TaskFilter::Category(category)
    } else {
        msg_print!(Message::TasksHeader);
        TaskFilter::All
    };

    let mut view = DashboardView::new(dashboard_config);
    view.refresh(scheduler.get_tasks());
    let now = Local::now().naive_local();
    if view.filtered(&filter, now).is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }
    view.render(&filter, now);
    Ok(())
}
