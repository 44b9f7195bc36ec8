use super::{open_scheduler, watch_dashboard};
use crate::{
    libs::{config::Config, dates, formatter::format_date, messages::Message},
    msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct CompleteArgs {
    #[arg(required = true)]
    id: u64,

    /// When the work was done (YYYY-MM-DD), defaults to now
    #[arg(short, long)]
    date: Option<String>,
}

pub fn cmd(args: CompleteArgs) -> Result<()> {
    let config = Config::read()?;
    let mut scheduler = open_scheduler(&config)?;
    let dashboard = watch_dashboard(&mut scheduler, &config);

    let completed_at = args.date.as_deref().map(dates::parse_timestamp).transpose()?;
    let task = scheduler.complete_task(args.id, completed_at)?;

    msg_success!(Message::TaskCompleted {
        title: task.title.clone(),
        next_due: format_date(&task.due_date),
    });
    msg_print!(dashboard.borrow().summary(Local::now().naive_local()));
    Ok(())
}
