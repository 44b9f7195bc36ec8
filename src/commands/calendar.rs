use super::open_scheduler;
use crate::{
    libs::{config::Config, messages::Message, view::CalendarView},
    msg_bail_anyhow,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct CalendarArgs {
    /// Month to show as YYYY-MM (defaults to the current month)
    #[arg(short, long)]
    month: Option<String>,

    /// Also show the following months
    #[arg(short, long, default_value_t = 0)]
    next: u32,
}

pub fn cmd(args: CalendarArgs) -> Result<()> {
    let config = Config::read()?;
    let scheduler = open_scheduler(&config)?;

    let mut view = match &args.month {
        Some(month) => match parse_month(month) {
            Some(first) => CalendarView::for_date(first),
            None => msg_bail_anyhow!(Message::InvalidMonth(month.clone())),
        },
        None => CalendarView::for_date(Local::now().date_naive()),
    };
    view.refresh(scheduler.get_tasks());

    view.render();
    for _ in 0..args.next {
        view.next_month();
        println!();
        view.render();
    }
    Ok(())
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d").ok()
}
