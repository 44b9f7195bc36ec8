use super::{open_scheduler, watch_dashboard};
use crate::{
    libs::{
        config::Config,
        formatter::format_date,
        messages::Message,
        task::{Category, Priority, Season, TaskTemplate},
    },
    msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(required = true)]
    title: String,

    /// Days between occurrences
    #[arg(short, long)]
    frequency: i64,

    #[arg(short, long, value_enum, default_value = "general")]
    category: Category,

    #[arg(short, long, value_enum, default_value = "medium")]
    priority: Priority,

    /// Estimated cost per occurrence
    #[arg(long, default_value_t = 0.0)]
    cost: f64,

    /// Anchor the first due date to a season
    #[arg(short, long, value_enum)]
    season: Option<Season>,

    #[arg(short, long, default_value = "")]
    description: String,
}

pub fn cmd(args: AddArgs) -> Result<()> {
    let config = Config::read()?;
    let mut scheduler = open_scheduler(&config)?;
    let dashboard = watch_dashboard(&mut scheduler, &config);

    let mut template = TaskTemplate::new(&args.title, args.category, args.frequency, args.cost, args.priority).described(&args.description);
    if let Some(season) = args.season {
        template = template.in_season(season);
    }

    let task = scheduler.add_task(template, Local::now().date_naive())?;
    msg_success!(Message::TaskAdded {
        id: task.id,
        due: format_date(&task.due_date),
    });
    msg_print!(dashboard.borrow().summary(Local::now().naive_local()));
    Ok(())
}
