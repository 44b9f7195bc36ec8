use super::open_scheduler;
use crate::{
    libs::{config::Config, messages::Message},
    msg_bail_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    #[arg(required = true)]
    id: u64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub fn cmd(args: DeleteArgs) -> Result<()> {
    let config = Config::read()?;
    let mut scheduler = open_scheduler(&config)?;

    let Some(title) = scheduler.title_of(args.id) else {
        msg_bail_anyhow!(Message::TaskNotFound(args.id));
    };

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(title).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    let removed = scheduler.delete_task(args.id)?;
    msg_success!(Message::TaskDeleted(removed.title));
    Ok(())
}
