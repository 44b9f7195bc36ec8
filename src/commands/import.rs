use super::open_scheduler;
use crate::{
    libs::{backup::import_backup, config::Config, error::ScheduleError, messages::Message},
    msg_error, msg_info, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[arg(required = true)]
    file: PathBuf,

    /// Replace existing data without asking
    #[arg(short, long)]
    yes: bool,
}

pub fn cmd(args: ImportArgs) -> Result<()> {
    let config = Config::read()?;
    let mut scheduler = open_scheduler(&config)?;
    let document = fs::read_to_string(&args.file)?;

    let existing = scheduler.get_tasks().len();
    if existing > 0 && !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmImportReplace(existing).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    match import_backup(&mut scheduler, &document, Local::now().date_naive()) {
        Ok(summary) => {
            if summary.date_repairs > 0 {
                msg_info!(Message::DatesRepaired(summary.date_repairs));
            }
            if summary.normalized > 0 {
                msg_info!(Message::PrioritiesNormalized(summary.normalized));
            }
            msg_success!(Message::ImportCompleted(summary.tasks));
            Ok(())
        }
        Err(ScheduleError::ValidationFailure(errors)) => {
            msg_error!(Message::ImportRejected);
            for error in errors.iter() {
                eprintln!("{}", Message::ImportFieldError(error.to_string()));
            }
            Err(ScheduleError::ValidationFailure(errors).into())
        }
        Err(e) => Err(e.into()),
    }
}
