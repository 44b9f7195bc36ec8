use super::open_scheduler;
use crate::{
    libs::{
        backup::{export_backup, write_tasks_csv},
        config::Config,
        messages::Message,
    },
    msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, ValueEnum};
use std::fs::{self, File};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Full backup that `homekeep import` can restore
    Json,
    /// Task list for spreadsheets
    Csv,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(short, long, value_enum, default_value = "json")]
    format: ExportFormat,

    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let config = Config::read()?;
    let scheduler = open_scheduler(&config)?;
    let now = Local::now().naive_local();

    let output = args.output.unwrap_or_else(|| default_file_name(args.format, now.format("%Y-%m-%d").to_string()));
    match args.format {
        ExportFormat::Json => fs::write(&output, export_backup(&scheduler, now).to_json()?)?,
        ExportFormat::Csv => write_tasks_csv(scheduler.get_tasks(), File::create(&output)?)?,
    }

    msg_success!(Message::DataExported(output.display().to_string()));
    Ok(())
}

fn default_file_name(format: ExportFormat, date: String) -> PathBuf {
    let extension = match format {
        ExportFormat::Json => "json",
        ExportFormat::Csv => "csv",
    };
    PathBuf::from(format!("homekeep-backup-{}.{}", date, extension))
}
