use homekeep::commands::Cli;
use homekeep::libs::error::ScheduleError;
use homekeep::libs::messages::{macros::is_debug_mode, Message};
use homekeep::msg_error;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    if is_debug_mode() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("homekeep=debug"));
        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
    }

    match Cli::menu() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ScheduleError>() {
                Some(ScheduleError::PersistenceFailure(reason)) => msg_error!(Message::ChangesNotSaved(reason.clone())),
                _ => msg_error!(e),
            }
            ExitCode::FAILURE
        }
    }
}
