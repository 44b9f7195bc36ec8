//! # homekeep - home maintenance scheduler
//!
//! Generates a recurring maintenance plan from a description of a home and
//! keeps every task's due date consistent as work gets done.
//!
//! ## Features
//!
//! - **Plan Generation**: Tasks derived from the home's features and age
//! - **Scheduling**: Seasonal anchors, priority lead times and fixed-cadence recurrence
//! - **Dashboard and Calendar**: Overdue and upcoming views from one source of truth
//! - **Backup**: Validated JSON export and import, plus a CSV task list
//!
//! ## Usage
//!
//! ```rust,no_run
//! use homekeep::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
