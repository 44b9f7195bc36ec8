//! Core library modules for homekeep.
//!
//! The domain lives here: task types, date rules, the scheduler and its
//! persistence contract, validation of stored and imported state, and the
//! views that render it.

pub mod backup;
pub mod config;
pub mod data_storage;
pub mod dates;
pub mod error;
pub mod formatter;
pub mod generator;
pub mod messages;
pub mod schedule;
pub mod scheduler;
pub mod state;
pub mod store;
pub mod task;
pub mod validation;
pub mod view;
