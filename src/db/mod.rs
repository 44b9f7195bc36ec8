//! SQLite persistence for homekeep.
//!
//! The application keeps one serialized state record in a small key/value
//! table. [`storage::Storage`] exposes it through the
//! [`StateStore`](crate::libs::store::StateStore) contract the scheduler
//! writes through.
//!
//! ```rust,no_run
//! use homekeep::db::storage::Storage;
//! use homekeep::libs::store::StateStore;
//!
//! let storage = Storage::new()?;
//! let record = storage.load()?;
//! # Ok::<(), homekeep::libs::error::ScheduleError>(())
//! ```

/// Connection setup.
pub mod db;

/// Key/value state table.
pub mod storage;
