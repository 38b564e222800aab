//! Core library modules.
//!
//! - [`task`], [`time`] and [`overlap`] hold the task model and the same-day
//!   conflict check; they do no I/O.
//! - [`config`], [`data_storage`] and [`session`] deal with files in the
//!   application data directory.
//! - [`messages`] and [`view`] cover terminal output.

pub mod config;
pub mod data_storage;
pub mod error;
pub mod messages;
pub mod overlap;
pub mod session;
pub mod task;
pub mod time;
pub mod view;
