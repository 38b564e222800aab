//! SQLite persistence.
//!
//! [`db::Db`] opens the database file from the application data directory and
//! applies pending migrations. Stores wrap the connection for one entity each:
//!
//! ```rust,ignore
//! use todoai::db::{db::Db, tasks::Tasks, users::Users};
//!
//! let mut users = Users::from_db(Db::new()?);
//! let user = users.create("Ana", "ana@example.com", "secret")?;
//! let mut tasks = Tasks::from_db(Db::new()?);
//! let today = tasks.fetch(user.id, TaskFilter::All)?;
//! ```

/// Connection management.
pub mod db;

/// Schema versioning.
pub mod migrations;

/// Per-user task storage, including the overlap-checked full update.
pub mod tasks;

/// Accounts and sign-in.
pub mod users;
