//! # todoai
//!
//! A personal task planner. Every task occupies a time slot on a calendar day
//! (`date`, `startTime`, `duration`), and editing a task never lets it overlap
//! another task of the same user on the same day.
//!
//! ## Features
//!
//! - **Accounts**: sign up, sign in and keep a local session
//! - **Tasks**: add, list, complete, edit with overlap checks, delete, import
//! - **AI drafts**: generate a day plan or ask about past tasks through an
//!   OpenAI-compatible API
//!
//! ## Usage
//!
//! ```rust,no_run
//! use todoai::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
