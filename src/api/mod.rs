//! Clients for external services.
//!
//! The only integration is an OpenAI-compatible chat completions API used to
//! draft task lists and answer questions about past tasks.

pub mod openai;

pub use openai::{AiConfig, OpenAi};
