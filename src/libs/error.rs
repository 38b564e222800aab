//! Domain errors for task scheduling and accounts.
//!
//! Every variant carries a stable machine-readable code (see [`TaskError::code`])
//! so callers can branch on the kind of failure without matching on text.
//! Overlaps are an expected outcome of editing a calendar, so the validator
//! itself reports them as a value; they only become a [`TaskError::TaskOverlap`]
//! once a store operation refuses to persist a change.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Cannot save task: the new time overlaps with task '{text}' ({start}, {duration} min) on {date}")]
    TaskOverlap {
        conflicting_id: String,
        text: String,
        date: String,
        start: String,
        duration: u32,
    },

    #[error("Task '{0}' already exists")]
    TaskExists(String),

    #[error("Invalid time '{0}', expected HH:MM in 24-hour format")]
    InvalidTimeFormat(String),

    #[error("Invalid duration {0}, expected a positive number of minutes")]
    InvalidDuration(i64),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("A user with email '{0}' already exists")]
    EmailTaken(String),

    #[error("You are not signed in. Run `todoai signin` first")]
    NotSignedIn,
}

impl TaskError {
    pub fn code(&self) -> &'static str {
        match self {
            TaskError::NotFound(_) => "NOT_FOUND",
            TaskError::TaskOverlap { .. } => "TASK_OVERLAP",
            TaskError::TaskExists(_) => "TASK_EXISTS",
            TaskError::InvalidTimeFormat(_) => "INVALID_TIME_FORMAT",
            TaskError::InvalidDuration(_) => "INVALID_DURATION",
            TaskError::InvalidDate(_) => "INVALID_DATE",
            TaskError::InvalidCredentials => "INVALID_CREDENTIALS",
            TaskError::EmailTaken(_) => "EMAIL_TAKEN",
            TaskError::NotSignedIn => "NOT_SIGNED_IN",
        }
    }

    pub fn task_not_found(id: &str) -> Self {
        TaskError::NotFound(format!("Task '{}'", id))
    }

    pub fn user_not_found(id: i32) -> Self {
        TaskError::NotFound(format!("User {}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_carries_machine_code() {
        let err = TaskError::TaskOverlap {
            conflicting_id: "1".to_string(),
            text: "Standup".to_string(),
            date: "2025-03-22".to_string(),
            start: "09:00".to_string(),
            duration: 60,
        };
        assert_eq!(err.code(), "TASK_OVERLAP");
        assert!(err.to_string().contains("Standup"));
    }

    #[test]
    fn not_found_is_distinct_from_overlap() {
        let err = TaskError::task_not_found("42");
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "Task '42' not found");
    }
}
