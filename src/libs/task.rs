use super::error::TaskError;
use super::time::{self, DATE_FORMAT};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub const DEFAULT_START_TIME: &str = "09:00";
pub const DEFAULT_DURATION: u32 = 60;

/// A time-boxed task on a user's calendar.
///
/// Field names follow the JSON shape used for imports and AI drafts
/// (`startTime`, `duration` in minutes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub duration: u32,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn start_minutes(&self) -> Result<u32, TaskError> {
        time::to_minutes(&self.start_time)
    }

    /// Half-open `[start, end)` interval in minutes since midnight.
    pub fn interval(&self) -> Result<(u32, u32), TaskError> {
        let start = self.start_minutes()?;
        let end = start
            .checked_add(self.duration)
            .ok_or(TaskError::InvalidDuration(self.duration.into()))?;
        Ok((start, end))
    }

    pub fn end_time(&self) -> Result<String, TaskError> {
        self.interval().map(|(_, end)| time::format_minutes(end))
    }

    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Unvalidated task input as it arrives from the command line, an import
/// file or an AI response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "whole_minutes")]
    pub duration: Option<i64>,
    #[serde(default)]
    pub completed: bool,
}

impl TaskDraft {
    pub fn new(text: &str, date: &str, start_time: &str, duration: i64) -> Self {
        Self {
            id: None,
            text: text.to_string(),
            date: Some(date.to_string()),
            start_time: Some(start_time.to_string()),
            duration: Some(duration),
            completed: false,
        }
    }

    /// Treats an empty start time and a zero duration as not given, so they
    /// fall back to the defaults in [`TaskDraft::into_task`].
    pub fn blank_as_missing(mut self) -> Self {
        self.start_time = self.start_time.filter(|start| !start.trim().is_empty());
        self.duration = self.duration.filter(|&minutes| minutes != 0);
        self
    }

    /// Validates the draft and turns it into a task.
    ///
    /// A missing date falls back to `default_date`; missing start time and
    /// duration fall back to `09:00` and 60 minutes. A missing id gets a
    /// fresh UUID.
    pub fn into_task(self, default_date: NaiveDate) -> Result<Task, TaskError> {
        let date = match self.date.as_deref() {
            Some(date) => time::parse_date(date)?,
            None => default_date,
        };
        let start_time = time::normalize_time(self.start_time.as_deref().unwrap_or(DEFAULT_START_TIME))?;
        let duration = time::validate_duration(self.duration.unwrap_or(DEFAULT_DURATION as i64))?;
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Task {
            id,
            text: self.text.trim().to_string(),
            date,
            start_time,
            duration,
            completed: self.completed,
        })
    }
}

/// Durations arrive as JSON numbers; `60.0` is as good as `60`.
fn whole_minutes<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Minutes {
        Whole(i64),
        Fractional(f64),
    }

    Ok(match Option::<Minutes>::deserialize(deserializer)? {
        Some(Minutes::Whole(minutes)) => Some(minutes),
        Some(Minutes::Fractional(minutes)) => Some(minutes.round() as i64),
        None => None,
    })
}

#[derive(Debug, Clone)]
pub enum TaskFilter {
    All,
    Date(NaiveDate),
}

/// Resolves a task id typed by the user: an exact id, or a prefix that
/// matches exactly one task.
pub fn resolve_task_id(tasks: &[Task], input: &str) -> Result<String, TaskError> {
    let input = input.trim();
    if let Some(task) = tasks.iter().find(|t| t.id == input) {
        return Ok(task.id.clone());
    }

    let mut matches = tasks.iter().filter(|t| !input.is_empty() && t.id.starts_with(input));
    match (matches.next(), matches.next()) {
        (Some(task), None) => Ok(task.id.clone()),
        _ => Err(TaskError::task_not_found(input)),
    }
}
