//! Same-day interval conflict detection.
//!
//! Tasks occupy half-open intervals `[start, start + duration)` measured in
//! minutes since midnight. Two tasks conflict when they share a date and
//! `a.start < b.end && a.end > b.start`; a task that starts exactly when
//! another one ends does not conflict with it.
//!
//! The check is a pure function over one user's tasks. Loading the tasks,
//! persisting the change and serializing concurrent writers is the job of the
//! store (see [`crate::db::tasks::Tasks::update_fully`]).

use super::error::TaskError;
use super::task::Task;
use super::time;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap<'a> {
    None,
    Conflict(&'a Task),
}

impl<'a> Overlap<'a> {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Overlap::Conflict(_))
    }

    /// Turns a conflict into the error reported to callers that refuse
    /// to persist an overlapping task.
    pub fn into_result(self) -> Result<(), TaskError> {
        match self {
            Overlap::None => Ok(()),
            Overlap::Conflict(task) => Err(TaskError::TaskOverlap {
                conflicting_id: task.id.clone(),
                text: task.text.clone(),
                date: task.date_string(),
                start: task.start_time.clone(),
                duration: task.duration,
            }),
        }
    }
}

/// Finds the first task in `existing` whose interval overlaps `candidate`
/// on the same date.
///
/// `exclude_id` names the task being updated so it is never compared against
/// its own stored state; pass `None` when validating a new task. When several
/// tasks conflict, the first one in `existing` order is reported.
pub fn check_overlap<'a>(existing: &'a [Task], candidate: &Task, exclude_id: Option<&str>) -> Result<Overlap<'a>, TaskError> {
    time::validate_duration(candidate.duration.into())?;
    let (start, end) = candidate.interval()?;

    for task in existing {
        if exclude_id == Some(task.id.as_str()) || task.date != candidate.date {
            continue;
        }

        let (other_start, other_end) = task.interval()?;
        if start < other_end && end > other_start {
            tracing::debug!(candidate = %candidate.id, conflicting = %task.id, "task interval overlaps");
            return Ok(Overlap::Conflict(task));
        }
    }

    Ok(Overlap::None)
}
