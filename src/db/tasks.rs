use super::db::Db;
use crate::libs::error::TaskError;
use crate::libs::overlap::{check_overlap, Overlap};
use crate::libs::task::{Task, TaskFilter};
use crate::libs::time;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

const TASK_COLUMNS: &str = "id, text, date, start_time, duration, completed";
const INSERT_TASK: &str = "INSERT INTO tasks (user_id, id, text, date, start_time, duration, completed) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_TASK: &str = "UPDATE tasks SET text = ?3, date = ?4, start_time = ?5, duration = ?6, completed = ?7, updated_at = CURRENT_TIMESTAMP
    WHERE user_id = ?1 AND id = ?2";
const UPDATE_COMPLETED: &str = "UPDATE tasks SET completed = ?3, updated_at = CURRENT_TIMESTAMP WHERE user_id = ?1 AND id = ?2";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE user_id = ?1 AND id = ?2";
const SELECT_USER_EXISTS: &str = "SELECT 1 FROM users WHERE id = ?1";
const ORDER_BY_SLOT: &str = "ORDER BY date, start_time, created_at";

/// A task accepted by [`Tasks::add`] or [`Tasks::add_many`], together with the
/// same-day task it overlaps when the store is not strict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Added {
    pub task: Task,
    pub overlaps: Option<Task>,
}

/// Per-user task storage.
///
/// Every operation is scoped to one user and fails with
/// [`TaskError::NotFound`] when that user does not exist. Operations that
/// validate time slots run their read, check and write inside a single
/// `BEGIN IMMEDIATE` transaction so concurrent writers cannot both pass the
/// overlap check against a stale task list.
pub struct Tasks {
    conn: Connection,
    strict_add: bool,
}

impl Tasks {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self {
            conn: db.conn,
            strict_add: false,
        }
    }

    /// When strict, new tasks that overlap an existing same-day task are
    /// rejected with [`TaskError::TaskOverlap`] instead of being reported.
    pub fn strict_add(mut self, strict: bool) -> Self {
        self.strict_add = strict;
        self
    }

    pub fn fetch(&mut self, user_id: i32, filter: TaskFilter) -> Result<Vec<Task>> {
        ensure_user(&self.conn, user_id)?;
        load_tasks(&self.conn, user_id, filter)
    }

    pub fn get(&mut self, user_id: i32, id: &str) -> Result<Option<Task>> {
        ensure_user(&self.conn, user_id)?;
        get_task(&self.conn, user_id, id)
    }

    pub fn add(&mut self, user_id: i32, task: &Task) -> Result<Added> {
        let mut added = self.add_many(user_id, std::slice::from_ref(task))?;
        added.pop().ok_or_else(|| TaskError::task_not_found(&task.id).into())
    }

    /// Inserts all tasks or none of them.
    ///
    /// Each task is checked against the user's stored tasks and the tasks
    /// accepted earlier in the same batch.
    pub fn add_many(&mut self, user_id: i32, tasks: &[Task]) -> Result<Vec<Added>> {
        let tx = self.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        ensure_user(&tx, user_id)?;

        let mut day_tasks = load_tasks(&tx, user_id, TaskFilter::All)?;
        let mut added = Vec::with_capacity(tasks.len());

        for task in tasks {
            let task = &canonical(task)?;
            if day_tasks.iter().any(|t| t.id == task.id) {
                return Err(TaskError::TaskExists(task.id.clone()).into());
            }

            let overlap = check_overlap(&day_tasks, task, None)?;
            let overlaps = match overlap {
                Overlap::Conflict(_) if self.strict_add => {
                    overlap.into_result()?;
                    None
                }
                Overlap::Conflict(other) => Some(other.clone()),
                Overlap::None => None,
            };

            tx.execute(
                INSERT_TASK,
                params![user_id, task.id, task.text, task.date, task.start_time, task.duration, task.completed],
            )?;
            day_tasks.push(task.clone());
            added.push(Added {
                task: task.clone(),
                overlaps,
            });
        }

        tx.commit()?;
        tracing::info!(user = user_id, count = added.len(), "tasks added");
        Ok(added)
    }

    /// Marks a task done or not done without touching its time slot.
    pub fn set_completed(&mut self, user_id: i32, id: &str, completed: bool) -> Result<Task> {
        ensure_user(&self.conn, user_id)?;
        let affected = self.conn.execute(UPDATE_COMPLETED, params![user_id, id, completed])?;
        if affected == 0 {
            return Err(TaskError::task_not_found(id).into());
        }

        get_task(&self.conn, user_id, id)?.ok_or_else(|| TaskError::task_not_found(id).into())
    }

    /// Replaces every field of task `id` with `task`, keeping the id.
    ///
    /// The new slot is validated against the user's other tasks on the same
    /// date; the task's own stored slot is excluded. On conflict nothing is
    /// written and [`TaskError::TaskOverlap`] is returned.
    pub fn update_fully(&mut self, user_id: i32, id: &str, task: &Task) -> Result<Task> {
        let tx = self.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        ensure_user(&tx, user_id)?;

        let existing = load_tasks(&tx, user_id, TaskFilter::All)?;
        if !existing.iter().any(|t| t.id == id) {
            return Err(TaskError::task_not_found(id).into());
        }

        let candidate = Task {
            id: id.to_string(),
            ..canonical(task)?
        };
        if let Err(e) = check_overlap(&existing, &candidate, Some(id))?.into_result() {
            tracing::info!(user = user_id, task = id, code = e.code(), "task update rejected");
            return Err(e.into());
        }

        tx.execute(
            UPDATE_TASK,
            params![
                user_id,
                id,
                candidate.text,
                candidate.date,
                candidate.start_time,
                candidate.duration,
                candidate.completed
            ],
        )?;
        tx.commit()?;

        tracing::info!(user = user_id, task = id, "task updated");
        Ok(candidate)
    }

    pub fn delete(&mut self, user_id: i32, id: &str) -> Result<Task> {
        ensure_user(&self.conn, user_id)?;
        let task = get_task(&self.conn, user_id, id)?.ok_or_else(|| TaskError::task_not_found(id))?;
        self.conn.execute(DELETE_TASK, params![user_id, id])?;

        tracing::info!(user = user_id, task = id, "task deleted");
        Ok(task)
    }
}

/// Stored start times are zero-padded so `ORDER BY start_time` sorts them
/// chronologically.
fn canonical(task: &Task) -> Result<Task, TaskError> {
    Ok(Task {
        start_time: time::normalize_time(&task.start_time)?,
        ..task.clone()
    })
}

fn ensure_user(conn: &Connection, user_id: i32) -> Result<()> {
    let exists = conn.query_row(SELECT_USER_EXISTS, params![user_id], |_| Ok(())).optional()?;
    match exists {
        Some(()) => Ok(()),
        None => Err(TaskError::user_not_found(user_id).into()),
    }
}

fn load_tasks(conn: &Connection, user_id: i32, filter: TaskFilter) -> Result<Vec<Task>> {
    let tasks = match filter {
        TaskFilter::All => {
            let sql = format!("SELECT {} FROM tasks WHERE user_id = ?1 {}", TASK_COLUMNS, ORDER_BY_SLOT);
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![user_id], task_from_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        }
        TaskFilter::Date(date) => {
            let sql = format!("SELECT {} FROM tasks WHERE user_id = ?1 AND date = ?2 {}", TASK_COLUMNS, ORDER_BY_SLOT);
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![user_id, date], task_from_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        }
    };

    Ok(tasks)
}

fn get_task(conn: &Connection, user_id: i32, id: &str) -> Result<Option<Task>> {
    let sql = format!("SELECT {} FROM tasks WHERE user_id = ?1 AND id = ?2", TASK_COLUMNS);
    conn.query_row(&sql, params![user_id, id], task_from_row).optional().map_err(Into::into)
}

fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        text: row.get(1)?,
        date: row.get(2)?,
        start_time: row.get(3)?,
        duration: row.get(4)?,
        completed: row.get(5)?,
    })
}
