use crate::{
    db::{db::Db, tasks::Tasks},
    libs::{
        config::Config,
        error::TaskError,
        messages::Message,
        session::Session,
        task::{resolve_task_id, Task, TaskDraft, TaskFilter},
        time,
        view::View,
    },
    msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::fs;

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Add a task to the calendar
    Add {
        /// Task description
        text: String,
        /// Start time (HH:MM)
        #[arg(short, long)]
        start: String,
        /// Duration in minutes
        #[arg(short = 'm', long)]
        duration: Option<i64>,
        /// Date (YYYY-MM-DD), today by default
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show tasks for a day
    List {
        /// Date (YYYY-MM-DD), today by default
        #[arg(short, long)]
        date: Option<String>,
        /// Show tasks of all days
        #[arg(short, long, conflicts_with = "date")]
        all: bool,
    },
    /// Mark a task as done
    Done {
        /// Task id or unique id prefix
        id: String,
    },
    /// Mark a task as not done
    Undone {
        /// Task id or unique id prefix
        id: String,
    },
    /// Change a task; the new time slot must not overlap other tasks that day
    Edit {
        /// Task id or unique id prefix
        id: String,
        #[arg(long)]
        text: Option<String>,
        /// Start time (HH:MM)
        #[arg(short, long)]
        start: Option<String>,
        /// Duration in minutes
        #[arg(short = 'm', long)]
        duration: Option<i64>,
        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Delete a task
    Delete {
        /// Task id or unique id prefix
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Add tasks from a JSON file with an array of {text, startTime, duration, date}
    Import {
        file: String,
        /// Date for entries without one, today by default
        #[arg(short, long)]
        date: Option<String>,
    },
}

pub async fn cmd(args: TaskArgs) -> Result<()> {
    let user_id = Session::new()?.require_user_id()?;
    let config = Config::read()?;
    let schedule = config.schedule_or_default();
    let mut tasks = Tasks::from_db(Db::new()?).strict_add(schedule.strict_add);

    match args.command {
        TaskCommand::Add {
            text,
            start,
            duration,
            date,
        } => {
            let draft = TaskDraft {
                text,
                date,
                start_time: Some(start),
                duration: Some(duration.unwrap_or(schedule.default_duration as i64)),
                ..Default::default()
            };
            handle_add(&mut tasks, user_id, vec![draft], today())
        }
        TaskCommand::List { date, all } => {
            let filter = match (all, date) {
                (true, _) => TaskFilter::All,
                (false, Some(date)) => TaskFilter::Date(time::parse_date(&date)?),
                (false, None) => TaskFilter::Date(today()),
            };
            handle_list(&mut tasks, user_id, filter)
        }
        TaskCommand::Done { id } => handle_set_completed(&mut tasks, user_id, &id, true),
        TaskCommand::Undone { id } => handle_set_completed(&mut tasks, user_id, &id, false),
        TaskCommand::Edit {
            id,
            text,
            start,
            duration,
            date,
            completed,
        } => {
            let changes = TaskChanges {
                text,
                start,
                duration,
                date,
                completed,
            };
            handle_edit(&mut tasks, user_id, &id, changes)
        }
        TaskCommand::Delete { id, yes } => handle_delete(&mut tasks, user_id, &id, yes),
        TaskCommand::Import { file, date } => {
            let default_date = date.as_deref().map(time::parse_date).transpose()?.unwrap_or_else(today);
            let drafts = read_import_file(&file)?;
            handle_add(&mut tasks, user_id, drafts, default_date)
        }
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Validates drafts and stores them in one batch, warning about overlaps the
/// store accepted.
pub fn handle_add(tasks: &mut Tasks, user_id: i32, drafts: Vec<TaskDraft>, default_date: NaiveDate) -> Result<()> {
    let new_tasks = drafts
        .into_iter()
        .map(|draft| draft.into_task(default_date))
        .collect::<Result<Vec<Task>, TaskError>>()?;

    let added = tasks.add_many(user_id, &new_tasks)?;
    for entry in &added {
        msg_success!(Message::TaskCreated(entry.task.text.clone()));
        if let Some(other) = &entry.overlaps {
            msg_warning!(Message::TaskOverlapWarning(
                other.text.clone(),
                other.start_time.clone(),
                other.end_time().unwrap_or_default()
            ));
        }
    }
    if added.len() > 1 {
        msg_info!(Message::TasksImported(added.len()));
    }

    Ok(())
}

fn handle_list(tasks: &mut Tasks, user_id: i32, filter: TaskFilter) -> Result<()> {
    let (header, empty) = match &filter {
        TaskFilter::All => (Message::AllTasksHeader, Message::NoTasksFound),
        TaskFilter::Date(date) => {
            let date = date.format(time::DATE_FORMAT).to_string();
            (Message::TasksHeader(date.clone()), Message::NoTasksForDate(date))
        }
    };

    let list = tasks.fetch(user_id, filter)?;
    if list.is_empty() {
        msg_info!(empty);
        return Ok(());
    }

    msg_print!(header, true);
    View::tasks(&list)
}

fn handle_set_completed(tasks: &mut Tasks, user_id: i32, id: &str, completed: bool) -> Result<()> {
    let id = resolve(tasks, user_id, id)?;
    let task = tasks.set_completed(user_id, &id, completed)?;

    if completed {
        msg_success!(Message::TaskCompleted(task.text));
    } else {
        msg_success!(Message::TaskReopened(task.text));
    }
    Ok(())
}

#[derive(Debug, Default)]
struct TaskChanges {
    text: Option<String>,
    start: Option<String>,
    duration: Option<i64>,
    date: Option<String>,
    completed: Option<bool>,
}

impl TaskChanges {
    fn is_empty(&self) -> bool {
        self.text.is_none() && self.start.is_none() && self.duration.is_none() && self.date.is_none() && self.completed.is_none()
    }

    /// Prompts for every field, offering the current values as defaults.
    fn prompt(current: &Task) -> Result<Self> {
        let theme = ColorfulTheme::default();
        Ok(Self {
            text: Some(
                Input::with_theme(&theme)
                    .with_prompt(Message::PromptTaskText.to_string())
                    .default(current.text.clone())
                    .interact_text()?,
            ),
            date: Some(
                Input::with_theme(&theme)
                    .with_prompt(Message::PromptTaskDate.to_string())
                    .default(current.date_string())
                    .validate_with(|input: &String| time::parse_date(input).map(|_| ()).map_err(|e| e.to_string()))
                    .interact_text()?,
            ),
            start: Some(
                Input::with_theme(&theme)
                    .with_prompt(Message::PromptStartTime.to_string())
                    .default(current.start_time.clone())
                    .validate_with(|input: &String| time::to_minutes(input).map(|_| ()).map_err(|e| e.to_string()))
                    .interact_text()?,
            ),
            duration: Some(
                Input::with_theme(&theme)
                    .with_prompt(Message::PromptDuration.to_string())
                    .default(current.duration as i64)
                    .validate_with(|input: &i64| time::validate_duration(*input).map(|_| ()).map_err(|e| e.to_string()))
                    .interact_text()?,
            ),
            completed: None,
        })
    }

    fn apply(self, current: &Task) -> Result<Task, TaskError> {
        let draft = TaskDraft {
            id: Some(current.id.clone()),
            text: self.text.unwrap_or_else(|| current.text.clone()),
            date: Some(self.date.unwrap_or_else(|| current.date_string())),
            start_time: Some(self.start.unwrap_or_else(|| current.start_time.clone())),
            duration: Some(self.duration.unwrap_or(current.duration as i64)),
            completed: self.completed.unwrap_or(current.completed),
        };
        draft.into_task(current.date)
    }
}

fn handle_edit(tasks: &mut Tasks, user_id: i32, id: &str, changes: TaskChanges) -> Result<()> {
    let id = resolve(tasks, user_id, id)?;
    let current = tasks.get(user_id, &id)?.ok_or_else(|| TaskError::task_not_found(&id))?;

    let changes = if changes.is_empty() { TaskChanges::prompt(&current)? } else { changes };
    let updated = changes.apply(&current)?;

    let saved = tasks.update_fully(user_id, &id, &updated)?;
    msg_success!(Message::TaskUpdated(saved.text.clone()));

    handle_list(tasks, user_id, TaskFilter::Date(saved.date))
}

fn handle_delete(tasks: &mut Tasks, user_id: i32, id: &str, yes: bool) -> Result<()> {
    let id = resolve(tasks, user_id, id)?;
    let current = tasks.get(user_id, &id)?.ok_or_else(|| TaskError::task_not_found(&id))?;

    if !yes
        && !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(current.text.clone()).to_string())
            .default(false)
            .interact()?
    {
        msg_info!(Message::DeleteCancelled);
        return Ok(());
    }

    let deleted = tasks.delete(user_id, &id)?;
    msg_success!(Message::TaskDeleted(deleted.text));
    Ok(())
}

fn resolve(tasks: &mut Tasks, user_id: i32, id: &str) -> Result<String> {
    let all = tasks.fetch(user_id, TaskFilter::All)?;
    Ok(resolve_task_id(&all, id)?)
}

fn read_import_file(path: &str) -> Result<Vec<TaskDraft>> {
    let content = fs::read_to_string(path).map_err(|_| crate::msg_error_anyhow!(Message::ImportFileReadFailed(path.to_string())))?;
    parse_import(&content)
}

/// Parses an import file: a JSON array of task drafts.
pub fn parse_import(content: &str) -> Result<Vec<TaskDraft>> {
    serde_json::from_str(content).map_err(|e| crate::msg_error_anyhow!(Message::ImportFileInvalid(e.to_string())))
}
