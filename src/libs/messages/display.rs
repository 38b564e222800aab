//! Wording of all user-facing messages.
//!
//! Keeping the text in one `match` means every new [`Message`] variant has to
//! get an explicit phrasing before the crate compiles.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(text) => format!("Task '{}' created", text),
            Message::TaskUpdated(text) => format!("Task '{}' updated", text),
            Message::TaskDeleted(text) => format!("Task '{}' deleted", text),
            Message::TaskCompleted(text) => format!("Task '{}' marked as done", text),
            Message::TaskReopened(text) => format!("Task '{}' marked as not done", text),
            Message::TasksImported(count) => format!("Added {} task(s)", count),
            Message::TasksHeader(date) => format!("Tasks for {}", date),
            Message::AllTasksHeader => "All tasks".to_string(),
            Message::NoTasksFound => "No tasks found.".to_string(),
            Message::NoTasksForDate(date) => format!("No tasks planned for {}.", date),
            Message::TaskOverlapWarning(text, start, end) => {
                format!("This task overlaps with '{}' ({} - {}) on the same day", text, start, end)
            }
            Message::TaskRejected(code, reason) => format!("[{}] {}", code, reason),
            Message::ConfirmDeleteTask(text) => format!("Delete task '{}'?", text),
            Message::DeleteCancelled => "Nothing was deleted.".to_string(),
            Message::PromptTaskText => "Task".to_string(),
            Message::PromptTaskDate => "Date (YYYY-MM-DD)".to_string(),
            Message::PromptStartTime => "Start time (HH:MM)".to_string(),
            Message::PromptDuration => "Duration (minutes)".to_string(),

            // === USER MESSAGES ===
            Message::SignedUp(name) => format!("Welcome, {}! Your account is ready and you are signed in.", name),
            Message::SignedIn(name) => format!("Signed in as {}", name),
            Message::SignedOut => "Signed out.".to_string(),
            Message::AlreadySignedOut => "You are not signed in.".to_string(),
            Message::CurrentUser(name, email) => format!("Signed in as {} <{}>", name, email),
            Message::PromptName => "Name".to_string(),
            Message::PromptEmail => "Email".to_string(),
            Message::PromptPassword => "Password".to_string(),
            Message::PromptPasswordConfirm => "Repeat password".to_string(),
            Message::PasswordMismatch => "Passwords do not match".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigModuleAi => "AI settings".to_string(),
            Message::ConfigModuleSchedule => "Schedule settings".to_string(),
            Message::PromptSelectModules => "Select settings to configure".to_string(),
            Message::PromptAiApiUrl => "Chat completions API URL".to_string(),
            Message::PromptAiModel => "Model".to_string(),
            Message::PromptAiApiKey => "API key (leave empty to use OPENAI_API_KEY)".to_string(),
            Message::PromptStrictAdd => "Reject new tasks that overlap existing ones?".to_string(),

            // === AI MESSAGES ===
            Message::AiNotConfigured => "AI is not configured. Run `todoai init` and select AI settings.".to_string(),
            Message::AiApiKeyMissing => "No API key found in the configuration or OPENAI_API_KEY.".to_string(),
            Message::AiRequestFailed(status) => format!("AI request failed. Status: {}", status),
            Message::AiEmptyResponse => "The AI response contained no message.".to_string(),
            Message::AiResponseNotJson(error) => format!("The AI response is not a valid task list: {}", error),
            Message::GeneratingTasks => "Generating tasks...".to_string(),
            Message::NoTasksGenerated => "The AI did not suggest any tasks.".to_string(),
            Message::SelectGeneratedTasks => "Select tasks to add (space to toggle, enter to confirm)".to_string(),
            Message::NoTasksSelected => "No tasks selected.".to_string(),
            Message::AiAnswerHeader => "Answer:".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),

            // === IMPORT MESSAGES ===
            Message::ImportFileReadFailed(path) => format!("Cannot read import file {}", path),
            Message::ImportFileInvalid(error) => format!("Import file is not a JSON task list: {}", error),
        };

        write!(f, "{}", text)
    }
}
