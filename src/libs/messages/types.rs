/// Every piece of user-facing text the application prints.
///
/// Variants carry the values interpolated into the text; the wording lives in
/// `display.rs`.
#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskUpdated(String),
    TaskDeleted(String),
    TaskCompleted(String),
    TaskReopened(String),
    TasksImported(usize),
    TasksHeader(String), // date
    AllTasksHeader,
    NoTasksFound,
    NoTasksForDate(String),
    TaskOverlapWarning(String, String, String), // text, start, end
    TaskRejected(&'static str, String),         // code, reason
    ConfirmDeleteTask(String),
    DeleteCancelled,
    PromptTaskText,
    PromptTaskDate,
    PromptStartTime,
    PromptDuration,

    // === USER MESSAGES ===
    SignedUp(String),
    SignedIn(String),
    SignedOut,
    AlreadySignedOut,
    CurrentUser(String, String), // name, email
    PromptName,
    PromptEmail,
    PromptPassword,
    PromptPasswordConfirm,
    PasswordMismatch,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleAi,
    ConfigModuleSchedule,
    PromptSelectModules,
    PromptAiApiUrl,
    PromptAiModel,
    PromptAiApiKey,
    PromptStrictAdd,

    // === AI MESSAGES ===
    AiNotConfigured,
    AiApiKeyMissing,
    AiRequestFailed(String), // status
    AiEmptyResponse,
    AiResponseNotJson(String),
    GeneratingTasks,
    NoTasksGenerated,
    SelectGeneratedTasks,
    NoTasksSelected,
    AiAnswerHeader,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseUpToDate,

    // === IMPORT MESSAGES ===
    ImportFileReadFailed(String),
    ImportFileInvalid(String),
}
