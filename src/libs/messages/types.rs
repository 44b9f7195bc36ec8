use crate::libs::task::TaskId;

#[derive(Debug, Clone)]
pub enum Message {
    // === SETUP MESSAGES ===
    SetupWelcome,
    SetupCompleted(usize), // scheduled task count
    SetupTemplateFailed { title: String, reason: String },
    SetupOverwriteWarning(usize), // existing task count
    ConfirmSetupOverwrite,
    NoHomeData,

    // === TASK MESSAGES ===
    TaskAdded { id: TaskId, due: String },
    TaskCompleted { title: String, next_due: String },
    TaskRescheduled { title: String, due: String },
    TaskRescheduledIntoPast(String), // date
    ConfirmBackdate(String),         // date
    TaskDeleted(String),             // title
    ConfirmDeleteTask(String),       // title
    TaskNotFound(TaskId),
    NoTasksFound,
    TasksHeader,
    OverdueHeader,
    UpcomingHeader(i64), // days

    // === CALENDAR MESSAGES ===
    InvalidMonth(String),

    // === LOAD / STORAGE MESSAGES ===
    DatesRepaired(usize),
    PrioritiesNormalized(usize),
    UnknownCategories(usize),
    StoredTasksScheduled(usize),
    StoredTaskUnschedulable { title: String, reason: String },
    ChangesNotSaved(String), // reason

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleSchedule,
    ConfigModuleDashboard,

    // === EXPORT / IMPORT MESSAGES ===
    DataExported(String), // path
    ImportCompleted(usize),
    ImportRejected,
    ImportFieldError(String),
    ConfirmImportReplace(usize), // current task count

    // === PROMPTS ===
    PromptAddress,
    PromptCity,
    PromptState,
    PromptZipcode,
    PromptPropertyType,
    PromptYearBuilt,
    PromptSqft,
    PromptFeatures,
    PromptSelectModules,
    PromptHighPriorityLead,
    PromptShortCycleLead,
    PromptShortCycleMaxFrequency,
    PromptDefaultLead,
    PromptUpcomingDays,
    PromptCurrency,

    // === GENERAL MESSAGES ===
    OperationCancelled,
    InvalidDate(String),
}
