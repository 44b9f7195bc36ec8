//! Display text for application messages.
//!
//! All user-facing wording lives here so commands only ever pick a
//! [`Message`] variant and hand it to one of the `msg_*` macros.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SETUP MESSAGES ===
            Message::SetupWelcome => "Let's describe your home so we can build a maintenance plan.".to_string(),
            Message::SetupCompleted(count) => format!("Maintenance plan created with {} tasks.", count),
            Message::SetupTemplateFailed { title, reason } => format!("Could not schedule '{}': {}", title, reason),
            Message::SetupOverwriteWarning(count) => format!("This will replace your current {} tasks.", count),
            Message::ConfirmSetupOverwrite => "Replace the existing maintenance plan?".to_string(),
            Message::NoHomeData => "No home set up yet. Run `homekeep init` first.".to_string(),

            // === TASK MESSAGES ===
            Message::TaskAdded { id, due } => format!("Task #{} added, first due {}", id, due),
            Message::TaskCompleted { title, next_due } => format!("'{}' done. Next due {}", title, next_due),
            Message::TaskRescheduled { title, due } => format!("'{}' moved to {}", title, due),
            Message::TaskRescheduledIntoPast(date) => format!("{} is in the past; the task is now overdue.", date),
            Message::ConfirmBackdate(date) => format!("{} is in the past. Reschedule anyway?", date),
            Message::TaskDeleted(title) => format!("Task '{}' deleted.", title),
            Message::ConfirmDeleteTask(title) => format!("Delete '{}'? This cannot be undone.", title),
            Message::TaskNotFound(id) => format!("Task with ID {} not found.", id),
            Message::NoTasksFound => "No tasks found.".to_string(),
            Message::TasksHeader => "Maintenance tasks".to_string(),
            Message::OverdueHeader => "Overdue tasks".to_string(),
            Message::UpcomingHeader(days) => format!("Due in the next {} days", days),

            // === CALENDAR MESSAGES ===
            Message::InvalidMonth(input) => format!("Invalid month '{}', expected YYYY-MM.", input),

            // === LOAD / STORAGE MESSAGES ===
            Message::DatesRepaired(count) => format!("Repaired {} diverging due date(s).", count),
            Message::PrioritiesNormalized(count) => format!("Normalized {} legacy priority value(s).", count),
            Message::UnknownCategories(count) => {
                format!("{} stored task(s) have an unknown category and are shown as general.", count)
            }
            Message::StoredTasksScheduled(count) => format!("Scheduled {} stored task(s) that had no due date.", count),
            Message::StoredTaskUnschedulable { title, reason } => {
                format!("Stored task '{}' could not be loaded and was kept unchanged: {}", title, reason)
            }
            Message::ChangesNotSaved(reason) => format!("Changes were not saved: {}", reason),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully.".to_string(),
            Message::ConfigModuleSchedule => "Schedule settings".to_string(),
            Message::ConfigModuleDashboard => "Dashboard settings".to_string(),

            // === EXPORT / IMPORT MESSAGES ===
            Message::DataExported(path) => format!("Data exported to {}", path),
            Message::ImportCompleted(count) => format!("Backup imported with {} tasks.", count),
            Message::ImportRejected => "Backup rejected, nothing was changed:".to_string(),
            Message::ImportFieldError(error) => format!("  - {}", error),
            Message::ConfirmImportReplace(count) => format!("Importing replaces your current {} tasks. Continue?", count),

            // === PROMPTS ===
            Message::PromptAddress => "Street address".to_string(),
            Message::PromptCity => "City".to_string(),
            Message::PromptState => "State (2 letters)".to_string(),
            Message::PromptZipcode => "ZIP code".to_string(),
            Message::PromptPropertyType => "Property type".to_string(),
            Message::PromptYearBuilt => "Year built".to_string(),
            Message::PromptSqft => "Square footage".to_string(),
            Message::PromptFeatures => "Select the features your home has (space to select, enter to confirm)".to_string(),
            Message::PromptSelectModules => "Select settings to configure".to_string(),
            Message::PromptHighPriorityLead => "Days until a new high-priority task is due".to_string(),
            Message::PromptShortCycleLead => "Days until a new short-cycle task is due".to_string(),
            Message::PromptShortCycleMaxFrequency => "Longest frequency (days) counted as short-cycle".to_string(),
            Message::PromptDefaultLead => "Days until any other new task is due".to_string(),
            Message::PromptUpcomingDays => "Dashboard look-ahead window (days)".to_string(),
            Message::PromptCurrency => "Currency symbol".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled.".to_string(),
            Message::InvalidDate(input) => format!("Invalid date '{}', expected YYYY-MM-DD.", input),
        };
        write!(f, "{}", text)
    }
}
