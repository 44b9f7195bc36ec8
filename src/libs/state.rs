//! Persisted application state and its decoding pipeline.
//!
//! The state record is the one layout other tools may depend on:
//!
//! ```text
//! {
//!   "homeData": { address, city, state, zipcode, propertyType, yearBuilt, sqft, features },
//!   "tasks": [ { id, title, description, category, frequency, cost, priority,
//!                dueDate, lastCompleted, isCompleted } ],
//!   "version": "2.0"
//! }
//! ```
//!
//! Decoding goes validate → set aside bad stored records → normalise legacy
//! values → repair shadow dates → split scheduled tasks from undated templates.

use super::error::{Result, ScheduleError, ValidationErrors};
use super::schedule::{ensure_date_consistency, is_scheduled_record, strip_shadow_dates};
use super::task::{Category, Priority, Season, Task, TaskId, TaskTemplate};
use super::validation::{task_index, validate_state, ValidationMode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Schema version written with every save.
pub const SCHEMA_VERSION: &str = "2.0";

/// Optional equipment and features that drive task generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeFeatures {
    pub central_air: bool,
    pub fireplace: bool,
    pub pool: bool,
    pub septic: bool,
    pub well_water: bool,
    pub sprinklers: bool,
    pub deck: bool,
    pub garage: bool,
    pub basement: bool,
    pub solar: bool,
    /// Features this version does not know about, kept verbatim.
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// Description of the home collected by the setup wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeData {
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub property_type: String,
    pub year_built: i32,
    pub sqft: u32,
    #[serde(default)]
    pub features: HomeFeatures,
}

impl HomeData {
    /// Age of the home in years as of `today`.
    pub fn age(&self, today: NaiveDate) -> i32 {
        use chrono::Datelike;
        (today.year() - self.year_built).max(0)
    }
}

/// The persisted state record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub home_data: Option<HomeData>,
    pub tasks: Vec<Task>,
    pub version: String,
    /// Stored records that could not be loaded, written back verbatim after
    /// the tasks.
    #[serde(skip)]
    pub held: Vec<Value>,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            home_data: None,
            tasks: Vec::new(),
            version: SCHEMA_VERSION.to_string(),
            held: Vec::new(),
        }
    }
}

impl AppState {
    pub fn to_record(&self) -> Result<String> {
        let failure = |e: serde_json::Error| ScheduleError::PersistenceFailure(e.to_string());
        let mut root = serde_json::to_value(self).map_err(failure)?;
        if let Some(Value::Array(tasks)) = root.get_mut("tasks") {
            tasks.extend(self.held.iter().cloned());
        }
        serde_json::to_string(&root).map_err(failure)
    }
}

/// An undated record found in stored or imported data.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTemplate {
    pub id: Option<TaskId>,
    pub template: TaskTemplate,
    /// The stored JSON, kept so a failed record can be written back.
    pub record: Option<Value>,
}

impl PendingTemplate {
    pub fn new(template: TaskTemplate) -> Self {
        PendingTemplate {
            id: None,
            template,
            record: None,
        }
    }
}

/// A stored record that failed validation and was set aside unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    pub title: String,
    pub record: Value,
    pub errors: ValidationErrors,
}

/// Result of decoding a raw state document.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedState {
    pub home_data: Option<HomeData>,
    pub tasks: Vec<Task>,
    /// Records without any due date, still to be scheduled.
    pub pending: Vec<PendingTemplate>,
    /// Stored records with invalid fields. Always empty for imports.
    pub rejected: Vec<RejectedRecord>,
    pub version: Option<String>,
    /// Shadow-date repairs made by `ensure_date_consistency`.
    pub date_repairs: usize,
    /// Legacy priority labels rewritten to the canonical set.
    pub normalized: usize,
    /// Records whose category label is not one of the known categories.
    pub unknown_categories: usize,
}

impl DecodedState {
    /// True when the repaired data differs from what was stored. Scheduling
    /// pending records is a separate change the caller tracks.
    pub fn needs_save(&self) -> bool {
        self.date_repairs > 0 || self.normalized > 0 || self.version.as_deref() != Some(SCHEMA_VERSION)
    }
}

fn invalid(field: &str, message: String) -> ScheduleError {
    let mut errors = ValidationErrors::default();
    errors.push(field, message);
    ScheduleError::ValidationFailure(errors)
}

/// Parses a raw record string into a JSON value.
pub fn parse_record(record: &str) -> Result<Value> {
    serde_json::from_str(record).map_err(|e| invalid("$", format!("malformed JSON: {e}")))
}

/// Id of a raw task record, if it has a usable one.
pub fn record_id(record: &Value) -> Option<TaskId> {
    record.get("id").and_then(Value::as_u64)
}

/// Title of a raw task record, falling back to its id.
pub fn record_title(record: &Value) -> String {
    match record.get("title").and_then(Value::as_str) {
        Some(title) if !title.trim().is_empty() => title.to_string(),
        _ => record_id(record).map_or_else(|| "untitled task".to_string(), |id| format!("task #{id}")),
    }
}

/// Decodes a state document.
///
/// Imports are rejected wholesale on any validation error. Stored state only
/// fails on document-level errors: a task record with a bad field is moved to
/// `rejected` as is, and the rest of the tasks load normally.
pub fn decode_state(mut root: Value, mode: ValidationMode, today: NaiveDate) -> Result<DecodedState> {
    let mut fatal = ValidationErrors::default();
    let mut per_record: BTreeMap<usize, ValidationErrors> = BTreeMap::new();
    for error in validate_state(&root, mode, today).0 {
        match task_index(&error.field) {
            Some(index) if mode == ValidationMode::Load => per_record.entry(index).or_default().0.push(error),
            _ => fatal.0.push(error),
        }
    }
    if !fatal.is_empty() {
        return Err(ScheduleError::ValidationFailure(fatal));
    }

    let fields = root.as_object_mut().ok_or_else(|| invalid("$", "document must be a JSON object".to_string()))?;

    let home_data = match fields.remove("homeData") {
        Some(Value::Null) | None => None,
        Some(home) => Some(serde_json::from_value::<HomeData>(home).map_err(|e| invalid("homeData", e.to_string()))?),
    };
    let version = fields.get("version").and_then(Value::as_str).map(str::to_string);

    let all_records = match fields.remove("tasks") {
        Some(Value::Array(records)) => records,
        _ => Vec::new(),
    };

    let mut rejected = Vec::new();
    let mut indices = Vec::new();
    let mut records = Vec::new();
    for (index, record) in all_records.into_iter().enumerate() {
        match per_record.remove(&index) {
            Some(errors) => rejected.push(RejectedRecord {
                title: record_title(&record),
                record,
                errors,
            }),
            None => {
                indices.push(index);
                records.push(record);
            }
        }
    }

    let normalized = records.iter_mut().map(normalize_priority).filter(|changed| *changed).count();
    let unknown_categories = records.iter().filter(|record| has_unknown_category(record)).count();
    let date_repairs = ensure_date_consistency(&mut records);
    strip_shadow_dates(&mut records);

    let mut tasks = Vec::new();
    let mut pending = Vec::new();
    for (index, record) in indices.into_iter().zip(records) {
        if is_scheduled_record(&record) {
            match serde_json::from_value::<Task>(record.clone()) {
                Ok(task) => tasks.push(task),
                Err(e) if mode == ValidationMode::Load => {
                    let mut errors = ValidationErrors::default();
                    errors.push(format!("tasks[{index}]"), e.to_string());
                    rejected.push(RejectedRecord {
                        title: record_title(&record),
                        record,
                        errors,
                    });
                }
                Err(e) => return Err(invalid(&format!("tasks[{index}]"), e.to_string())),
            }
        } else if let Value::Object(fields) = &record {
            let template = pending_template(fields);
            pending.push(PendingTemplate {
                id: record_id(&record),
                template,
                record: Some(record),
            });
        }
    }

    Ok(DecodedState {
        home_data,
        tasks,
        pending,
        rejected,
        version,
        date_repairs,
        normalized,
        unknown_categories,
    })
}

// Rewrites `normal`/mixed-case labels to the canonical lowercase set.
fn normalize_priority(record: &mut Value) -> bool {
    let Some(fields) = record.as_object_mut() else { return false };
    let Some(raw) = fields.get("priority").and_then(Value::as_str) else { return false };
    let Some(priority) = Priority::parse(raw) else { return false };
    if raw == priority.as_str() {
        return false;
    }
    fields.insert("priority".to_string(), Value::String(priority.as_str().to_string()));
    true
}

fn has_unknown_category(record: &Value) -> bool {
    match record.get("category").and_then(Value::as_str) {
        Some(raw) if !raw.trim().is_empty() => Category::parse(raw).is_none(),
        _ => false,
    }
}

fn pending_template(fields: &Map<String, Value>) -> TaskTemplate {
    let text = |key: &str| fields.get(key).and_then(Value::as_str).unwrap_or_default().to_string();
    TaskTemplate {
        title: text("title"),
        description: text("description"),
        category: Category::from(text("category")),
        frequency: fields.get("frequency").and_then(Value::as_i64).unwrap_or_default(),
        cost: fields.get("cost").and_then(Value::as_f64).unwrap_or_default(),
        priority: fields
            .get("priority")
            .and_then(Value::as_str)
            .and_then(Priority::parse)
            .unwrap_or(Priority::Medium),
        seasonal_hint: fields.get("seasonalHint").and_then(Value::as_str).and_then(Season::parse),
    }
}
