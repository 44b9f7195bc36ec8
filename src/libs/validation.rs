//! Field-level validation of raw state documents.
//!
//! Validation runs on the untyped JSON before anything is deserialized, so a
//! bad document produces an itemised list of offending fields rather than the
//! first serde error. Two strictness levels exist: stored state is checked
//! for shape only, while imported backups must also satisfy the domain rules.
//!
//! Errors on a task carry a `tasks[N]` field prefix, which lets the decoder
//! set aside a single bad stored record instead of the whole document.

use super::dates::parse_timestamp;
use super::error::ValidationErrors;
use super::schedule::{DUE_DATE_FIELD, SHADOW_DUE_FIELD};
use super::task::{Priority, Season};
use chrono::{Datelike, NaiveDate};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Earliest construction year accepted for a home.
pub const MIN_YEAR_BUILT: i64 = 1800;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Stored state: shape checks only, home data optional.
    Load,
    /// Backup file: shape and domain checks, home data required.
    Import,
}

/// Validates a whole state document.
pub fn validate_state(root: &Value, mode: ValidationMode, today: NaiveDate) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    let Some(fields) = root.as_object() else {
        errors.push("$", "document must be a JSON object");
        return errors;
    };

    match fields.get("homeData") {
        Some(Value::Object(home)) => validate_home(home, mode, today, &mut errors),
        None | Some(Value::Null) if mode == ValidationMode::Load => {}
        None | Some(Value::Null) => errors.push("homeData", "is required"),
        Some(_) => errors.push("homeData", "must be an object"),
    }

    match fields.get("tasks") {
        Some(Value::Array(tasks)) => {
            let mut seen = HashSet::new();
            for (index, task) in tasks.iter().enumerate() {
                validate_task(task, index, mode, &mut seen, &mut errors);
            }
        }
        None if mode == ValidationMode::Load => {}
        None => errors.push("tasks", "is required"),
        Some(_) => errors.push("tasks", "must be an array"),
    }

    if let Some(version) = fields.get("version") {
        if !version.is_string() {
            errors.push("version", "must be a string");
        }
    }

    if mode == ValidationMode::Import {
        if let Some(exported) = fields.get("exportDate") {
            if exported.as_str().map(parse_timestamp).map_or(true, |parsed| parsed.is_err()) {
                errors.push("exportDate", "must be a date string");
            }
        }
    }

    errors
}

/// Index of the task record an error field points into, if any.
pub fn task_index(field: &str) -> Option<usize> {
    let rest = field.strip_prefix("tasks[")?;
    let end = rest.find(']')?;
    rest[..end].parse().ok()
}

fn non_empty_string<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty())
}

fn validate_home(home: &Map<String, Value>, mode: ValidationMode, today: NaiveDate, errors: &mut ValidationErrors) {
    for key in ["address", "city"] {
        if non_empty_string(home, key).is_none() {
            errors.push(format!("homeData.{key}"), "must be a non-empty string");
        }
    }

    match home.get("state").and_then(Value::as_str).map(str::trim) {
        Some(state) if state.len() == 2 && state.chars().all(|c| c.is_ascii_alphabetic()) => {}
        Some(_) => errors.push("homeData.state", "must be a 2-letter state code"),
        None => errors.push("homeData.state", "is required"),
    }

    for key in ["zipcode", "propertyType"] {
        if let Some(value) = home.get(key) {
            if !value.is_string() && !value.is_null() {
                errors.push(format!("homeData.{key}"), "must be a string");
            }
        }
    }

    match home.get("sqft").and_then(Value::as_u64) {
        Some(sqft) if sqft > 0 || mode == ValidationMode::Load => {}
        Some(_) => errors.push("homeData.sqft", "must be positive"),
        None => errors.push("homeData.sqft", "must be a positive integer"),
    }

    let latest_year = i64::from(today.year()) + 1;
    match home.get("yearBuilt").and_then(Value::as_i64) {
        Some(_) if mode == ValidationMode::Load => {}
        Some(year) if (MIN_YEAR_BUILT..=latest_year).contains(&year) => {}
        Some(_) => errors.push("homeData.yearBuilt", format!("must be between {MIN_YEAR_BUILT} and {latest_year}")),
        None => errors.push("homeData.yearBuilt", "must be an integer year"),
    }

    if let Some(features) = home.get("features") {
        if !features.is_object() {
            errors.push("homeData.features", "must be an object");
        }
    }
}

fn validate_task(task: &Value, index: usize, mode: ValidationMode, seen: &mut HashSet<u64>, errors: &mut ValidationErrors) {
    let at = |key: &str| format!("tasks[{index}].{key}");
    let Some(fields) = task.as_object() else {
        errors.push(format!("tasks[{index}]"), "must be an object");
        return;
    };

    match fields.get("id").and_then(Value::as_u64) {
        Some(id) if !seen.insert(id) => errors.push(at("id"), format!("duplicate id {id}")),
        Some(_) => {}
        None => errors.push(at("id"), "must be a non-negative integer"),
    }

    if non_empty_string(fields, "title").is_none() {
        errors.push(at("title"), "must be a non-empty string");
    }

    match fields.get("frequency").and_then(Value::as_i64) {
        Some(frequency) if frequency <= 0 && mode == ValidationMode::Import => {
            errors.push(at("frequency"), "must be a positive number of days")
        }
        Some(_) => {}
        None => errors.push(at("frequency"), "must be an integer number of days"),
    }

    match fields.get("cost") {
        None | Some(Value::Null) => {}
        Some(cost) => match cost.as_f64() {
            Some(cost) if cost < 0.0 && mode == ValidationMode::Import => errors.push(at("cost"), "must not be negative"),
            Some(_) => {}
            None => errors.push(at("cost"), "must be a number"),
        },
    }

    match fields.get("priority").and_then(Value::as_str) {
        Some(priority) if Priority::parse(priority).is_some() => {}
        _ => errors.push(at("priority"), "must be one of high, medium, low"),
    }

    if let Some(category) = fields.get("category") {
        if !category.is_string() {
            errors.push(at("category"), "must be a string");
        }
    }

    if let Some(hint) = fields.get("seasonalHint").filter(|v| !v.is_null()) {
        if hint.as_str().and_then(Season::parse).is_none() {
            errors.push(at("seasonalHint"), "must be spring, summer, fall or winter");
        }
    }

    for key in [DUE_DATE_FIELD, SHADOW_DUE_FIELD, "lastCompleted"] {
        match fields.get(key) {
            None | Some(Value::Null) => {}
            Some(Value::String(raw)) if raw.trim().is_empty() => {}
            Some(Value::String(raw)) => {
                if parse_timestamp(raw).is_err() {
                    errors.push(at(key), format!("unparseable date '{raw}'"));
                }
            }
            Some(_) => errors.push(at(key), "must be a date string"),
        }
    }

    if let Some(flag) = fields.get("isCompleted") {
        if !flag.is_boolean() {
            errors.push(at("isCompleted"), "must be a boolean");
        }
    }
}
