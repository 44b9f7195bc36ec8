//! Date helpers shared by the scheduling core and the persisted state.
//!
//! Due dates are always pinned to midday so that a date written in one
//! timezone never slips to the neighbouring day when read in another.

use super::error::{Result, ScheduleError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Canonical persisted timestamp layout. Sub-second digits appear only when
/// non-zero.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Canonical day layout used for user input and display.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Midday, the fixed time-of-day every due date carries.
pub fn midday() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Pins a calendar day to midday.
pub fn at_midday(date: NaiveDate) -> NaiveDateTime {
    date.and_time(midday())
}

/// Parses a timestamp in any of the layouts found in stored or imported data.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS[.fff]` and RFC 3339 with an
/// offset. Offsets are dropped by taking the wall-clock time they describe.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ScheduleError::InvalidDate("empty date".to_string()));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, TIMESTAMP_FORMAT) {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map(at_midday)
        .map_err(|_| ScheduleError::InvalidDate(input.to_string()))
}

/// Parses a due date and normalises it to midday of the day it names.
pub fn parse_due_date(input: &str) -> Result<NaiveDateTime> {
    parse_timestamp(input).map(|dt| at_midday(dt.date()))
}

pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Serde adapter for due dates: written in [`TIMESTAMP_FORMAT`], read leniently
/// and normalised to midday.
pub mod due_date {
    use chrono::NaiveDateTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_due_date(&raw).map_err(D::Error::custom)
    }
}

/// Serde adapter for required timestamps kept at full precision.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(D::Error::custom)
    }
}

/// Serde adapter for optional timestamps such as `lastCompleted`.
pub mod optional_timestamp {
    use chrono::NaiveDateTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => serializer.serialize_str(&super::format_timestamp(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => super::parse_timestamp(&raw).map(Some).map_err(D::Error::custom),
            _ => Ok(None),
        }
    }
}
