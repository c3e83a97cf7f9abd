//! Activity domain model.
//!
//! # Responsibility
//! - Define the canonical activity record and its planning buckets.
//! - Validate calendar/clock fields that serde cannot check structurally.
//!
//! # Invariants
//! - `id` is a non-empty string, stable for the lifetime of the record.
//! - `created_at`/`updated_at` are well-formed RFC 3339 timestamps.
//! - `order_index` carries manual-ordering state and round-trips unchanged;
//!   its consistency with drag/reorder semantics is owned by the UI layer.
//!
//! # See also
//! - docs/architecture/data-model.md

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;

/// Planning bucket an activity lives in.
///
/// `Scheduled` activities carry a concrete date; the other buckets hold
/// undated intentions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Placed on a concrete calendar day.
    Scheduled,
    /// Doable whenever, no date attached.
    Anytime,
    /// Parked for later review.
    Someday,
}

/// Validation failure for a single activity record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityValidationError {
    /// `id` is empty or whitespace-only.
    EmptyId,
    /// A timestamp field does not parse as RFC 3339.
    MalformedTimestamp {
        field: &'static str,
        value: String,
    },
    /// `date` does not parse as a `YYYY-MM-DD` calendar date.
    MalformedDate(String),
    /// `time` does not parse as a `HH:MM` wall-clock time.
    MalformedTime(String),
}

impl Display for ActivityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "activity id must not be empty"),
            Self::MalformedTimestamp { field, value } => {
                write!(f, "activity {field} is not an RFC 3339 timestamp: `{value}`")
            }
            Self::MalformedDate(value) => {
                write!(f, "activity date is not a YYYY-MM-DD date: `{value}`")
            }
            Self::MalformedTime(value) => {
                write!(f, "activity time is not a HH:MM time: `{value}`")
            }
        }
    }
}

impl Error for ActivityValidationError {}

/// Canonical activity record as restored from a backup payload.
///
/// Wire field names are camelCase; this is the shape the UI serializes and
/// the backup files carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Unique within the activities sequence. UUID v4 for locally created
    /// records; imported ids round-trip as-is.
    pub id: String,
    pub title: String,
    pub bucket: Bucket,
    /// `YYYY-MM-DD` when scheduled on a day.
    #[serde(default)]
    pub date: Option<String>,
    /// `HH:MM` wall-clock start.
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    pub note: String,
    pub is_done: bool,
    /// Manual ordering position; preserved verbatim across import/export.
    #[serde(default)]
    pub order_index: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl Activity {
    /// Creates a new activity with a generated id and current timestamps.
    pub fn new(title: impl Into<String>, bucket: Bucket) -> Self {
        let now = now_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            bucket,
            date: None,
            time: None,
            duration_minutes: None,
            note: String::new(),
            is_done: false,
            order_index: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Marks the activity done and refreshes `updated_at`.
    pub fn complete(&mut self) {
        self.is_done = true;
        self.touch();
    }

    /// Refreshes `updated_at` after a mutation.
    pub fn touch(&mut self) {
        self.updated_at = now_rfc3339();
    }

    /// Checks the semantic invariants of this record.
    ///
    /// # Errors
    /// - Returns the first violated invariant; a record is either fully
    ///   valid or rejected as a whole.
    pub fn validate(&self) -> Result<(), ActivityValidationError> {
        if self.id.trim().is_empty() {
            return Err(ActivityValidationError::EmptyId);
        }
        validate_timestamp("createdAt", &self.created_at)?;
        validate_timestamp("updatedAt", &self.updated_at)?;
        if let Some(date) = self.date.as_deref() {
            validate_date(date)?;
        }
        if let Some(time) = self.time.as_deref() {
            validate_clock_time(time)?;
        }
        Ok(())
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .expect("UTC time formats as RFC 3339")
}

pub(crate) fn validate_timestamp(
    field: &'static str,
    value: &str,
) -> Result<(), ActivityValidationError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|_| {
        ActivityValidationError::MalformedTimestamp {
            field,
            value: value.to_string(),
        }
    })?;
    Ok(())
}

pub(crate) fn validate_date(value: &str) -> Result<(), ActivityValidationError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value, &format)
        .map_err(|_| ActivityValidationError::MalformedDate(value.to_string()))?;
    Ok(())
}

pub(crate) fn validate_clock_time(value: &str) -> Result<(), ActivityValidationError> {
    let format = format_description!("[hour]:[minute]");
    Time::parse(value, &format)
        .map_err(|_| ActivityValidationError::MalformedTime(value.to_string()))?;
    Ok(())
}
