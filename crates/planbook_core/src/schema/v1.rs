//! Version 1 payload shape, the earliest backup format.
//!
//! V1 payloads predate the `version` tag entirely: a payload without a tag is
//! read as v1. Activities carry no `note` and no `orderIndex`, settings know
//! only `weekStart`, and there is no `lists` block.

use crate::model::activity::{
    validate_clock_time, validate_date, validate_timestamp, ActivityValidationError, Bucket,
};
use crate::model::settings::{Settings, ThemeMode, WeekStart};
use crate::model::state::{ensure_unique_ids, StateValidationError};
use crate::schema::v2::{ActivityV2, StateV2};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityV1 {
    pub id: String,
    pub title: String,
    pub bucket: Bucket,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    pub is_done: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl ActivityV1 {
    fn validate(&self) -> Result<(), ActivityValidationError> {
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

    fn upgrade(self) -> ActivityV2 {
        ActivityV2 {
            id: self.id,
            title: self.title,
            bucket: self.bucket,
            date: self.date,
            time: self.time,
            duration_minutes: self.duration_minutes,
            note: String::new(),
            is_done: self.is_done,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsV1 {
    pub week_start: WeekStart,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StateV1 {
    pub activities: Vec<ActivityV1>,
    pub settings: SettingsV1,
}

impl StateV1 {
    /// Checks v1 semantic invariants (id uniqueness, calendar fields).
    pub fn validate(&self) -> Result<(), StateValidationError> {
        ensure_unique_ids(self.activities.iter().map(|activity| activity.id.as_str()))?;
        for activity in &self.activities {
            activity.validate()?;
        }
        Ok(())
    }

    /// Upgrades one step, to the v2 shape.
    ///
    /// Fields v1 never had get their introduction-time defaults: empty
    /// notes, system theme, empty list configuration.
    pub fn upgrade(self) -> StateV2 {
        StateV2 {
            activities: self
                .activities
                .into_iter()
                .map(ActivityV1::upgrade)
                .collect(),
            lists: Default::default(),
            settings: Settings {
                week_start: self.settings.week_start,
                theme_mode: ThemeMode::System,
            },
        }
    }
}
