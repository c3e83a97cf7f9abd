//! Version 2 payload shape.
//!
//! V2 introduced the `lists` block, per-activity notes and the theme
//! preference. Activities do not yet carry `orderIndex`.

use crate::model::activity::{
    validate_clock_time, validate_date, validate_timestamp, Activity, ActivityValidationError,
    Bucket,
};
use crate::model::lists::ListsState;
use crate::model::settings::Settings;
use crate::model::state::{ensure_unique_ids, PersistedState, StateValidationError};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityV2 {
    pub id: String,
    pub title: String,
    pub bucket: Bucket,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    pub note: String,
    pub is_done: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl ActivityV2 {
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

    fn upgrade(self) -> Activity {
        Activity {
            id: self.id,
            title: self.title,
            bucket: self.bucket,
            date: self.date,
            time: self.time,
            duration_minutes: self.duration_minutes,
            note: self.note,
            is_done: self.is_done,
            order_index: None,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StateV2 {
    pub activities: Vec<ActivityV2>,
    pub lists: ListsState,
    pub settings: Settings,
}

impl StateV2 {
    /// Checks v2 semantic invariants.
    pub fn validate(&self) -> Result<(), StateValidationError> {
        ensure_unique_ids(self.activities.iter().map(|activity| activity.id.as_str()))?;
        for activity in &self.activities {
            activity.validate()?;
        }
        self.lists.validate()?;
        Ok(())
    }

    /// Upgrades one step, to the current shape.
    ///
    /// Manual ordering did not exist before v3, so every record starts
    /// without an `orderIndex`.
    pub fn upgrade(self) -> PersistedState {
        PersistedState {
            activities: self
                .activities
                .into_iter()
                .map(ActivityV2::upgrade)
                .collect(),
            lists: self.lists,
            settings: self.settings,
        }
    }
}
