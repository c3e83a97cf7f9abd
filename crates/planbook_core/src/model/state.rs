//! Whole-application persisted state.
//!
//! # Responsibility
//! - Aggregate activities, list configuration and settings into the single
//!   value that import replaces and the gateway persists.
//! - Enforce cross-record invariants (id uniqueness).
//!
//! # Invariants
//! - State is replaced wholesale, never merged field-by-field.
//! - The on-disk `version` tag is envelope metadata and is not part of this
//!   value.
//!
//! # See also
//! - docs/architecture/persistence.md

use crate::model::activity::{Activity, ActivityValidationError};
use crate::model::lists::{ListsState, ListsValidationError};
use crate::model::settings::Settings;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure spanning the whole persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateValidationError {
    /// A single activity violated its own invariants.
    Activity(ActivityValidationError),
    /// Two activities share the same id.
    DuplicateActivityId(String),
    /// The lists block declared an unsupported version.
    Lists(ListsValidationError),
}

impl Display for StateValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Activity(err) => write!(f, "{err}"),
            Self::DuplicateActivityId(id) => write!(f, "duplicate activity id: `{id}`"),
            Self::Lists(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StateValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Activity(err) => Some(err),
            Self::DuplicateActivityId(_) => None,
            Self::Lists(err) => Some(err),
        }
    }
}

impl From<ActivityValidationError> for StateValidationError {
    fn from(value: ActivityValidationError) -> Self {
        Self::Activity(value)
    }
}

impl From<ListsValidationError> for StateValidationError {
    fn from(value: ListsValidationError) -> Self {
        Self::Lists(value)
    }
}

/// The complete in-memory planner state, as restored from a backup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub activities: Vec<Activity>,
    pub lists: ListsState,
    pub settings: Settings,
}

impl PersistedState {
    /// Checks the semantic invariants of the whole state.
    ///
    /// # Errors
    /// - Returns the first violation found; the state is accepted or
    ///   rejected as a whole.
    pub fn validate(&self) -> Result<(), StateValidationError> {
        ensure_unique_ids(self.activities.iter().map(|activity| activity.id.as_str()))?;
        for activity in &self.activities {
            activity.validate()?;
        }
        self.lists.validate()?;
        Ok(())
    }
}

/// Rejects the first id that appears more than once.
pub(crate) fn ensure_unique_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), StateValidationError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(StateValidationError::DuplicateActivityId(id.to_string()));
        }
    }
    Ok(())
}
