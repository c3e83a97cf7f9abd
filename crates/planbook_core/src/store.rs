//! In-memory application store handle.
//!
//! # Responsibility
//! - Hold the live [`PersistedState`] the UI reads from.
//! - Define the replacement contract the import orchestrator hydrates
//!   through.
//!
//! # Invariants
//! - Replacement is wholesale: activities, lists and settings swap together
//!   or not at all.
//! - The orchestrator receives an explicit handle; there is no process-wide
//!   store singleton in core.

use crate::model::activity::Activity;
use crate::model::lists::ListsState;
use crate::model::settings::Settings;
use crate::model::state::PersistedState;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The in-memory store refused a validated state.
///
/// This is an internal invariant violation: the durable copy is already
/// ahead of memory when it surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydrationError {
    detail: String,
}

impl HydrationError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl Display for HydrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "store rejected hydration: {}", self.detail)
    }
}

impl Error for HydrationError {}

/// Store contract the orchestrator depends on.
pub trait StateStore {
    /// Replaces the held state wholesale.
    fn replace(&mut self, state: PersistedState) -> Result<(), HydrationError>;

    /// Read access to the held state.
    fn state(&self) -> &PersistedState;
}

/// The application-wide store implementation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppStore {
    state: PersistedState,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: PersistedState) -> Self {
        Self { state }
    }

    pub fn activities(&self) -> &[Activity] {
        &self.state.activities
    }

    pub fn lists(&self) -> &ListsState {
        &self.state.lists
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    /// Resets to the default empty state.
    pub fn reset(&mut self) {
        self.state = PersistedState::default();
    }
}

impl StateStore for AppStore {
    fn replace(&mut self, state: PersistedState) -> Result<(), HydrationError> {
        self.state = state;
        Ok(())
    }

    fn state(&self) -> &PersistedState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::{AppStore, StateStore};
    use crate::model::activity::{Activity, Bucket};
    use crate::model::state::PersistedState;

    #[test]
    fn replace_swaps_all_fields_together() {
        let mut store = AppStore::new();
        let incoming = PersistedState {
            activities: vec![Activity::new("review week", Bucket::Scheduled)],
            ..PersistedState::default()
        };

        store
            .replace(incoming.clone())
            .expect("app store accepts hydration");

        assert_eq!(store.state(), &incoming);
        assert_eq!(store.activities().len(), 1);
    }

    #[test]
    fn reset_returns_to_defaults() {
        let mut store = AppStore::from_state(PersistedState {
            activities: vec![Activity::new("stale", Bucket::Someday)],
            ..PersistedState::default()
        });

        store.reset();
        assert!(store.activities().is_empty());
    }
}
