//! List configuration substructure.
//!
//! # Responsibility
//! - Carry the list configuration block whose shape evolves on its own
//!   version track, independent of the top-level payload version.
//!
//! # Invariants
//! - `version` must be a supported lists version.
//! - Entries other than `version` are opaque here and round-trip unchanged.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Latest lists-configuration version this build understands.
pub const LISTS_CURRENT_VERSION: u32 = 1;

/// Validation failure for the lists block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListsValidationError {
    /// Declared lists version is outside the supported range.
    UnsupportedVersion(u32),
}

impl Display for ListsValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedVersion(version) => write!(
                f,
                "lists version {version} is not supported (latest is {LISTS_CURRENT_VERSION})"
            ),
        }
    }
}

impl Error for ListsValidationError {}

/// Versioned list configuration, validated at the envelope level only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListsState {
    pub version: u32,
    /// Opaque configuration entries; owned by the list views, not by the
    /// persistence subsystem.
    #[serde(flatten)]
    pub entries: serde_json::Map<String, serde_json::Value>,
}

impl ListsState {
    /// Checks that the declared lists version is one this build supports.
    pub fn validate(&self) -> Result<(), ListsValidationError> {
        if self.version == 0 || self.version > LISTS_CURRENT_VERSION {
            return Err(ListsValidationError::UnsupportedVersion(self.version));
        }
        Ok(())
    }
}

impl Default for ListsState {
    fn default() -> Self {
        Self {
            version: LISTS_CURRENT_VERSION,
            entries: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ListsState, ListsValidationError, LISTS_CURRENT_VERSION};

    #[test]
    fn default_is_current_and_empty() {
        let lists = ListsState::default();
        assert_eq!(lists.version, LISTS_CURRENT_VERSION);
        assert!(lists.entries.is_empty());
        lists.validate().expect("default lists are valid");
    }

    #[test]
    fn unknown_entries_round_trip_unchanged() {
        let value = serde_json::json!({
            "version": 1,
            "pinned": ["groceries"],
            "collapsed": { "someday": true },
        });

        let lists: ListsState = serde_json::from_value(value.clone()).expect("lists parse");
        assert_eq!(lists.version, 1);
        assert_eq!(lists.entries.len(), 2);
        assert_eq!(
            serde_json::to_value(&lists).expect("lists serialize"),
            value
        );
    }

    #[test]
    fn future_lists_version_fails_validation() {
        let lists = ListsState {
            version: LISTS_CURRENT_VERSION + 1,
            entries: serde_json::Map::new(),
        };
        assert_eq!(
            lists.validate().unwrap_err(),
            ListsValidationError::UnsupportedVersion(LISTS_CURRENT_VERSION + 1)
        );
    }
}
