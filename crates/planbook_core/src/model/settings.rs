//! User preference model.
//!
//! # Responsibility
//! - Define the settings block carried by every persisted payload.
//!
//! # Invariants
//! - Enum wire values are closed sets; anything outside them fails
//!   deserialization instead of being coerced to a default.

use serde::{Deserialize, Serialize};

/// First day of the planning week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Sunday,
    Monday,
}

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    System,
}

/// User preferences restored alongside activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub week_start: WeekStart,
    pub theme_mode: ThemeMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            week_start: WeekStart::Monday,
            theme_mode: ThemeMode::System,
        }
    }
}
