//! Version detection and forward migration of backup payloads.
//!
//! # Responsibility
//! - Read the declared payload version (absent tag means the earliest
//!   format).
//! - Walk the pairwise upgrade chain in strictly increasing order, with each
//!   step re-validated before the next one runs.
//!
//! # Invariants
//! - A current-version payload is validate-only; migration is idempotent on
//!   it.
//! - No partially-upgraded value ever escapes this module: any invalid
//!   intermediate fails the whole migration.
//!
//! # See also
//! - docs/architecture/persistence.md

use crate::model::state::PersistedState;
use crate::schema::validate::{validate, ValidationError};
use crate::schema::{is_supported_version, VersionedState, EARLIEST_VERSION};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a payload could not be brought to the current version.
#[derive(Debug, Clone, PartialEq)]
pub enum MigrateError {
    /// The payload is not a JSON object.
    NotAMapping,
    /// The `version` tag is present but not an integer.
    MalformedVersionTag,
    /// The declared version has no registered upgrade path (e.g. a payload
    /// from a newer build).
    UnsupportedVersion { declared: u64 },
    /// A version's shape or semantic check failed, before or between
    /// upgrade steps.
    Validation(ValidationError),
}

impl Display for MigrateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAMapping => write!(f, "payload is not a JSON object"),
            Self::MalformedVersionTag => write!(f, "version tag is not an integer"),
            Self::UnsupportedVersion { declared } => {
                write!(f, "payload version {declared} is not supported")
            }
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MigrateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for MigrateError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl VersionedState {
    /// Applies exactly one registered upgrade transform and re-validates the
    /// result. Already-current values pass through unchanged.
    fn upgrade_once(self) -> Result<VersionedState, ValidationError> {
        match self {
            Self::V1(state) => {
                let next = state.upgrade();
                next.validate()?;
                Ok(Self::V2(next))
            }
            Self::V2(state) => {
                let next = state.upgrade();
                next.validate()?;
                Ok(Self::V3(next))
            }
            Self::V3(state) => Ok(Self::V3(state)),
        }
    }
}

/// Reads the version tag off a parsed payload.
///
/// A missing tag means the earliest format, which predates tagging.
pub fn detect_version(value: &Value) -> Result<u32, MigrateError> {
    let mapping = value.as_object().ok_or(MigrateError::NotAMapping)?;
    let declared = match mapping.get("version") {
        None => return Ok(EARLIEST_VERSION),
        Some(tag) => tag.as_u64().ok_or(MigrateError::MalformedVersionTag)?,
    };

    match u32::try_from(declared) {
        Ok(version) if is_supported_version(version) => Ok(version),
        _ => Err(MigrateError::UnsupportedVersion { declared }),
    }
}

/// Validates `value` at its declared version and migrates it to the current
/// shape.
///
/// # Errors
/// - Unknown or malformed versions fail before any transform runs.
/// - A failed shape/semantic check at any step fails the whole migration;
///   no partially-upgraded value is surfaced.
pub fn migrate(value: &Value) -> Result<PersistedState, MigrateError> {
    let version = detect_version(value)?;
    let mut state = validate(value, version)?;

    loop {
        state = match state {
            VersionedState::V3(current) => return Ok(current),
            older => older.upgrade_once()?,
        };
    }
}
