//! Structural and semantic validation of untrusted payloads.
//!
//! # Responsibility
//! - Type-check an arbitrary parsed JSON value against one version's shape.
//! - Run that version's semantic checks on the typed result.
//!
//! # Invariants
//! - Pure function over its inputs; no side effects, no panics.
//! - A payload is accepted whole or rejected whole, never partially.

use crate::model::state::{PersistedState, StateValidationError};
use crate::schema::{is_supported_version, v1::StateV1, v2::StateV2, VersionedState};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a payload failed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The value does not structurally match the version's shape: missing
    /// field, wrong primitive type, enum value outside its set.
    Shape { version: u32, detail: String },
    /// Structurally sound, but a semantic invariant is violated.
    Semantic(StateValidationError),
    /// The caller asked for a version this build does not know.
    UnsupportedVersion(u32),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shape { version, detail } => {
                write!(f, "payload does not match v{version} shape: {detail}")
            }
            Self::Semantic(err) => write!(f, "{err}"),
            Self::UnsupportedVersion(version) => {
                write!(f, "no validator registered for version {version}")
            }
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Semantic(err) => Some(err),
            Self::Shape { .. } | Self::UnsupportedVersion(_) => None,
        }
    }
}

impl From<StateValidationError> for ValidationError {
    fn from(value: StateValidationError) -> Self {
        Self::Semantic(value)
    }
}

/// Validates `value` against the shape registered for `version`.
///
/// # Errors
/// - [`ValidationError::Shape`] when the structure does not match.
/// - [`ValidationError::Semantic`] when typed content breaks an invariant.
/// - [`ValidationError::UnsupportedVersion`] for versions outside the
///   registry.
pub fn validate(value: &Value, version: u32) -> Result<VersionedState, ValidationError> {
    if !is_supported_version(version) {
        return Err(ValidationError::UnsupportedVersion(version));
    }

    match version {
        1 => {
            let state: StateV1 = typed(value, version)?;
            state.validate()?;
            Ok(VersionedState::V1(state))
        }
        2 => {
            let state: StateV2 = typed(value, version)?;
            state.validate()?;
            Ok(VersionedState::V2(state))
        }
        3 => {
            let state: PersistedState = typed(value, version)?;
            state.validate()?;
            Ok(VersionedState::V3(state))
        }
        other => Err(ValidationError::UnsupportedVersion(other)),
    }
}

fn typed<T: serde::de::DeserializeOwned>(
    value: &Value,
    version: u32,
) -> Result<T, ValidationError> {
    serde_json::from_value(value.clone()).map_err(|err| ValidationError::Shape {
        version,
        detail: err.to_string(),
    })
}
