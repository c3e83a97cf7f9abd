//! Payload schema registry.
//!
//! # Responsibility
//! - Declare the supported persisted-payload versions and the current one.
//! - Join every version's typed shape into one exhaustive enum so that a new
//!   version is a compile-time-checked addition to the migration chain.
//!
//! # Invariants
//! - Version numbers are contiguous from [`EARLIEST_VERSION`] to
//!   [`CURRENT_VERSION`].
//! - Payloads without a `version` tag are the earliest format.
//!
//! # See also
//! - docs/architecture/persistence.md

pub mod migrate;
pub mod v1;
pub mod v2;
pub mod validate;

use crate::model::state::PersistedState;

/// Oldest payload version with an exercised upgrade path.
pub const EARLIEST_VERSION: u32 = 1;

/// Version tag written by [`crate::storage::PersistenceGateway::save`].
pub const CURRENT_VERSION: u32 = 3;

/// Returns whether this build can validate and migrate `version`.
pub fn is_supported_version(version: u32) -> bool {
    (EARLIEST_VERSION..=CURRENT_VERSION).contains(&version)
}

/// A validated payload at some point along the migration chain.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionedState {
    V1(v1::StateV1),
    V2(v2::StateV2),
    V3(PersistedState),
}

impl VersionedState {
    /// The schema version this value conforms to.
    pub fn version(&self) -> u32 {
        match self {
            Self::V1(_) => 1,
            Self::V2(_) => 2,
            Self::V3(_) => 3,
        }
    }
}
