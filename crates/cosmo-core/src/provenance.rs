//! Provenance and schema descriptors attached to serialized parameter sets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance information attached to a serialized cosmology state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ParamsProvenance {
    /// Canonical hash of the compiled parameter set.
    pub params_hash: String,
    /// ISO-8601 timestamp recording when the state was written.
    pub created_at: String,
    /// Version map for the crates involved in producing the state.
    pub tool_versions: BTreeMap<String, String>,
}

impl ParamsProvenance {
    /// Creates provenance stamped with the current time and this crate set's versions.
    pub fn stamped(params_hash: impl Into<String>) -> Self {
        let mut tool_versions = BTreeMap::new();
        tool_versions.insert("cosmo-core".to_string(), env!("CARGO_PKG_VERSION").to_string());
        Self {
            params_hash: params_hash.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
            tool_versions,
        }
    }
}
