//! Persistable cosmology state.

use std::fs;
use std::path::Path;

use cosmo_core::errors::{CosmoError, ErrorInfo};
use cosmo_core::{ParamsProvenance, SchemaVersion};
use cosmo_params::{CanonicalParams, RawParams};
use serde::{Deserialize, Serialize};

/// Record of the engine attached when the state was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineRecord {
    /// Registered engine name.
    pub name: String,
    /// Extra engine configuration.
    #[serde(default)]
    pub extra: RawParams,
}

/// Serializable snapshot of a cosmology: the merged raw input it was
/// compiled from, the compiled canonical set, and the attached engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmologyState {
    /// Schema of this payload.
    pub schema_version: SchemaVersion,
    /// Hash and timestamp of the compiled parameters.
    pub provenance: ParamsProvenance,
    /// Numerical options the parameters were compiled with.
    #[serde(default)]
    pub opts: cosmo_params::CompileOpts,
    /// Merged raw mapping the cosmology was compiled from.
    pub raw: RawParams,
    /// Compiled canonical parameter set.
    pub params: CanonicalParams,
    /// Attached engine, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineRecord>,
}

impl CosmologyState {
    /// Serializes the state to pretty JSON.
    pub fn to_json(&self) -> Result<String, CosmoError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| CosmoError::Serde(ErrorInfo::new("state-serialize", err.to_string())))
    }

    /// Deserializes a state from JSON.
    pub fn from_json(text: &str) -> Result<Self, CosmoError> {
        serde_json::from_str(text)
            .map_err(|err| CosmoError::Serde(ErrorInfo::new("state-deserialize", err.to_string())))
    }

    /// Writes the state to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CosmoError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|err| {
            CosmoError::Serde(
                ErrorInfo::new("state-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Reads a state from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CosmoError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| {
            CosmoError::Serde(
                ErrorInfo::new("state-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_json(&text)
    }
}
