//! Raw, possibly redundant parameter mappings as supplied by the caller.

use cosmo_core::errors::{CosmoError, ErrorInfo};
use cosmo_core::ParamValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from parameter name to value.
///
/// May contain mutually-conflicting entries; that is an error state detected
/// by [`crate::check_conflicts`], never silently resolved here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawParams(IndexMap<String, ParamValue>);

impl RawParams {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Looks up a value by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    /// Whether the mapping contains `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Removes and returns a value, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.0.shift_remove(name)
    }

    /// Iterates over names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the wrapper and returns the underlying map.
    pub fn into_inner(self) -> IndexMap<String, ParamValue> {
        self.0
    }

    /// Parses a mapping from a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, CosmoError> {
        serde_yaml::from_str(text).map_err(|err| {
            CosmoError::Serde(
                ErrorInfo::new("raw-params-yaml", "failed to parse parameter YAML")
                    .with_context("error", err.to_string()),
            )
        })
    }

    /// Parses a mapping from a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, CosmoError> {
        serde_json::from_str(text).map_err(|err| {
            CosmoError::Serde(
                ErrorInfo::new("raw-params-json", "failed to parse parameter JSON")
                    .with_context("error", err.to_string()),
            )
        })
    }
}

impl FromIterator<(String, ParamValue)> for RawParams {
    fn from_iter<T: IntoIterator<Item = (String, ParamValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
