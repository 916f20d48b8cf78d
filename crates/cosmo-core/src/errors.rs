//! Structured error types shared across the cosmo crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`CosmoError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (parameter names, values, iteration counts).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the cosmo parameter engine.
///
/// Every failure is fatal and synchronous: parameter compilation either fully
/// succeeds or returns one of these with nothing observable changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum CosmoError {
    /// Two or more aliases of the same physical quantity supplied together.
    #[error("conflict error: {0}")]
    Conflict(ErrorInfo),
    /// A parameter name with no definition and no caller-supplied default.
    #[error("unknown parameter: {0}")]
    UnknownParameter(ErrorInfo),
    /// Physically inadmissible input (negative masses, impossible hierarchy sum, ...).
    #[error("unphysical input: {0}")]
    Unphysical(ErrorInfo),
    /// A root-finding iteration exhausted its budget or left the finite domain.
    #[error("numerical non-convergence: {0}")]
    Convergence(ErrorInfo),
    /// A supplied value has the wrong type or shape for its parameter.
    #[error("value error: {0}")]
    Value(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// Engine registry and capability errors.
    #[error("engine error: {0}")]
    Engine(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl CosmoError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            CosmoError::Conflict(info)
            | CosmoError::UnknownParameter(info)
            | CosmoError::Unphysical(info)
            | CosmoError::Convergence(info)
            | CosmoError::Value(info)
            | CosmoError::Serde(info)
            | CosmoError::Engine(info) => info,
        }
    }
}
