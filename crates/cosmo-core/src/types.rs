use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CosmoError, ErrorInfo};

/// Value attached to a parameter name in a raw or canonical mapping.
///
/// Integers in JSON/YAML inputs deserialize into the [`ParamValue::Float`]
/// arm; there is no separate integer variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean flag.
    Bool(bool),
    /// Scalar numeric value.
    Float(f64),
    /// String flag or name.
    Str(String),
    /// Sequence of numeric values.
    Floats(Vec<f64>),
    /// Sequence of string flags.
    Strs(Vec<String>),
}

impl ParamValue {
    /// Short label for the variant, used in error context.
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "bool",
            ParamValue::Float(_) => "float",
            ParamValue::Str(_) => "string",
            ParamValue::Floats(_) => "float-list",
            ParamValue::Strs(_) => "string-list",
        }
    }

    /// Returns the scalar numeric value, or a value error.
    pub fn as_f64(&self, name: &str) -> Result<f64, CosmoError> {
        match self {
            ParamValue::Float(value) => Ok(*value),
            other => Err(value_error(name, "float", other)),
        }
    }

    /// Returns the boolean value, or a value error.
    pub fn as_bool(&self, name: &str) -> Result<bool, CosmoError> {
        match self {
            ParamValue::Bool(value) => Ok(*value),
            other => Err(value_error(name, "bool", other)),
        }
    }

    /// Returns the string value, or a value error.
    pub fn as_str(&self, name: &str) -> Result<&str, CosmoError> {
        match self {
            ParamValue::Str(value) => Ok(value),
            other => Err(value_error(name, "string", other)),
        }
    }

    /// Returns the numeric sequence, promoting a scalar to a single-element list.
    pub fn as_f64_list(&self, name: &str) -> Result<Vec<f64>, CosmoError> {
        match self {
            ParamValue::Float(value) => Ok(vec![*value]),
            ParamValue::Floats(values) => Ok(values.clone()),
            other => Err(value_error(name, "float or float-list", other)),
        }
    }

    /// Whether the value is a scalar rather than a sequence.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, ParamValue::Floats(_) | ParamValue::Strs(_))
    }
}

fn value_error(name: &str, expected: &str, found: &ParamValue) -> CosmoError {
    CosmoError::Value(
        ErrorInfo::new("value-type", format!("parameter {name} must be a {expected}"))
            .with_context("parameter", name)
            .with_context("found", found.kind()),
    )
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Float(value as f64)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<Vec<f64>> for ParamValue {
    fn from(values: Vec<f64>) -> Self {
        ParamValue::Floats(values)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Strs(values)
    }
}

impl From<&[f64]> for ParamValue {
    fn from(values: &[f64]) -> Self {
        ParamValue::Floats(values.to_vec())
    }
}

/// One massive relic (ncdm) species.
///
/// Created by the parameter compiler, consumed read-only afterwards; a new
/// compilation produces a new list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NcdmSpecies {
    /// Rest mass, eV.
    pub mass_ev: f64,
    /// Temperature ratio with respect to the CMB.
    pub t_ncdm: f64,
}

/// Assumed ordering pattern for distributing a summed neutrino mass across
/// three species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hierarchy {
    /// m1 < m2 < m3.
    Normal,
    /// Two near-degenerate heavy states, one light.
    Inverted,
    /// All three masses equal.
    Degenerate,
}

impl Hierarchy {
    /// Parses a hierarchy name; unknown names are fatal.
    pub fn parse(name: &str) -> Result<Self, CosmoError> {
        match name {
            "normal" => Ok(Hierarchy::Normal),
            "inverted" => Ok(Hierarchy::Inverted),
            "degenerate" => Ok(Hierarchy::Degenerate),
            other => Err(CosmoError::Unphysical(
                ErrorInfo::new("unknown-hierarchy", format!("unknown neutrino hierarchy {other}"))
                    .with_hint("expected one of normal, inverted, degenerate"),
            )),
        }
    }
}

impl fmt::Display for Hierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Hierarchy::Normal => "normal",
            Hierarchy::Inverted => "inverted",
            Hierarchy::Degenerate => "degenerate",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchy_parse_rejects_unknown_names() {
        assert_eq!(Hierarchy::parse("inverted").unwrap(), Hierarchy::Inverted);
        let err = Hierarchy::parse("sideways").unwrap_err();
        assert_eq!(err.info().code, "unknown-hierarchy");
    }

    #[test]
    fn scalar_promotes_to_list() {
        let value = ParamValue::Float(0.06);
        assert_eq!(value.as_f64_list("m_ncdm").unwrap(), vec![0.06]);
        let err = ParamValue::Bool(true).as_f64_list("m_ncdm").unwrap_err();
        assert_eq!(err.info().code, "value-type");
    }
}
