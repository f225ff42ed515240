//! Constraint validation against a single type schema
//!
//! Validation semantics:
//! - Every supplied key must be declared by the schema
//! - Every supplied value must satisfy its key's rule
//! - Omitted keys with a declared default are filled in
//! - No implicit coercion of supplied values
//!
//! Keys are checked in the caller's order so the first offending key
//! is the one reported.

use regex::Regex;
use serde_json::Value;

use super::errors::{ConstraintError, ConstraintResult};
use super::types::{is_identifier, ConstraintRule, ConstraintSchema, Constraints};

impl ConstraintRule {
    /// Checks `value` against this rule.
    ///
    /// On failure returns a description of what was expected.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        match self {
            ConstraintRule::Any => Ok(()),
            ConstraintRule::Boolean => {
                if value.is_boolean() {
                    Ok(())
                } else {
                    Err(self.expected())
                }
            }
            ConstraintRule::Integer { min, max } => {
                let n = value.as_i64().ok_or_else(|| self.expected())?;
                if min.map_or(false, |m| n < m) || max.map_or(false, |m| n > m) {
                    return Err(self.expected());
                }
                Ok(())
            }
            ConstraintRule::Number { min, max } => {
                let n = value.as_f64().ok_or_else(|| self.expected())?;
                if min.map_or(false, |m| n < m) || max.map_or(false, |m| n > m) {
                    return Err(self.expected());
                }
                Ok(())
            }
            ConstraintRule::String => {
                if value.is_string() {
                    Ok(())
                } else {
                    Err(self.expected())
                }
            }
            ConstraintRule::Regex => {
                let pattern = value.as_str().ok_or_else(|| self.expected())?;
                Regex::new(pattern)
                    .map(|_| ())
                    .map_err(|e| format!("{} ({})", self.expected(), e))
            }
            ConstraintRule::Identifier => match value.as_str() {
                Some(s) if is_identifier(s) => Ok(()),
                _ => Err(self.expected()),
            },
            ConstraintRule::OneOf { values } => {
                if values.contains(value) {
                    Ok(())
                } else {
                    Err(self.expected())
                }
            }
            ConstraintRule::ListOf { item } => {
                let elems = value.as_array().ok_or_else(|| self.expected())?;
                for (i, elem) in elems.iter().enumerate() {
                    item.check(elem)
                        .map_err(|inner| format!("{} (element [{}]: {})", self.expected(), i, inner))?;
                }
                Ok(())
            }
        }
    }

    /// Human-readable description of the accepted values
    pub fn expected(&self) -> String {
        match self {
            ConstraintRule::Any => "any value".into(),
            ConstraintRule::Boolean => "boolean".into(),
            ConstraintRule::Integer { min, max } => bounded("integer", min, max),
            ConstraintRule::Number { min, max } => bounded("number", min, max),
            ConstraintRule::String => "string".into(),
            ConstraintRule::Regex => "valid regular expression".into(),
            ConstraintRule::Identifier => "identifier".into(),
            ConstraintRule::OneOf { values } => {
                let options: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                format!("one of [{}]", options.join(", "))
            }
            ConstraintRule::ListOf { item } => format!("list of {}", item.expected()),
        }
    }
}

fn bounded<T: std::fmt::Display>(name: &str, min: &Option<T>, max: &Option<T>) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) => format!("{} in {}..={}", name, lo, hi),
        (Some(lo), None) => format!("{} >= {}", name, lo),
        (None, Some(hi)) => format!("{} <= {}", name, hi),
        (None, None) => name.to_string(),
    }
}

impl ConstraintSchema {
    /// Validates a constraint mapping and returns it fully populated.
    ///
    /// The result holds every supplied key plus the declared default of
    /// each omitted key that has one.
    ///
    /// # Errors
    ///
    /// - `UnknownConstraintKey` for a key the schema does not declare
    /// - `InvalidConstraintValue` for a value that fails its rule
    pub fn validate(&self, type_name: &str, constraints: &Constraints) -> ConstraintResult<Constraints> {
        for (key, value) in constraints {
            let declared = self.get(key).ok_or_else(|| ConstraintError::UnknownConstraintKey {
                type_name: type_name.to_string(),
                key: key.clone(),
            })?;

            declared
                .rule
                .check(value)
                .map_err(|expected| ConstraintError::InvalidConstraintValue {
                    key: key.clone(),
                    expected,
                    actual: describe(value),
                })?;
        }

        let mut validated = constraints.clone();
        for declared in self.keys() {
            if let Some(default) = &declared.default {
                if !validated.contains_key(&declared.name) {
                    validated.insert(declared.name.clone(), default.clone());
                }
            }
        }

        Ok(validated)
    }
}

/// Renders a value with its JSON type for error messages.
pub(crate) fn describe(value: &Value) -> String {
    format!("{} {}", json_type_name(value), value)
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
