//! Logical types and constraint schema definitions
//!
//! A logical type is either a scalar name looked up in the type registry
//! or a container wrapping an element type:
//! - `string`, `integer`, `timestamp`, ...
//! - `array<integer>`, `array<array<string>>`
//!
//! Constraint schemas are data: an ordered list of keys, each with the
//! rule its value must satisfy and an optional default.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::errors::ConstraintError;

/// Validated or raw constraint mapping for one attribute.
///
/// Iterates in insertion order: caller keys first, then filled defaults
/// in schema order.
pub type Constraints = serde_json::Map<String, Value>;

/// Reserved constraint key holding element-scoped constraints of a container.
pub const ITEMS_KEY: &str = "items";

/// Name of the container type constructor.
pub const ARRAY_TYPE: &str = "array";

/// A reference into the type registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogicalType {
    /// Non-container type, identified by its registry name
    Scalar(String),
    /// Homogeneous container of the element type
    Container(Box<LogicalType>),
}

impl LogicalType {
    /// Create a scalar type reference
    pub fn scalar(name: impl Into<String>) -> Self {
        LogicalType::Scalar(name.into())
    }

    /// Create a container type wrapping `element`
    pub fn array_of(element: LogicalType) -> Self {
        LogicalType::Container(Box::new(element))
    }

    /// Returns the registry name used for schema lookup.
    ///
    /// Containers resolve to the container constructor's own schema.
    pub fn type_name(&self) -> &str {
        match self {
            LogicalType::Scalar(name) => name,
            LogicalType::Container(_) => ARRAY_TYPE,
        }
    }

    /// Returns whether this is a container type
    pub fn is_container(&self) -> bool {
        matches!(self, LogicalType::Container(_))
    }

    /// Returns the element type of a container
    pub fn item_type(&self) -> Option<&LogicalType> {
        match self {
            LogicalType::Container(element) => Some(element),
            LogicalType::Scalar(_) => None,
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalType::Scalar(name) => write!(f, "{}", name),
            LogicalType::Container(element) => write!(f, "{}<{}>", ARRAY_TYPE, element),
        }
    }
}

impl FromStr for LogicalType {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let prefix = format!("{}<", ARRAY_TYPE);

        if let Some(rest) = trimmed.strip_prefix(&prefix) {
            let inner = rest
                .strip_suffix('>')
                .ok_or_else(|| ConstraintError::InvalidType(s.to_string()))?;
            return Ok(LogicalType::array_of(inner.parse()?));
        }

        if is_identifier(trimmed) {
            Ok(LogicalType::Scalar(trimmed.to_string()))
        } else {
            Err(ConstraintError::InvalidType(s.to_string()))
        }
    }
}

impl TryFrom<String> for LogicalType {
    type Error = ConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LogicalType> for String {
    fn from(value: LogicalType) -> Self {
        value.to_string()
    }
}

/// Returns whether `s` is a symbolic identifier.
///
/// Identifiers start with a letter or underscore and continue with
/// alphanumerics, underscores, `.`, `?` or `!`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '?' | '!'))
}

/// The rule a single constraint value must satisfy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstraintRule {
    /// Any value
    Any,
    /// `true` or `false`
    Boolean,
    /// Integer, optionally bounded (inclusive)
    Integer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
    },
    /// Integer or float, optionally bounded (inclusive)
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// Any string
    String,
    /// String that compiles as a regular expression
    Regex,
    /// Symbolic identifier string
    Identifier,
    /// One of a fixed set of values
    OneOf { values: Vec<Value> },
    /// List whose every element satisfies the inner rule
    ListOf { item: Box<ConstraintRule> },
}

impl ConstraintRule {
    /// Non-negative integer
    pub fn non_negative_integer() -> Self {
        ConstraintRule::Integer {
            min: Some(0),
            max: None,
        }
    }

    /// Unbounded integer
    pub fn integer() -> Self {
        ConstraintRule::Integer {
            min: None,
            max: None,
        }
    }

    /// Unbounded number
    pub fn number() -> Self {
        ConstraintRule::Number {
            min: None,
            max: None,
        }
    }

    /// One of the given string values
    pub fn one_of_strs(values: &[&str]) -> Self {
        ConstraintRule::OneOf {
            values: values.iter().map(|v| Value::String((*v).to_string())).collect(),
        }
    }

    /// List of values satisfying `item`
    pub fn list_of(item: ConstraintRule) -> Self {
        ConstraintRule::ListOf {
            item: Box::new(item),
        }
    }
}

/// One legal key of a constraint schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintKey {
    /// Constraint key name
    pub name: String,
    /// Rule the supplied value must satisfy
    pub rule: ConstraintRule,
    /// Value filled in when the key is omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The set of legal constraint keys for one type, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintSchema {
    keys: Vec<ConstraintKey>,
}

impl ConstraintSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key without a default
    pub fn key(mut self, name: impl Into<String>, rule: ConstraintRule) -> Self {
        self.push(ConstraintKey {
            name: name.into(),
            rule,
            default: None,
            description: None,
        });
        self
    }

    /// Add a key with a default filled in when omitted
    pub fn key_with_default(
        mut self,
        name: impl Into<String>,
        rule: ConstraintRule,
        default: Value,
    ) -> Self {
        self.push(ConstraintKey {
            name: name.into(),
            rule,
            default: Some(default),
            description: None,
        });
        self
    }

    /// Insert a key, replacing an existing key of the same name in place
    pub fn push(&mut self, key: ConstraintKey) {
        match self.keys.iter_mut().find(|k| k.name == key.name) {
            Some(existing) => *existing = key,
            None => self.keys.push(key),
        }
    }

    /// Look up a key by name
    pub fn get(&self, name: &str) -> Option<&ConstraintKey> {
        self.keys.iter().find(|k| k.name == name)
    }

    /// Returns whether `name` is a legal key
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &ConstraintKey> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
