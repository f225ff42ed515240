//! Constraint schema errors

use thiserror::Error;

/// Result type for constraint resolution
pub type ConstraintResult<T> = Result<T, ConstraintError>;

/// Errors raised while resolving constraints against a type schema.
///
/// The first violation aborts resolution; nothing is partially accepted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintError {
    #[error("unknown constraint '{key}' for type '{type_name}'")]
    UnknownConstraintKey { type_name: String, key: String },

    #[error("invalid value for constraint '{key}': expected {expected}, got {actual}")]
    InvalidConstraintValue {
        key: String,
        expected: String,
        actual: String,
    },

    #[error("invalid '{key}' constraints for element type '{item_type}': {source}")]
    InvalidNestedConstraints {
        key: String,
        item_type: String,
        #[source]
        source: Box<ConstraintError>,
    },

    #[error("no constraint schema registered for type '{0}'")]
    UnknownType(String),

    #[error("invalid type reference '{0}'")]
    InvalidType(String),
}

/// Result type for registry population
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors raised while populating a type registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("type '{0}' is already registered")]
    DuplicateType(String),

    #[error("'{0}' is not a valid scalar type name")]
    InvalidTypeName(String),
}

impl ConstraintError {
    /// Returns the offending constraint key, if any.
    ///
    /// For nested failures this is the reserved container key.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConstraintError::UnknownConstraintKey { key, .. }
            | ConstraintError::InvalidConstraintValue { key, .. }
            | ConstraintError::InvalidNestedConstraints { key, .. } => Some(key),
            ConstraintError::UnknownType(_) | ConstraintError::InvalidType(_) => None,
        }
    }

    /// Returns the wrapped error of a nested failure
    pub fn inner(&self) -> Option<&ConstraintError> {
        match self {
            ConstraintError::InvalidNestedConstraints { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Follows nested failures down to the innermost error
    pub fn root_cause(&self) -> &ConstraintError {
        let mut current = self;
        while let Some(inner) = current.inner() {
            current = inner;
        }
        current
    }
}
