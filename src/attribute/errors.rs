//! Attribute error types
//!
//! Error codes:
//! - ATTR_UNKNOWN_CONSTRAINT_KEY
//! - ATTR_INVALID_CONSTRAINT_VALUE
//! - ATTR_INVALID_NESTED_CONSTRAINTS
//! - ATTR_INVALID_DEFAULT_SPECIFICATION
//! - ATTR_UNRESOLVED_DEFAULT_CALL
//! - ATTR_UNKNOWN_TYPE
//! - ATTR_INVALID_TYPE
//! - ATTR_INVALID_OPTION
//!
//! Every error names the attribute it was raised for. The first failure
//! aborts validation of that attribute; aggregation across attributes is
//! left to the caller.

use std::fmt;

use crate::defaults::DefaultError;
use crate::schema::ConstraintError;

/// Attribute error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeErrorCode {
    /// Constraint key not declared by the type's schema
    UnknownConstraintKey,
    /// Constraint value fails its key's rule
    InvalidConstraintValue,
    /// Element constraints under `items` failed
    InvalidNestedConstraints,
    /// Default matches none of the supported shapes
    InvalidDefaultSpecification,
    /// Indirect call default could not be resolved
    UnresolvedDefaultCall,
    /// No constraint schema registered for the type
    UnknownType,
    /// Unparsable type reference
    InvalidType,
    /// Rejected option value or combination
    InvalidOption,
}

impl AttributeErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownConstraintKey => "ATTR_UNKNOWN_CONSTRAINT_KEY",
            Self::InvalidConstraintValue => "ATTR_INVALID_CONSTRAINT_VALUE",
            Self::InvalidNestedConstraints => "ATTR_INVALID_NESTED_CONSTRAINTS",
            Self::InvalidDefaultSpecification => "ATTR_INVALID_DEFAULT_SPECIFICATION",
            Self::UnresolvedDefaultCall => "ATTR_UNRESOLVED_DEFAULT_CALL",
            Self::UnknownType => "ATTR_UNKNOWN_TYPE",
            Self::InvalidType => "ATTR_INVALID_TYPE",
            Self::InvalidOption => "ATTR_INVALID_OPTION",
        }
    }
}

impl fmt::Display for AttributeErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// What went wrong, by subsystem
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeErrorKind {
    /// Constraint resolution failed
    Constraint(ConstraintError),
    /// Default specification failed
    Default(DefaultError),
    /// An attribute option was rejected
    Option { option: String, reason: String },
}

/// Attribute error with the offending attribute's name
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeError {
    attribute: String,
    kind: AttributeErrorKind,
}

impl AttributeError {
    /// Wrap a constraint failure
    pub fn constraint(attribute: impl Into<String>, err: ConstraintError) -> Self {
        Self {
            attribute: attribute.into(),
            kind: AttributeErrorKind::Constraint(err),
        }
    }

    /// Wrap a default specification failure
    pub fn default_spec(attribute: impl Into<String>, err: DefaultError) -> Self {
        Self {
            attribute: attribute.into(),
            kind: AttributeErrorKind::Default(err),
        }
    }

    /// Create an invalid option error
    pub fn invalid_option(
        attribute: impl Into<String>,
        option: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            kind: AttributeErrorKind::Option {
                option: option.into(),
                reason: reason.into(),
            },
        }
    }

    /// Returns the error code
    pub fn code(&self) -> AttributeErrorCode {
        match &self.kind {
            AttributeErrorKind::Constraint(err) => match err {
                ConstraintError::UnknownConstraintKey { .. } => AttributeErrorCode::UnknownConstraintKey,
                ConstraintError::InvalidConstraintValue { .. } => AttributeErrorCode::InvalidConstraintValue,
                ConstraintError::InvalidNestedConstraints { .. } => {
                    AttributeErrorCode::InvalidNestedConstraints
                }
                ConstraintError::UnknownType(_) => AttributeErrorCode::UnknownType,
                ConstraintError::InvalidType(_) => AttributeErrorCode::InvalidType,
            },
            AttributeErrorKind::Default(err) => match err {
                DefaultError::InvalidDefaultSpecification { .. } => {
                    AttributeErrorCode::InvalidDefaultSpecification
                }
                DefaultError::UnresolvedCall { .. } => AttributeErrorCode::UnresolvedDefaultCall,
            },
            AttributeErrorKind::Option { .. } => AttributeErrorCode::InvalidOption,
        }
    }

    /// Returns the name of the offending attribute
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Returns the error kind
    pub fn kind(&self) -> &AttributeErrorKind {
        &self.kind
    }

    /// Returns the constraint failure, if this is one
    pub fn constraint_error(&self) -> Option<&ConstraintError> {
        match &self.kind {
            AttributeErrorKind::Constraint(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the default specification failure, if this is one
    pub fn default_error(&self) -> Option<&DefaultError> {
        match &self.kind {
            AttributeErrorKind::Default(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the offending constraint key or option name
    pub fn key(&self) -> Option<&str> {
        match &self.kind {
            AttributeErrorKind::Constraint(err) => err.key(),
            AttributeErrorKind::Default(_) => None,
            AttributeErrorKind::Option { option, .. } => Some(option.as_str()),
        }
    }

    /// Returns the human-readable message
    pub fn message(&self) -> String {
        match &self.kind {
            AttributeErrorKind::Constraint(err) => err.to_string(),
            AttributeErrorKind::Default(err) => err.to_string(),
            AttributeErrorKind::Option { option, reason } => {
                format!("invalid option '{}': {}", option, reason)
            }
        }
    }
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: attribute '{}': {}", self.code(), self.attribute, self.message())
    }
}

impl std::error::Error for AttributeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            AttributeErrorKind::Constraint(err) => Some(err),
            AttributeErrorKind::Default(err) => Some(err),
            AttributeErrorKind::Option { .. } => None,
        }
    }
}

/// Result type for attribute operations
pub type AttrResult<T> = Result<T, AttributeError>;
