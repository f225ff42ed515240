//! Default specification validator
//!
//! Classifies a raw default into exactly one `DefaultSpec` variant:
//! - closure                              -> Deferred
//! - `null` / missing                     -> Absent
//! - `["constant", value]`                -> Constant
//! - `[namespace, operation, [args...]]`  -> IndirectCall
//!
//! Anything else is rejected. Only the shape is checked: nothing is
//! invoked or resolved here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::errors::{DefaultError, DefaultResult};
use super::spec::{DefaultSpec, RawDefault};
use crate::observability::{log_event_with_fields, Event};
use crate::schema::is_identifier;

/// Marker tag of the constant-wrapping form.
pub const CONSTANT_TAG: &str = "constant";

/// When a default applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultPhase {
    /// No value supplied on create
    Create,
    /// No value supplied on update
    Update,
}

impl DefaultPhase {
    /// Name of the attribute option this phase's default is declared in
    pub fn option_name(&self) -> &'static str {
        match self {
            DefaultPhase::Create => "default",
            DefaultPhase::Update => "update_default",
        }
    }
}

impl fmt::Display for DefaultPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultPhase::Create => write!(f, "create"),
            DefaultPhase::Update => write!(f, "update"),
        }
    }
}

/// Validates a raw default for the given phase.
///
/// The phase is reported in errors but does not change the rules.
///
/// # Errors
///
/// `InvalidDefaultSpecification` if the value matches none of the
/// supported shapes.
pub fn validate_default(raw: Option<&RawDefault>, phase: DefaultPhase) -> DefaultResult<DefaultSpec> {
    let result = match raw {
        None => Ok(DefaultSpec::Absent),
        Some(RawDefault::Deferred(f)) => Ok(DefaultSpec::Deferred(f.clone())),
        Some(RawDefault::Value(value)) => classify(value).ok_or_else(|| {
            DefaultError::InvalidDefaultSpecification {
                phase,
                value: value.to_string(),
            }
        }),
    };

    if let Err(err) = &result {
        let message = err.to_string();
        log_event_with_fields(
            Event::DefaultRejected,
            &[("option", phase.option_name()), ("reason", message.as_str())],
        );
    }

    result
}

fn classify(value: &Value) -> Option<DefaultSpec> {
    match value {
        Value::Null => Some(DefaultSpec::Absent),
        Value::Array(parts) => match parts.as_slice() {
            [Value::String(tag), constant] if tag == CONSTANT_TAG => {
                Some(DefaultSpec::Constant(constant.clone()))
            }
            [Value::String(namespace), Value::String(operation), Value::Array(args)]
                if is_identifier(namespace) && is_identifier(operation) =>
            {
                Some(DefaultSpec::IndirectCall {
                    namespace: namespace.clone(),
                    operation: operation.clone(),
                    args: args.clone(),
                })
            }
            _ => None,
        },
        _ => None,
    }
}
