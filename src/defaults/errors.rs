//! Default specification errors

use thiserror::Error;

use super::validator::DefaultPhase;

/// Result type for default specification operations
pub type DefaultResult<T> = Result<T, DefaultError>;

/// Default specification errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefaultError {
    #[error(
        "invalid {option} {value}: expected a zero-argument function, [\"constant\", value] \
         or [namespace, operation, [args]]. To use {value} as a literal default, \
         wrap it as [\"constant\", {value}]",
        option = .phase.option_name()
    )]
    InvalidDefaultSpecification { phase: DefaultPhase, value: String },

    #[error("no operation '{operation}' registered in namespace '{namespace}'")]
    UnresolvedCall { namespace: String, operation: String },
}
