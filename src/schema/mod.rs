//! Constraint schemas and the type registry
//!
//! Every logical type owns a constraint schema: the keys an attribute of
//! that type may carry in its `constraints`, the rule each value must
//! satisfy and the default filled in when a key is omitted.
//!
//! # Design Principles
//!
//! - Schemas are data, not code
//! - Unknown keys are errors, never silently accepted
//! - Containers validate element constraints recursively under `items`
//! - Deterministic, side-effect free resolution

mod catalog;
mod errors;
mod registry;
mod resolver;
mod types;
mod validator;

pub use catalog::builtin_types;
pub use errors::{ConstraintError, ConstraintResult, RegistryError, RegistryResult};
pub use registry::{BuiltinRegistry, TypeRegistry};
pub use resolver::ConstraintResolver;
pub use types::{
    is_identifier, ConstraintKey, ConstraintRule, ConstraintSchema, Constraints, LogicalType,
    ARRAY_TYPE, ITEMS_KEY,
};
