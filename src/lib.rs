//! attrdef - attribute definition validation and normalization
//!
//! Validates declarative attribute definitions against type-dependent
//! constraint schemas and classifies their default-value specifications.
//!
//! - `schema`: constraint schemas, the type registry and the resolver
//! - `defaults`: default specifications and their validator
//! - `attribute`: definitions, option tables, presets and the transformer
//! - `config`: startup configuration and custom types
//! - `observability`: structured JSON logging

pub mod attribute;
pub mod config;
pub mod defaults;
pub mod observability;
pub mod schema;

pub use attribute::{AttrResult, AttributeDef, AttributeError, AttributeTransformer, OptionTable, RawAttribute};
pub use defaults::{validate_default, DefaultPhase, DefaultSpec};
pub use schema::{BuiltinRegistry, ConstraintResolver, Constraints, LogicalType, TypeRegistry};
