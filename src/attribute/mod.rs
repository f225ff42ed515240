//! Attribute definitions
//!
//! An attribute definition is built once from raw declarative input,
//! normalized once by the transformer, and then treated as immutable
//! configuration.
//!
//! # Flow
//!
//! 1. `AttributeDef::from_raw` fills omitted options from an option table
//!    and validates `default` / `update_default`
//! 2. `AttributeTransformer::transform` resolves constraints against the
//!    type registry
//!
//! Presets (`create_timestamp`, `update_timestamp`, ...) are option tables
//! derived from the base table at startup.

mod errors;
mod options;
mod presets;
mod transformer;
mod types;

pub use errors::{AttrResult, AttributeError, AttributeErrorCode, AttributeErrorKind};
pub use options::{OptionKind, OptionSpec, OptionTable, OptionValue};
pub use presets::{
    create_timestamp, integer_primary_key, update_timestamp, utc_now, uuid_primary_key, uuid_v4,
    Presets, CREATE_TIMESTAMP, INTEGER_PRIMARY_KEY, UPDATE_TIMESTAMP, UUID_PRIMARY_KEY,
};
pub use transformer::AttributeTransformer;
pub use types::{AttributeDef, RawAttribute};
