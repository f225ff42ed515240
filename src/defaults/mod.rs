//! Default value specifications
//!
//! Validates the shape of `default` / `update_default` options. Defaults
//! are never invoked during validation; consumers resolve them on demand
//! through [`DefaultSpec::resolve`].

mod errors;
mod spec;
mod validator;

pub use errors::{DefaultError, DefaultResult};
pub use spec::{CallResolver, CallTable, DefaultSpec, DeferredFn, RawDefault};
pub use validator::{validate_default, DefaultPhase, CONSTANT_TAG};
