//! Default specifications
//!
//! A default is one of:
//! - a deferred zero-argument computation, run when a value is needed
//! - a constant, used verbatim
//! - an indirect call: namespace + operation + fixed arguments, resolved
//!   and invoked when a value is needed
//! - absent

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::errors::{DefaultError, DefaultResult};

/// An opaque zero-argument unit of work producing a value.
///
/// Clones share the same underlying computation; two `DeferredFn`s are
/// equal only if they are clones of one another.
#[derive(Clone)]
pub struct DeferredFn {
    label: Arc<str>,
    body: Arc<dyn Fn() -> Value + Send + Sync>,
}

impl DeferredFn {
    /// Wraps a closure. The label only appears in debug output.
    pub fn new(label: impl Into<String>, body: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        let label: String = label.into();
        Self {
            label: Arc::from(label),
            body: Arc::new(body),
        }
    }

    /// Runs the computation
    pub fn call(&self) -> Value {
        (self.body)()
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for DeferredFn {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.body) as *const (),
            Arc::as_ptr(&other.body) as *const (),
        )
    }
}

impl fmt::Debug for DeferredFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeferredFn({})", self.label)
    }
}

/// A validated default specification
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DefaultSpec {
    /// Zero-argument computation evaluated on demand
    Deferred(DeferredFn),
    /// Literal value used verbatim
    Constant(Value),
    /// Named operation in a named namespace, invoked with fixed arguments
    IndirectCall {
        namespace: String,
        operation: String,
        args: Vec<Value>,
    },
    /// No default
    #[default]
    Absent,
}

impl DefaultSpec {
    pub fn is_absent(&self) -> bool {
        matches!(self, DefaultSpec::Absent)
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, DefaultSpec::Deferred(_))
    }

    /// Produces the default value at consumption time.
    ///
    /// Returns `Ok(None)` for an absent default.
    ///
    /// # Errors
    ///
    /// `UnresolvedCall` if `calls` does not know an indirect call's target.
    pub fn resolve(&self, calls: &dyn CallResolver) -> DefaultResult<Option<Value>> {
        match self {
            DefaultSpec::Deferred(f) => Ok(Some(f.call())),
            DefaultSpec::Constant(value) => Ok(Some(value.clone())),
            DefaultSpec::IndirectCall {
                namespace,
                operation,
                args,
            } => calls
                .call(namespace, operation, args)
                .map(Some)
                .ok_or_else(|| DefaultError::UnresolvedCall {
                    namespace: namespace.clone(),
                    operation: operation.clone(),
                }),
            DefaultSpec::Absent => Ok(None),
        }
    }
}

/// Raw default as supplied by a definition author, before validation.
///
/// Closures arrive as `Deferred`; everything declarative arrives as a
/// JSON value and is classified by the validator.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDefault {
    Deferred(DeferredFn),
    Value(Value),
}

impl From<DeferredFn> for RawDefault {
    fn from(f: DeferredFn) -> Self {
        RawDefault::Deferred(f)
    }
}

impl From<Value> for RawDefault {
    fn from(value: Value) -> Self {
        RawDefault::Value(value)
    }
}

impl<'de> Deserialize<'de> for RawDefault {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(RawDefault::Value)
    }
}

/// Resolves indirect calls at consumption time.
pub trait CallResolver {
    /// Invokes `namespace.operation(args)`, or `None` if unknown.
    fn call(&self, namespace: &str, operation: &str, args: &[Value]) -> Option<Value>;
}

type CallBody = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// A table of named operations for resolving indirect calls.
#[derive(Clone, Default)]
pub struct CallTable {
    operations: HashMap<(String, String), CallBody>,
}

impl CallTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `namespace.operation`, replacing any earlier entry.
    pub fn register(
        &mut self,
        namespace: impl Into<String>,
        operation: impl Into<String>,
        body: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) {
        self.operations
            .insert((namespace.into(), operation.into()), Arc::new(body));
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl CallResolver for CallTable {
    fn call(&self, namespace: &str, operation: &str, args: &[Value]) -> Option<Value> {
        self.operations
            .get(&(namespace.to_string(), operation.to_string()))
            .map(|body| body(args))
    }
}

impl fmt::Debug for CallTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self
            .operations
            .keys()
            .map(|(ns, op)| format!("{}.{}", ns, op))
            .collect();
        names.sort();
        f.debug_struct("CallTable").field("operations", &names).finish()
    }
}
