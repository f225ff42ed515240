//! Constraint resolution for scalar and container types
//!
//! Scalars validate the whole mapping against their own schema.
//! Containers split the mapping: the reserved `items` key is resolved
//! recursively against the element type, everything else against the
//! container schema. The two halves are then recombined, with `items`
//! last. A missing, null or empty `items` becomes `{}`.

use serde_json::Value;

use super::errors::{ConstraintError, ConstraintResult};
use super::registry::TypeRegistry;
use super::types::{Constraints, LogicalType, ITEMS_KEY};
use super::validator::describe;
use crate::observability::{log_event_with_fields, Event};

/// Resolves constraint mappings against schemas from a type registry.
///
/// Resolution is pure: the same registry contents and input always give
/// the same result.
pub struct ConstraintResolver<'r, R: TypeRegistry + ?Sized> {
    registry: &'r R,
}

impl<'r, R: TypeRegistry + ?Sized> ConstraintResolver<'r, R> {
    /// Creates a resolver backed by the given registry.
    pub fn new(registry: &'r R) -> Self {
        Self { registry }
    }

    /// Validates `constraints` for `ty` and returns the normalized mapping.
    ///
    /// # Errors
    ///
    /// - `UnknownType` if the registry has no schema for the type
    /// - `UnknownConstraintKey` / `InvalidConstraintValue` for the first
    ///   offending container-level or scalar key
    /// - `InvalidNestedConstraints` wrapping the element type's failure
    pub fn resolve(&self, ty: &LogicalType, constraints: &Constraints) -> ConstraintResult<Constraints> {
        let resolved = if self.registry.is_container(ty) {
            self.resolve_container(ty, constraints)?
        } else {
            let schema = self.registry.constraint_schema(ty)?;
            schema.validate(ty.type_name(), constraints)?
        };

        let type_name = ty.to_string();
        log_event_with_fields(Event::ConstraintsResolved, &[("type", type_name.as_str())]);
        Ok(resolved)
    }

    fn resolve_container(&self, ty: &LogicalType, constraints: &Constraints) -> ConstraintResult<Constraints> {
        let item_type = self
            .registry
            .list_item_type(ty)
            .ok_or_else(|| ConstraintError::InvalidType(ty.to_string()))?;

        let mut container_level = constraints.clone();
        let items = container_level.shift_remove(ITEMS_KEY);

        let schema = self.registry.constraint_schema(ty)?;
        let mut validated = schema.validate(ty.type_name(), &container_level)?;

        let nested = match items {
            None | Some(Value::Null) => Constraints::new(),
            Some(Value::Object(map)) if map.is_empty() => Constraints::new(),
            Some(Value::Object(map)) => self.resolve(item_type, &map).map_err(|source| {
                ConstraintError::InvalidNestedConstraints {
                    key: ITEMS_KEY.to_string(),
                    item_type: item_type.to_string(),
                    source: Box::new(source),
                }
            })?,
            Some(other) => {
                return Err(ConstraintError::InvalidConstraintValue {
                    key: ITEMS_KEY.to_string(),
                    expected: format!("constraint mapping for '{}'", item_type),
                    actual: describe(&other),
                })
            }
        };

        validated.insert(ITEMS_KEY.to_string(), Value::Object(nested));
        Ok(validated)
    }
}
