//! Attribute transformer
//!
//! Normalizes an attribute definition's constraints:
//! - empty constraints: returned unchanged, no registry lookup
//! - otherwise: resolved against the type's schema and substituted
//!
//! The transformer does not validate defaults; those are checked when
//! the definition is constructed.

use crate::observability::{log_event_with_fields, Event};
use crate::schema::{ConstraintResolver, TypeRegistry};

use super::errors::{AttrResult, AttributeError};
use super::options::OptionTable;
use super::types::{AttributeDef, RawAttribute};

/// Transforms attribute definitions against a type registry.
pub struct AttributeTransformer<'r, R: TypeRegistry + ?Sized> {
    resolver: ConstraintResolver<'r, R>,
}

impl<'r, R: TypeRegistry + ?Sized> AttributeTransformer<'r, R> {
    /// Creates a transformer backed by the given registry.
    pub fn new(registry: &'r R) -> Self {
        Self {
            resolver: ConstraintResolver::new(registry),
        }
    }

    /// Normalizes the constraints of `def`.
    ///
    /// # Errors
    ///
    /// The resolver's first failure, tagged with the attribute name.
    pub fn transform(&self, def: AttributeDef) -> AttrResult<AttributeDef> {
        if def.constraints.is_empty() {
            return Ok(def);
        }

        match self.resolver.resolve(&def.logical_type, &def.constraints) {
            Ok(constraints) => {
                log_event_with_fields(Event::AttributeTransformed, &[("attribute", def.name.as_str())]);
                Ok(AttributeDef { constraints, ..def })
            }
            Err(err) => {
                let err = AttributeError::constraint(&def.name, err);
                log_rejection(&err);
                Err(err)
            }
        }
    }

    /// Constructs and transforms a raw definition in one step.
    pub fn compile(&self, raw: RawAttribute, table: &OptionTable) -> AttrResult<AttributeDef> {
        let def = AttributeDef::from_raw(raw, table).map_err(|err| {
            log_rejection(&err);
            err
        })?;
        self.transform(def)
    }
}

fn log_rejection(err: &AttributeError) {
    let message = err.message();
    log_event_with_fields(
        Event::AttributeRejected,
        &[
            ("attribute", err.attribute()),
            ("code", err.code().code()),
            ("reason", message.as_str()),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::errors::AttributeErrorCode;
    use crate::schema::{BuiltinRegistry, ConstraintError, Constraints, LogicalType};
    use serde_json::{json, Value};

    fn constraints(value: Value) -> Constraints {
        value.as_object().cloned().unwrap()
    }

    fn def(name: &str, ty: &str, value: Value) -> AttributeDef {
        let raw = RawAttribute::typed(name, ty).with_constraints(constraints(value));
        AttributeDef::from_raw(raw, &OptionTable::base()).unwrap()
    }

    #[test]
    fn test_empty_constraints_unchanged_without_lookup() {
        let registry = BuiltinRegistry::empty();
        let transformer = AttributeTransformer::new(&registry);

        let original = def("amount", "money", json!({}));
        let transformed = transformer.transform(original.clone()).unwrap();
        assert_eq!(transformed, original);
    }

    #[test]
    fn test_constraints_substituted() {
        let registry = BuiltinRegistry::new();
        let transformer = AttributeTransformer::new(&registry);

        let transformed = transformer
            .transform(def("title", "string", json!({"max_length": 80})))
            .unwrap();
        assert_eq!(
            transformed.constraints,
            constraints(json!({"max_length": 80, "trim?": true, "allow_empty?": false}))
        );
        assert_eq!(transformed.name, "title");
        assert_eq!(transformed.logical_type, LogicalType::scalar("string"));
    }

    #[test]
    fn test_error_carries_attribute_name() {
        let registry = BuiltinRegistry::new();
        let transformer = AttributeTransformer::new(&registry);

        let err = transformer
            .transform(def("title", "string", json!({"bogus": 1})))
            .unwrap_err();
        assert_eq!(err.attribute(), "title");
        assert_eq!(err.code(), AttributeErrorCode::UnknownConstraintKey);
        assert_eq!(err.key(), Some("bogus"));
    }

    #[test]
    fn test_nested_error_propagated_untouched() {
        let registry = BuiltinRegistry::new();
        let transformer = AttributeTransformer::new(&registry);

        let err = transformer
            .transform(def("scores", "array<integer>", json!({"items": {"bogus": true}})))
            .unwrap_err();
        assert_eq!(err.code(), AttributeErrorCode::InvalidNestedConstraints);
        let inner = err.constraint_error().and_then(ConstraintError::inner).unwrap();
        assert_eq!(inner.key(), Some("bogus"));
    }

    #[test]
    fn test_unknown_type_with_constraints() {
        let registry = BuiltinRegistry::new();
        let transformer = AttributeTransformer::new(&registry);

        let err = transformer
            .transform(def("amount", "money", json!({"currency": "EUR"})))
            .unwrap_err();
        assert_eq!(err.code(), AttributeErrorCode::UnknownType);
    }

    #[test]
    fn test_compile() {
        let registry = BuiltinRegistry::new();
        let transformer = AttributeTransformer::new(&registry);

        let raw: RawAttribute = serde_json::from_value(json!({
            "name": "tags",
            "type": "array<string>",
            "constraints": {"max_length": 5, "items": {"max_length": 20}},
            "default": ["constant", []]
        }))
        .unwrap();

        let def = transformer.compile(raw, &OptionTable::base()).unwrap();
        assert_eq!(def.constraints["max_length"], json!(5));
        assert_eq!(def.constraints["items"]["max_length"], json!(20));
        assert_eq!(def.constraints["items"]["trim?"], json!(true));
    }

    #[test]
    fn test_transform_through_trait_object() {
        let registry = BuiltinRegistry::new();
        let dynamic: &dyn TypeRegistry = &registry;
        let transformer = AttributeTransformer::new(dynamic);
        assert!(transformer
            .transform(def("n", "integer", json!({"min": 0})))
            .is_ok());
    }
}
