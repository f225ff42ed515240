//! Attribute Invariant Tests
//!
//! - Empty constraints pass through untouched, for any type
//! - Accepted constraints come back fully populated
//! - Unknown keys are always rejected, never silently accepted
//! - Container element constraints are validated recursively
//! - Defaults classify into exactly one variant
//! - Transformation is deterministic

use attrdef::attribute::{AttributeErrorCode, OptionTable, RawAttribute};
use attrdef::defaults::{validate_default, DefaultPhase, DefaultSpec, DeferredFn, RawDefault};
use attrdef::schema::{BuiltinRegistry, ConstraintError, Constraints, TypeRegistry};
use attrdef::{AttributeDef, AttributeTransformer};
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;

// =============================================================================
// Helper Functions
// =============================================================================

fn constraints(value: Value) -> Constraints {
    value.as_object().cloned().unwrap()
}

fn definition(name: &str, ty: &str, value: Value) -> AttributeDef {
    let raw = RawAttribute::typed(name, ty).with_constraints(constraints(value));
    AttributeDef::from_raw(raw, &OptionTable::base()).unwrap()
}

// =============================================================================
// Fast Path Tests
// =============================================================================

/// Empty constraints return the definition unchanged for every type,
/// including types the registry has never heard of.
#[test]
fn test_empty_constraints_are_noop() {
    let registry = BuiltinRegistry::new();
    let transformer = AttributeTransformer::new(&registry);

    for ty in ["string", "integer", "array<string>", "array<array<uuid>>", "money", "array<money>"] {
        let def = definition("field", ty, json!({}));
        assert_eq!(transformer.transform(def.clone()).unwrap(), def, "type {ty}");
    }
}

// =============================================================================
// Scalar Tests
// =============================================================================

/// Valid scalar constraints come back as a superset including defaults.
#[test]
fn test_scalar_acceptance_is_superset() {
    let registry = BuiltinRegistry::new();
    let transformer = AttributeTransformer::new(&registry);

    let supplied = constraints(json!({"min_length": 2, "match": "^[a-z]+$"}));
    let def = definition("slug", "string", Value::Object(supplied.clone()));
    let out = transformer.transform(def).unwrap();

    for (key, value) in &supplied {
        assert_eq!(out.constraints.get(key), Some(value));
    }

    let schema = registry.constraint_schema(&"string".parse().unwrap()).unwrap();
    for key in schema.keys() {
        if let Some(default) = &key.default {
            assert_eq!(out.constraints.get(&key.name), Some(default));
        }
    }
}

/// Any key outside the schema is rejected by name.
#[test]
fn test_scalar_rejection_names_key() {
    let registry = BuiltinRegistry::new();
    let transformer = AttributeTransformer::new(&registry);

    for (ty, key) in [("string", "min"), ("integer", "max_length"), ("boolean", "anything"), ("float", "one_of")] {
        let err = transformer
            .transform(definition("field", ty, json!({ key: 1 })))
            .unwrap_err();
        assert_eq!(err.code(), AttributeErrorCode::UnknownConstraintKey);
        assert_eq!(err.key(), Some(key));
        assert_eq!(err.attribute(), "field");
    }
}

/// The reported key is the first offending key as the author wrote them.
#[test]
fn test_rejection_follows_author_key_order() {
    let registry = BuiltinRegistry::new();
    let transformer = AttributeTransformer::new(&registry);

    let raw: RawAttribute = serde_json::from_str(
        r#"{"name": "code", "type": "string", "constraints": {"zeta": 1, "alpha": 2}}"#,
    )
    .unwrap();
    let def = AttributeDef::from_raw(raw, &OptionTable::base()).unwrap();
    let err = transformer.transform(def).unwrap_err();
    assert_eq!(err.key(), Some("zeta"));
}

/// Values failing their rule are rejected with the key and expectation.
#[test]
fn test_invalid_constraint_value() {
    let registry = BuiltinRegistry::new();
    let transformer = AttributeTransformer::new(&registry);

    let err = transformer
        .transform(definition("created", "timestamp", json!({"precision": "minute"})))
        .unwrap_err();
    assert_eq!(err.code(), AttributeErrorCode::InvalidConstraintValue);
    assert_eq!(err.key(), Some("precision"));
    assert!(err.message().contains("microsecond"));
}

// =============================================================================
// Container Tests
// =============================================================================

#[test]
fn test_container_round_trip() {
    let registry = BuiltinRegistry::new();
    let transformer = AttributeTransformer::new(&registry);

    let out = transformer
        .transform(definition("scores", "array<integer>", json!({"max_length": 5, "items": {"min": 1}})))
        .unwrap();

    assert_eq!(out.constraints["max_length"], json!(5));
    assert_eq!(out.constraints["items"], json!({"min": 1}));
    assert_eq!(out.constraints["nil_items?"], json!(false));
    assert_eq!(out.constraints["empty_values"], json!([]));
}

#[test]
fn test_container_items_receive_element_defaults() {
    let registry = BuiltinRegistry::new();
    let transformer = AttributeTransformer::new(&registry);

    let out = transformer
        .transform(definition("stamps", "array<timestamp>", json!({"max_length": 5, "items": {}})))
        .unwrap();
    assert_eq!(out.constraints["items"], json!({}));

    let out = transformer
        .transform(definition(
            "stamps",
            "array<timestamp>",
            json!({"items": {"precision": "microsecond"}}),
        ))
        .unwrap();
    assert_eq!(out.constraints["items"], json!({"precision": "microsecond"}));
}

#[test]
fn test_container_nested_rejection() {
    let registry = BuiltinRegistry::new();
    let transformer = AttributeTransformer::new(&registry);

    let err = transformer
        .transform(definition("scores", "array<integer>", json!({"max_length": 5, "items": {"bogus": true}})))
        .unwrap_err();

    assert_eq!(err.code(), AttributeErrorCode::InvalidNestedConstraints);
    match err.constraint_error().unwrap() {
        ConstraintError::InvalidNestedConstraints { source, .. } => {
            assert_eq!(
                **source,
                ConstraintError::UnknownConstraintKey {
                    type_name: "integer".into(),
                    key: "bogus".into()
                }
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// Default Classification Tests
// =============================================================================

#[test]
fn test_default_variant_classification() {
    let unit = DeferredFn::new("one", || json!(1));
    assert_eq!(
        validate_default(Some(&RawDefault::Deferred(unit.clone())), DefaultPhase::Create).unwrap(),
        DefaultSpec::Deferred(unit)
    );
    assert_eq!(
        validate_default(Some(&RawDefault::Value(json!(["constant", 5]))), DefaultPhase::Create).unwrap(),
        DefaultSpec::Constant(json!(5))
    );
    assert_eq!(
        validate_default(Some(&RawDefault::Value(json!(["mod", "fun", []]))), DefaultPhase::Update).unwrap(),
        DefaultSpec::IndirectCall {
            namespace: "mod".into(),
            operation: "fun".into(),
            args: vec![]
        }
    );
    assert_eq!(
        validate_default(Some(&RawDefault::Value(Value::Null)), DefaultPhase::Create).unwrap(),
        DefaultSpec::Absent
    );

    let err = validate_default(Some(&RawDefault::Value(json!("hello"))), DefaultPhase::Create).unwrap_err();
    assert!(err.to_string().contains("constant"));
}

/// Constraint transformation never looks at defaults.
#[test]
fn test_defaults_survive_transformation() {
    let registry = BuiltinRegistry::new();
    let transformer = AttributeTransformer::new(&registry);

    let raw = RawAttribute::typed("status", "atom")
        .with_constraints(constraints(json!({"one_of": ["draft", "live"]})))
        .with_default(json!(["constant", "draft"]))
        .with_update_default(json!(["Status", "next", ["draft"]]));
    let def = AttributeDef::from_raw(raw, &OptionTable::base()).unwrap();
    let out = transformer.transform(def.clone()).unwrap();

    assert_eq!(out.default, def.default);
    assert_eq!(out.update_default, def.update_default);
}

// =============================================================================
// Determinism & Sharing Tests
// =============================================================================

#[test]
fn test_transform_is_deterministic() {
    let registry = BuiltinRegistry::new();
    let transformer = AttributeTransformer::new(&registry);

    let def = definition("tags", "array<string>", json!({"max_length": 3, "items": {"max_length": 10}}));
    let first = transformer.transform(def.clone()).unwrap();
    for _ in 0..100 {
        assert_eq!(transformer.transform(def.clone()).unwrap(), first);
    }
}

/// A populated registry is read concurrently without locking.
#[test]
fn test_registry_shared_across_threads() {
    let registry = Arc::new(BuiltinRegistry::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let transformer = AttributeTransformer::new(registry.as_ref());
                let def = definition(&format!("field_{i}"), "integer", json!({"min": i}));
                transformer.transform(def).unwrap().constraints["min"].clone()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), json!(i));
    }
}
