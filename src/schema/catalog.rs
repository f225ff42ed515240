//! Built-in type catalog
//!
//! Scalar types:
//! - string, ci_string: length bounds, pattern, trimming
//! - integer: inclusive bounds
//! - float, decimal: numeric bounds
//! - atom: allowed identifiers
//! - timestamp, utc_datetime: precision
//! - boolean, uuid, date, map, term: no constraints
//!
//! Container type:
//! - array: length bounds and nil handling; element constraints live
//!   under the reserved `items` key and are not part of this schema

use serde_json::json;

use super::types::{ConstraintRule, ConstraintSchema, ARRAY_TYPE};

fn string_schema() -> ConstraintSchema {
    ConstraintSchema::new()
        .key("max_length", ConstraintRule::non_negative_integer())
        .key("min_length", ConstraintRule::non_negative_integer())
        .key("match", ConstraintRule::Regex)
        .key_with_default("trim?", ConstraintRule::Boolean, json!(true))
        .key_with_default("allow_empty?", ConstraintRule::Boolean, json!(false))
}

fn integer_schema() -> ConstraintSchema {
    ConstraintSchema::new()
        .key("min", ConstraintRule::integer())
        .key("max", ConstraintRule::integer())
}

fn float_schema() -> ConstraintSchema {
    ConstraintSchema::new()
        .key("min", ConstraintRule::number())
        .key("max", ConstraintRule::number())
        .key("greater_than", ConstraintRule::number())
        .key("less_than", ConstraintRule::number())
}

fn decimal_schema() -> ConstraintSchema {
    ConstraintSchema::new()
        .key("min", ConstraintRule::number())
        .key("max", ConstraintRule::number())
}

fn atom_schema() -> ConstraintSchema {
    ConstraintSchema::new().key("one_of", ConstraintRule::list_of(ConstraintRule::Identifier))
}

fn timestamp_schema() -> ConstraintSchema {
    ConstraintSchema::new().key_with_default(
        "precision",
        ConstraintRule::one_of_strs(&["second", "microsecond"]),
        json!("second"),
    )
}

fn array_schema() -> ConstraintSchema {
    ConstraintSchema::new()
        .key("min_length", ConstraintRule::non_negative_integer())
        .key("max_length", ConstraintRule::non_negative_integer())
        .key_with_default("nil_items?", ConstraintRule::Boolean, json!(false))
        .key_with_default("remove_nil_items?", ConstraintRule::Boolean, json!(false))
        .key_with_default(
            "empty_values",
            ConstraintRule::list_of(ConstraintRule::Any),
            json!([]),
        )
}

/// Returns every built-in type with its constraint schema.
pub fn builtin_types() -> Vec<(&'static str, ConstraintSchema)> {
    vec![
        ("string", string_schema()),
        ("ci_string", string_schema()),
        ("integer", integer_schema()),
        ("float", float_schema()),
        ("decimal", decimal_schema()),
        ("boolean", ConstraintSchema::new()),
        ("atom", atom_schema()),
        ("uuid", ConstraintSchema::new()),
        ("date", ConstraintSchema::new()),
        ("timestamp", timestamp_schema()),
        ("utc_datetime", timestamp_schema()),
        ("map", ConstraintSchema::new()),
        ("term", ConstraintSchema::new()),
        (ARRAY_TYPE, array_schema()),
    ]
}
