//! Attribute definitions
//!
//! `RawAttribute` is what a definition author writes: every option except
//! `name` may be omitted. `AttributeDef` is the constructed definition,
//! with omitted options filled from an option table and defaults
//! classified.

use serde::Deserialize;
use serde_json::Value;

use crate::defaults::{validate_default, CallResolver, DefaultPhase, DefaultSpec, RawDefault};
use crate::schema::{Constraints, LogicalType};

use super::errors::{AttrResult, AttributeError};
use super::options::{OptionTable, OptionValue};

/// A declarative attribute definition as supplied by its author.
///
/// Field presence and primitive field types are checked by
/// deserialization; everything else is checked on construction.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawAttribute {
    pub name: String,
    #[serde(default, rename = "type")]
    pub logical_type: Option<String>,
    #[serde(default)]
    pub constraints: Option<Constraints>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub allow_nil: Option<bool>,
    #[serde(default)]
    pub primary_key: Option<bool>,
    #[serde(default)]
    pub generated: Option<bool>,
    #[serde(default)]
    pub writable: Option<bool>,
    #[serde(default)]
    pub default: Option<RawDefault>,
    #[serde(default)]
    pub update_default: Option<RawDefault>,
    #[serde(default)]
    pub sensitive: Option<bool>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub filterable: Option<bool>,
    #[serde(default)]
    pub match_other_defaults: Option<bool>,
}

impl RawAttribute {
    /// Create a raw definition with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a raw definition with a name and type
    pub fn typed(name: impl Into<String>, logical_type: impl Into<String>) -> Self {
        Self {
            logical_type: Some(logical_type.into()),
            ..Self::new(name)
        }
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    pub fn with_default(mut self, default: impl Into<RawDefault>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_update_default(mut self, default: impl Into<RawDefault>) -> Self {
        self.update_default = Some(default.into());
        self
    }
}

/// A constructed attribute definition.
///
/// Immutable configuration once transformed; safe to share between
/// threads.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDef {
    pub name: String,
    pub logical_type: LogicalType,
    pub constraints: Constraints,
    pub description: Option<String>,
    pub allow_nil: bool,
    pub primary_key: bool,
    pub generated: bool,
    pub writable: bool,
    pub default: DefaultSpec,
    pub update_default: DefaultSpec,
    pub sensitive: bool,
    pub public: bool,
    pub filterable: bool,
    pub match_other_defaults: bool,
}

impl AttributeDef {
    /// Builds a definition from raw input, filling omitted options from
    /// `table`.
    ///
    /// Defaults are validated here; constraints are left untouched for the
    /// transformer.
    ///
    /// # Errors
    ///
    /// - `InvalidOption` if a required option is missing or the option
    ///   combination is rejected
    /// - `InvalidType` if the type reference does not parse
    /// - `InvalidDefaultSpecification` for a malformed default
    pub fn from_raw(raw: RawAttribute, table: &OptionTable) -> AttrResult<Self> {
        let name = raw.name;

        let logical_type = match raw.logical_type {
            Some(ty) => ty
                .parse::<LogicalType>()
                .map_err(|e| AttributeError::constraint(&name, e))?,
            None => match table.require(&name, "type")? {
                OptionValue::Type(ty) => ty.clone(),
                other => return Err(mistyped(&name, "type", other)),
            },
        };

        let default = match raw.default {
            Some(raw_default) => validate_default(Some(&raw_default), DefaultPhase::Create)
                .map_err(|e| AttributeError::default_spec(&name, e))?,
            None => table.default_spec("default").cloned().unwrap_or_default(),
        };
        let update_default = match raw.update_default {
            Some(raw_default) => validate_default(Some(&raw_default), DefaultPhase::Update)
                .map_err(|e| AttributeError::default_spec(&name, e))?,
            None => table.default_spec("update_default").cloned().unwrap_or_default(),
        };

        let flag = |value: Option<bool>, option: &str| -> AttrResult<bool> {
            match value {
                Some(b) => Ok(b),
                None => match table.require(&name, option)? {
                    OptionValue::Bool(b) => Ok(*b),
                    other => Err(mistyped(&name, option, other)),
                },
            }
        };

        let def = AttributeDef {
            logical_type,
            constraints: raw
                .constraints
                .or_else(|| table.constraints_default().cloned())
                .unwrap_or_default(),
            description: raw
                .description
                .or_else(|| table.text_default("description").map(str::to_string)),
            allow_nil: flag(raw.allow_nil, "allow_nil")?,
            primary_key: flag(raw.primary_key, "primary_key")?,
            generated: flag(raw.generated, "generated")?,
            writable: flag(raw.writable, "writable")?,
            default,
            update_default,
            sensitive: flag(raw.sensitive, "sensitive")?,
            public: flag(raw.public, "public")?,
            filterable: flag(raw.filterable, "filterable")?,
            match_other_defaults: flag(raw.match_other_defaults, "match_other_defaults")?,
            name,
        };

        if def.match_other_defaults && !def.default.is_deferred() {
            return Err(AttributeError::invalid_option(
                &def.name,
                "match_other_defaults",
                "requires a zero-argument function as default",
            ));
        }

        Ok(def)
    }

    /// Produces the default for `phase`, or `None` when the attribute has
    /// none.
    ///
    /// # Errors
    ///
    /// `UnresolvedDefaultCall` if `calls` cannot resolve an indirect call.
    pub fn resolve_default(&self, phase: DefaultPhase, calls: &dyn CallResolver) -> AttrResult<Option<Value>> {
        let spec = match phase {
            DefaultPhase::Create => &self.default,
            DefaultPhase::Update => &self.update_default,
        };
        spec.resolve(calls)
            .map_err(|e| AttributeError::default_spec(&self.name, e))
    }

    /// Returns whether a value must be supplied on create
    pub fn is_required_on_create(&self) -> bool {
        !self.allow_nil && self.writable && self.default.is_absent() && !self.generated
    }
}

fn mistyped(attribute: &str, option: &str, value: &OptionValue) -> AttributeError {
    AttributeError::invalid_option(
        attribute,
        option,
        format!("table default has kind {:?}", value.kind()),
    )
}
