//! Attribute option table
//!
//! The option table lists every option an attribute definition accepts,
//! together with the value used when the definition omits it. Presets are
//! derived from the base table by overriding some of those defaults.

use crate::defaults::DefaultSpec;
use crate::schema::{Constraints, LogicalType};

use super::errors::{AttrResult, AttributeError};

/// Shape of an option's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Name,
    Type,
    Constraints,
    Bool,
    Default,
    Text,
}

/// A default value for an option
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Type(LogicalType),
    Constraints(Constraints),
    Bool(bool),
    Default(DefaultSpec),
    Text(String),
}

impl OptionValue {
    /// Returns the kind this value belongs to
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionValue::Type(_) => OptionKind::Type,
            OptionValue::Constraints(_) => OptionKind::Constraints,
            OptionValue::Bool(_) => OptionKind::Bool,
            OptionValue::Default(_) => OptionKind::Default,
            OptionValue::Text(_) => OptionKind::Text,
        }
    }
}

/// One accepted option
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    /// Option name as written in a definition
    pub name: &'static str,
    /// Value shape
    pub kind: OptionKind,
    /// Value used when the definition omits the option
    pub default: Option<OptionValue>,
    pub doc: &'static str,
}

impl OptionSpec {
    fn new(name: &'static str, kind: OptionKind, default: Option<OptionValue>, doc: &'static str) -> Self {
        Self {
            name,
            kind,
            default,
            doc,
        }
    }
}

/// Ordered table of attribute options
#[derive(Debug, Clone, PartialEq)]
pub struct OptionTable {
    options: Vec<OptionSpec>,
}

impl OptionTable {
    /// The base attribute option table.
    pub fn base() -> Self {
        use OptionKind as K;
        use OptionValue as V;

        Self {
            options: vec![
                OptionSpec::new("name", K::Name, None, "Attribute name, unique within its resource"),
                OptionSpec::new("type", K::Type, None, "Logical type of the attribute"),
                OptionSpec::new(
                    "constraints",
                    K::Constraints,
                    Some(V::Constraints(Constraints::new())),
                    "Type-specific constraints",
                ),
                OptionSpec::new("description", K::Text, None, "Free-form description"),
                OptionSpec::new("allow_nil", K::Bool, Some(V::Bool(true)), "Whether nil is a legal value"),
                OptionSpec::new(
                    "primary_key",
                    K::Bool,
                    Some(V::Bool(false)),
                    "Part of the resource's identifying key",
                ),
                OptionSpec::new(
                    "generated",
                    K::Bool,
                    Some(V::Bool(false)),
                    "Value may be produced by the data layer and must be re-read after writes",
                ),
                OptionSpec::new("writable", K::Bool, Some(V::Bool(true)), "Whether actions may set the value"),
                OptionSpec::new(
                    "default",
                    K::Default,
                    Some(V::Default(DefaultSpec::Absent)),
                    "Value used on create when none is supplied",
                ),
                OptionSpec::new(
                    "update_default",
                    K::Default,
                    Some(V::Default(DefaultSpec::Absent)),
                    "Value used on update when none is supplied",
                ),
                OptionSpec::new("sensitive", K::Bool, Some(V::Bool(false)), "Redact the value in output"),
                OptionSpec::new("public", K::Bool, Some(V::Bool(true)), "Expose the attribute publicly"),
                OptionSpec::new(
                    "filterable",
                    K::Bool,
                    Some(V::Bool(true)),
                    "Whether the attribute may be referenced in filters",
                ),
                OptionSpec::new(
                    "match_other_defaults",
                    K::Bool,
                    Some(V::Bool(false)),
                    "Share one evaluation of a zero-argument default with other attributes in the same write",
                ),
            ],
        }
    }

    /// Returns a new table with the named defaults replaced.
    ///
    /// Pure and idempotent: applying the same overrides again yields an
    /// equal table.
    ///
    /// # Errors
    ///
    /// `InvalidOption` for an unknown option name or a value of the wrong
    /// kind.
    pub fn with_overrides(&self, overrides: &[(&str, OptionValue)]) -> AttrResult<Self> {
        let mut table = self.clone();
        for (name, value) in overrides {
            let spec = table
                .options
                .iter_mut()
                .find(|o| o.name == *name)
                .ok_or_else(|| AttributeError::invalid_option("<preset>", *name, "unknown option"))?;

            if spec.kind != value.kind() {
                return Err(AttributeError::invalid_option(
                    "<preset>",
                    *name,
                    format!("expected {:?} value, got {:?}", spec.kind, value.kind()),
                ));
            }
            spec.default = Some(value.clone());
        }
        Ok(table)
    }

    /// Look up an option by name
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Options in declaration order
    pub fn options(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.iter()
    }

    /// Returns the default used when `attribute` omits `name`.
    ///
    /// # Errors
    ///
    /// `InvalidOption` if the table has no default for it, so the
    /// definition must supply the option itself.
    pub fn require(&self, attribute: &str, name: &str) -> AttrResult<&OptionValue> {
        self.default_of(name)
            .ok_or_else(|| AttributeError::invalid_option(attribute, name, "is required"))
    }

    /// Returns the default of `name`, if the table declares one
    pub fn default_of(&self, name: &str) -> Option<&OptionValue> {
        self.get(name).and_then(|o| o.default.as_ref())
    }

    pub fn bool_default(&self, name: &str) -> Option<bool> {
        match self.default_of(name) {
            Some(OptionValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn type_default(&self) -> Option<&LogicalType> {
        match self.default_of("type") {
            Some(OptionValue::Type(ty)) => Some(ty),
            _ => None,
        }
    }

    pub fn constraints_default(&self) -> Option<&Constraints> {
        match self.default_of("constraints") {
            Some(OptionValue::Constraints(c)) => Some(c),
            _ => None,
        }
    }

    pub fn text_default(&self, name: &str) -> Option<&str> {
        match self.default_of(name) {
            Some(OptionValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn default_spec(&self, name: &str) -> Option<&DefaultSpec> {
        match self.default_of(name) {
            Some(OptionValue::Default(d)) => Some(d),
            _ => None,
        }
    }
}

impl Default for OptionTable {
    fn default() -> Self {
        Self::base()
    }
}
