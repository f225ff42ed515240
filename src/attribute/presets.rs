//! Preset option tables
//!
//! Presets are the base option table with some defaults overridden:
//! - create_timestamp: timestamp, not writable, defaults to now on create
//! - update_timestamp: as create_timestamp, also defaults to now on update
//! - uuid_primary_key: uuid primary key, defaults to a fresh v4 uuid
//! - integer_primary_key: generated integer primary key
//!
//! Derivation is pure and idempotent. Deferred defaults are shared
//! singletons, so deriving a preset twice yields equal tables.

use std::sync::OnceLock;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::defaults::{DefaultSpec, DeferredFn};
use crate::observability::{log_event_with_fields, Event};
use crate::schema::LogicalType;

use super::errors::AttrResult;
use super::options::{OptionTable, OptionValue};

pub const CREATE_TIMESTAMP: &str = "create_timestamp";
pub const UPDATE_TIMESTAMP: &str = "update_timestamp";
pub const UUID_PRIMARY_KEY: &str = "uuid_primary_key";
pub const INTEGER_PRIMARY_KEY: &str = "integer_primary_key";

/// Deferred default producing the current UTC time (RFC 3339, microseconds).
pub fn utc_now() -> DeferredFn {
    static NOW: OnceLock<DeferredFn> = OnceLock::new();
    NOW.get_or_init(|| {
        DeferredFn::new("utc_now", || {
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
        })
    })
    .clone()
}

/// Deferred default producing a fresh random uuid.
pub fn uuid_v4() -> DeferredFn {
    static UUID: OnceLock<DeferredFn> = OnceLock::new();
    UUID.get_or_init(|| DeferredFn::new("uuid_v4", || Value::String(Uuid::new_v4().to_string())))
        .clone()
}

fn derive(preset: &str, base: &OptionTable, overrides: &[(&str, OptionValue)]) -> AttrResult<OptionTable> {
    let table = base.with_overrides(overrides)?;
    log_event_with_fields(Event::PresetDerived, &[("preset", preset)]);
    Ok(table)
}

/// Derives the create-timestamp option table.
pub fn create_timestamp(base: &OptionTable) -> AttrResult<OptionTable> {
    derive(
        CREATE_TIMESTAMP,
        base,
        &[
            ("writable", OptionValue::Bool(false)),
            ("type", OptionValue::Type(LogicalType::scalar("timestamp"))),
            ("default", OptionValue::Default(DefaultSpec::Deferred(utc_now()))),
        ],
    )
}

/// Derives the update-timestamp option table.
pub fn update_timestamp(base: &OptionTable) -> AttrResult<OptionTable> {
    derive(
        UPDATE_TIMESTAMP,
        base,
        &[
            ("writable", OptionValue::Bool(false)),
            ("type", OptionValue::Type(LogicalType::scalar("timestamp"))),
            ("default", OptionValue::Default(DefaultSpec::Deferred(utc_now()))),
            ("update_default", OptionValue::Default(DefaultSpec::Deferred(utc_now()))),
        ],
    )
}

/// Derives the uuid primary key option table.
pub fn uuid_primary_key(base: &OptionTable) -> AttrResult<OptionTable> {
    derive(
        UUID_PRIMARY_KEY,
        base,
        &[
            ("writable", OptionValue::Bool(false)),
            ("type", OptionValue::Type(LogicalType::scalar("uuid"))),
            ("primary_key", OptionValue::Bool(true)),
            ("allow_nil", OptionValue::Bool(false)),
            ("default", OptionValue::Default(DefaultSpec::Deferred(uuid_v4()))),
        ],
    )
}

/// Derives the integer primary key option table.
pub fn integer_primary_key(base: &OptionTable) -> AttrResult<OptionTable> {
    derive(
        INTEGER_PRIMARY_KEY,
        base,
        &[
            ("writable", OptionValue::Bool(false)),
            ("type", OptionValue::Type(LogicalType::scalar("integer"))),
            ("primary_key", OptionValue::Bool(true)),
            ("generated", OptionValue::Bool(true)),
            ("allow_nil", OptionValue::Bool(false)),
        ],
    )
}

/// All preset tables, derived once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Presets {
    pub base: OptionTable,
    pub create_timestamp: OptionTable,
    pub update_timestamp: OptionTable,
    pub uuid_primary_key: OptionTable,
    pub integer_primary_key: OptionTable,
}

impl Presets {
    /// Derives every preset from `base`.
    pub fn derive(base: OptionTable) -> AttrResult<Self> {
        Ok(Self {
            create_timestamp: create_timestamp(&base)?,
            update_timestamp: update_timestamp(&base)?,
            uuid_primary_key: uuid_primary_key(&base)?,
            integer_primary_key: integer_primary_key(&base)?,
            base,
        })
    }

    /// Looks up a table by preset name; `"attribute"` is the base table.
    pub fn get(&self, name: &str) -> Option<&OptionTable> {
        match name {
            "attribute" => Some(&self.base),
            CREATE_TIMESTAMP => Some(&self.create_timestamp),
            UPDATE_TIMESTAMP => Some(&self.update_timestamp),
            UUID_PRIMARY_KEY => Some(&self.uuid_primary_key),
            INTEGER_PRIMARY_KEY => Some(&self.integer_primary_key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::types::{AttributeDef, RawAttribute};

    #[test]
    fn test_create_timestamp_overrides() {
        let table = create_timestamp(&OptionTable::base()).unwrap();
        assert_eq!(table.bool_default("writable"), Some(false));
        assert_eq!(table.type_default(), Some(&LogicalType::scalar("timestamp")));
        assert!(table.default_spec("default").unwrap().is_deferred());
        assert!(table.default_spec("update_default").unwrap().is_absent());
    }

    #[test]
    fn test_update_timestamp_sets_both_defaults() {
        let table = update_timestamp(&OptionTable::base()).unwrap();
        assert!(table.default_spec("default").unwrap().is_deferred());
        assert!(table.default_spec("update_default").unwrap().is_deferred());
    }

    #[test]
    fn test_derivation_idempotent() {
        let base = OptionTable::base();
        assert_eq!(create_timestamp(&base).unwrap(), create_timestamp(&base).unwrap());
        assert_eq!(update_timestamp(&base).unwrap(), update_timestamp(&base).unwrap());

        let once = create_timestamp(&base).unwrap();
        let twice = create_timestamp(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_now_default_produces_timestamp() {
        let value = utc_now().call();
        let text = value.as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(text).is_ok());
    }

    #[test]
    fn test_uuid_default_produces_uuid() {
        let value = uuid_v4().call();
        assert!(Uuid::parse_str(value.as_str().unwrap()).is_ok());
        assert_ne!(uuid_v4().call(), value);
    }

    #[test]
    fn test_preset_attribute_from_raw() {
        let presets = Presets::derive(OptionTable::base()).unwrap();

        let inserted_at = AttributeDef::from_raw(RawAttribute::new("inserted_at"), &presets.create_timestamp).unwrap();
        assert_eq!(inserted_at.logical_type, LogicalType::scalar("timestamp"));
        assert!(!inserted_at.writable);
        assert!(inserted_at.default.is_deferred());

        let id = AttributeDef::from_raw(RawAttribute::new("id"), &presets.uuid_primary_key).unwrap();
        assert!(id.primary_key);
        assert!(!id.allow_nil);

        let seq = AttributeDef::from_raw(RawAttribute::new("seq"), &presets.integer_primary_key).unwrap();
        assert!(seq.generated);
        assert!(seq.default.is_absent());
    }

    #[test]
    fn test_preset_lookup() {
        let presets = Presets::derive(OptionTable::base()).unwrap();
        assert_eq!(presets.get("attribute"), Some(&presets.base));
        assert_eq!(presets.get(UPDATE_TIMESTAMP), Some(&presets.update_timestamp));
        assert!(presets.get("nope").is_none());
    }
}
