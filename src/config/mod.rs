//! Validator configuration
//!
//! Loaded from a JSON file at startup:
//!
//! ```json
//! {
//!   "log_level": "info",
//!   "types": [
//!     {
//!       "name": "money",
//!       "constraints": [
//!         {"name": "currency", "rule": {"kind": "one_of", "values": ["EUR", "USD"]}, "default": "EUR"},
//!         {"name": "min", "rule": {"kind": "number"}}
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Every field is optional.

mod errors;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::schema::{BuiltinRegistry, ConstraintSchema, LogicalType};

pub use errors::{ConfigError, ConfigResult};

/// A custom scalar type declared in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
    /// Registry name of the type
    pub name: String,
    /// Legal constraint keys, in order
    #[serde(default)]
    pub constraints: ConstraintSchema,
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttrConfig {
    /// Minimum log severity (default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Custom types added on top of the built-in catalog
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AttrConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            types: Vec::new(),
        }
    }
}

impl AttrConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config = Self::from_json(&content)?;

        let path = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", path.as_str())]);
        Ok(config)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: AttrConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> ConfigResult<()> {
        self.severity()?;

        let mut seen = HashSet::new();
        for decl in &self.types {
            match decl.name.parse::<LogicalType>() {
                Ok(LogicalType::Scalar(_)) => {}
                _ => {
                    return Err(ConfigError::Invalid(format!(
                        "type name '{}' is not a scalar identifier",
                        decl.name
                    )))
                }
            }

            if !seen.insert(decl.name.as_str()) {
                return Err(ConfigError::Invalid(format!("type '{}' declared twice", decl.name)));
            }

            let mut key_names = HashSet::new();
            for key in decl.constraints.keys() {
                if !key_names.insert(key.name.as_str()) {
                    return Err(ConfigError::Invalid(format!(
                        "constraint key '{}.{}' declared twice",
                        decl.name, key.name
                    )));
                }

                if let Some(default) = &key.default {
                    key.rule.check(default).map_err(|expected| {
                        ConfigError::Invalid(format!(
                            "default of '{}.{}' must be {}, got {}",
                            decl.name, key.name, expected, default
                        ))
                    })?;
                }
            }
        }

        Ok(())
    }

    /// Returns the configured log threshold
    pub fn severity(&self) -> ConfigResult<Severity> {
        self.log_level.parse().map_err(ConfigError::Invalid)
    }

    /// Applies the log threshold process-wide
    pub fn apply_logging(&self) -> ConfigResult<()> {
        Logger::set_threshold(self.severity()?);
        Ok(())
    }

    /// Builds a registry holding the built-in catalog plus declared types.
    ///
    /// # Errors
    ///
    /// `Registry` if a declared type collides with a built-in one.
    pub fn build_registry(&self) -> ConfigResult<BuiltinRegistry> {
        let mut registry = BuiltinRegistry::new();
        for decl in &self.types {
            registry.register(decl.name.clone(), decl.constraints.clone())?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ConstraintResolver, RegistryError};
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MONEY: &str = r#"{
        "log_level": "info",
        "types": [
            {
                "name": "money",
                "constraints": [
                    {"name": "currency", "rule": {"kind": "one_of", "values": ["EUR", "USD"]}, "default": "EUR"},
                    {"name": "min", "rule": {"kind": "number"}}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_defaults() {
        let config = AttrConfig::from_json("{}").unwrap();
        assert_eq!(config, AttrConfig::default());
        assert_eq!(config.severity().unwrap(), Severity::Warn);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(MONEY.as_bytes()).unwrap();

        let config = AttrConfig::load(file.path()).unwrap();
        assert_eq!(config.severity().unwrap(), Severity::Info);
        assert_eq!(config.types.len(), 1);
        assert_eq!(config.types[0].constraints.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = AttrConfig::load(Path::new("/nonexistent/attrdef.json")).unwrap_err();
        assert_eq!(err.code(), "ATTR_CONFIG_IO_ERROR");
    }

    #[test]
    fn test_invalid_json() {
        let err = AttrConfig::from_json("{not json").unwrap_err();
        assert_eq!(err.code(), "ATTR_CONFIG_PARSE_ERROR");
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(AttrConfig::from_json(r#"{"verbose": true}"#).is_err());
    }

    #[test]
    fn test_bad_log_level() {
        let err = AttrConfig::from_json(r#"{"log_level": "loud"}"#).unwrap_err();
        assert_eq!(err.code(), "ATTR_CONFIG_INVALID");
    }

    #[test]
    fn test_duplicate_declared_type() {
        let err = AttrConfig::from_json(
            r#"{"types": [{"name": "money"}, {"name": "money"}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("declared twice"));
    }

    #[test]
    fn test_duplicate_constraint_key() {
        let err = AttrConfig::from_json(
            r#"{"types": [{"name": "money", "constraints": [
                {"name": "min", "rule": {"kind": "integer"}},
                {"name": "min", "rule": {"kind": "string"}}
            ]}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.code(), "ATTR_CONFIG_INVALID");
        assert!(err.to_string().contains("money.min"));
    }

    #[test]
    fn test_container_type_name_rejected() {
        assert!(AttrConfig::from_json(r#"{"types": [{"name": "array<money>"}]}"#).is_err());
    }

    #[test]
    fn test_default_must_satisfy_rule() {
        let err = AttrConfig::from_json(
            r#"{"types": [{"name": "money", "constraints": [
                {"name": "currency", "rule": {"kind": "one_of", "values": ["EUR"]}, "default": "GBP"}
            ]}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("money.currency"));
    }

    #[test]
    fn test_build_registry_with_custom_type() {
        let config = AttrConfig::from_json(MONEY).unwrap();
        let registry = config.build_registry().unwrap();
        assert!(registry.contains("money"));
        assert!(registry.contains("string"));

        let resolver = ConstraintResolver::new(&registry);
        let resolved = resolver
            .resolve(
                &LogicalType::scalar("money"),
                json!({"min": 0}).as_object().unwrap(),
            )
            .unwrap();
        assert_eq!(resolved["currency"], json!("EUR"));
    }

    #[test]
    fn test_custom_type_cannot_shadow_builtin() {
        let config = AttrConfig::from_json(r#"{"types": [{"name": "string"}]}"#).unwrap();
        let err = config.build_registry().unwrap_err();
        assert!(matches!(err, ConfigError::Registry(RegistryError::DuplicateType(_))));
    }
}
