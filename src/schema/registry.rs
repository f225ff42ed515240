//! Type registry: where constraint schemas come from
//!
//! The registry is populated once at startup and only read afterwards.
//! Lookups take `&self`, so a populated registry can be shared across
//! threads behind an `Arc` without locking.

use std::collections::HashMap;

use super::catalog;
use super::errors::{ConstraintError, ConstraintResult, RegistryError, RegistryResult};
use super::types::{ConstraintSchema, LogicalType};
use crate::observability::{log_event_with_fields, Event};

/// Capability consumed by the constraint resolver.
pub trait TypeRegistry {
    /// Returns the constraint schema for `ty`.
    ///
    /// For a container this is the container's own schema, not the
    /// element type's.
    fn constraint_schema(&self, ty: &LogicalType) -> ConstraintResult<&ConstraintSchema>;

    /// Extracts the element type from a container type.
    fn list_item_type<'t>(&self, ty: &'t LogicalType) -> Option<&'t LogicalType> {
        ty.item_type()
    }

    /// Returns whether `ty` is a container type.
    fn is_container(&self, ty: &LogicalType) -> bool {
        ty.is_container()
    }
}

/// In-memory registry seeded with the built-in type catalog.
#[derive(Debug, Clone, Default)]
pub struct BuiltinRegistry {
    /// Schemas indexed by type name
    schemas: HashMap<String, ConstraintSchema>,
}

impl BuiltinRegistry {
    /// Creates a registry holding the built-in catalog.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for (name, schema) in catalog::builtin_types() {
            registry.schemas.insert(name.to_string(), schema);
        }
        let count = registry.len().to_string();
        log_event_with_fields(Event::RegistryLoaded, &[("types", count.as_str())]);
        registry
    }

    /// Creates a registry with no types at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registers a new type.
    ///
    /// Registered schemas are immutable: re-registering a name fails.
    pub fn register(&mut self, name: impl Into<String>, schema: ConstraintSchema) -> RegistryResult<()> {
        let name = name.into();
        if name.parse::<LogicalType>().map_or(true, |ty| ty.is_container()) {
            return Err(RegistryError::InvalidTypeName(name));
        }
        if self.schemas.contains_key(&name) {
            return Err(RegistryError::DuplicateType(name));
        }
        self.schemas.insert(name, schema);
        Ok(())
    }

    /// Returns the schema registered under `name`
    pub fn get(&self, name: &str) -> Option<&ConstraintSchema> {
        self.schemas.get(name)
    }

    /// Returns whether a schema is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl TypeRegistry for BuiltinRegistry {
    fn constraint_schema(&self, ty: &LogicalType) -> ConstraintResult<&ConstraintSchema> {
        self.schemas
            .get(ty.type_name())
            .ok_or_else(|| ConstraintError::UnknownType(ty.type_name().to_string()))
    }
}
