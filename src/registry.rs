//! Schema registry for resolving nested references given by name.
//!
//! This module provides the [`SchemaRegistry`] type. Schemas are registered once
//! at application start and then queried read-only while nested references are
//! expanded.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::context::RegistryAccess;
use crate::schema::{FieldKind, SchemaDefinition, SchemaRef};

#[derive(Default)]
struct RegistryMap {
    /// Schemas keyed by qualified name (`module.Name`, or `Name` without a module).
    by_full_name: HashMap<String, Arc<SchemaDefinition>>,
    /// Qualified names keyed by simple class name.
    by_simple_name: HashMap<String, Vec<String>>,
}

/// A thread-safe registry of named schemas.
///
/// A schema is indexed under its qualified name and its simple name. Lookups by
/// a dotted name are exact; a simple name resolves only when exactly one
/// registered schema carries it.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple conversions can resolve references concurrently (read access)
/// - Registration operations are serialized (write access)
///
/// # Example
///
/// ```rust
/// use schemacast::{Field, SchemaDefinition, SchemaRegistry};
///
/// let registry = SchemaRegistry::new();
/// registry
///     .register(SchemaDefinition::new("Address").in_module("app.schemas")
///         .field(Field::string("city")))
///     .unwrap();
///
/// assert!(registry.resolve("Address").is_ok());
/// assert!(registry.resolve("app.schemas.Address").is_ok());
/// assert!(registry.resolve("other.Address").is_err());
/// ```
pub struct SchemaRegistry {
    schemas: Arc<RwLock<RegistryMap>>,
}

impl SchemaRegistry {
    /// Creates a new empty schema registry.
    pub fn new() -> Self {
        Self {
            schemas: Arc::new(RwLock::new(RegistryMap::default())),
        }
    }

    /// Registers a schema under its qualified and simple names.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if a schema with the same
    /// qualified name is already registered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemacast::{SchemaDefinition, SchemaRegistry};
    ///
    /// let registry = SchemaRegistry::new();
    /// registry.register(SchemaDefinition::new("User")).unwrap();
    ///
    /// // Duplicate registration fails
    /// assert!(registry.register(SchemaDefinition::new("User")).is_err());
    /// ```
    pub fn register(
        &self,
        schema: impl Into<Arc<SchemaDefinition>>,
    ) -> Result<Arc<SchemaDefinition>, RegistryError> {
        let schema = schema.into();
        let full_name = schema.full_name();
        let mut map = self.schemas.write();

        if map.by_full_name.contains_key(&full_name) {
            return Err(RegistryError::DuplicateName(full_name));
        }

        map.by_simple_name
            .entry(schema.name().to_string())
            .or_default()
            .push(full_name.clone());
        map.by_full_name.insert(full_name.clone(), Arc::clone(&schema));
        tracing::debug!(schema = %full_name, "registered schema");
        Ok(schema)
    }

    /// Retrieves a schema by name, or `None` if it is missing or ambiguous.
    pub fn get(&self, name: &str) -> Option<Arc<SchemaDefinition>> {
        self.resolve(name).ok()
    }

    /// Resolves a schema by qualified or simple name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::SchemaNotFound` if nothing matches, and
    /// `RegistryError::Ambiguous` if a simple name matches several schemas.
    pub fn resolve(&self, name: &str) -> Result<Arc<SchemaDefinition>, RegistryError> {
        let map = self.schemas.read();

        if let Some(schema) = map.by_full_name.get(name) {
            return Ok(Arc::clone(schema));
        }
        if name.contains('.') {
            return Err(RegistryError::SchemaNotFound(name.to_string()));
        }

        match map.by_simple_name.get(name).map(Vec::as_slice) {
            Some([full_name]) => map
                .by_full_name
                .get(full_name)
                .cloned()
                .ok_or_else(|| RegistryError::SchemaNotFound(name.to_string())),
            Some(candidates) if candidates.len() > 1 => {
                let mut candidates = candidates.to_vec();
                candidates.sort();
                Err(RegistryError::Ambiguous {
                    name: name.to_string(),
                    candidates,
                })
            }
            _ => Err(RegistryError::SchemaNotFound(name.to_string())),
        }
    }

    /// Returns the qualified names of all registered schemas, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.schemas.read().by_full_name.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.schemas.read().by_full_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.read().by_full_name.is_empty()
    }

    /// Lists named nested references that cannot be resolved.
    ///
    /// Call this after all schemas are registered to check reference integrity.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemacast::{Field, SchemaDefinition, SchemaRegistry};
    ///
    /// let registry = SchemaRegistry::new();
    /// registry.register(SchemaDefinition::new("User")
    ///     .field(Field::nested("address", "Address"))  // Address not registered!
    /// ).unwrap();
    ///
    /// assert_eq!(registry.validate_refs(), vec!["Address"]);
    /// ```
    pub fn validate_refs(&self) -> Vec<String> {
        let schemas: Vec<_> = self.schemas.read().by_full_name.values().cloned().collect();
        let mut refs = Vec::new();
        for schema in &schemas {
            collect_named_refs(schema, &mut refs);
        }

        let mut unresolved: Vec<_> = refs
            .into_iter()
            .filter(|name| self.resolve(name).is_err())
            .collect();
        unresolved.sort();
        unresolved.dedup();
        unresolved
    }
}

fn collect_named_refs(schema: &SchemaDefinition, refs: &mut Vec<String>) {
    for field in schema.fields() {
        if let FieldKind::Nested(nested) = field.kind() {
            match nested.target() {
                SchemaRef::Named(name) => refs.push(name.clone()),
                SchemaRef::Direct(target) => collect_named_refs(target, refs),
            }
        }
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SchemaRegistry {
    fn clone(&self) -> Self {
        Self {
            schemas: Arc::clone(&self.schemas),
        }
    }
}

impl RegistryAccess for SchemaRegistry {
    fn resolve_schema(&self, name: &str) -> Result<Arc<SchemaDefinition>, RegistryError> {
        self.resolve(name)
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a schema with a qualified name that already exists.
    #[error("schema '{0}' already registered")]
    DuplicateName(String),

    /// No registered schema matches the name.
    #[error("schema '{0}' not found")]
    SchemaNotFound(String),

    /// A simple name matches schemas in several modules.
    #[error("schema name '{name}' is ambiguous, use one of: {}", .candidates.join(", "))]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },
}
