//! Conversion context for nested reference resolution.
//!
//! This module provides the [`ConversionContext`] type that carries registry
//! access, the current field path and the chain of schemas being expanded
//! through one recursive conversion.

use std::sync::Arc;

use crate::error::ConvertError;
use crate::path::FieldPath;
use crate::registry::RegistryError;
use crate::schema::SchemaDefinition;
use crate::ConvertResult;

/// Trait for resolving schema names to definitions.
///
/// [`SchemaRegistry`](crate::SchemaRegistry) implements this; applications with
/// their own schema catalogue can implement it instead.
pub trait RegistryAccess: Send + Sync {
    /// Resolves a schema by name.
    fn resolve_schema(&self, name: &str) -> Result<Arc<SchemaDefinition>, RegistryError>;
}

/// Per-call state threaded through one conversion.
///
/// A new context is derived for every field and every nested expansion; the
/// original is never mutated, so sibling fields see the same chain.
///
/// Cycles are detected by schema identity. Two distinct definitions that share
/// a name may nest one another; the names are kept only for error reporting.
#[derive(Clone)]
pub(crate) struct ConversionContext<'r> {
    registry: Option<&'r dyn RegistryAccess>,
    expanding: Vec<*const SchemaDefinition>,
    chain: Vec<String>,
    path: FieldPath,
}

impl<'r> ConversionContext<'r> {
    /// Creates the context for a top-level conversion of `schema`.
    pub(crate) fn new(
        registry: Option<&'r dyn RegistryAccess>,
        schema: &SchemaDefinition,
    ) -> Self {
        Self {
            registry,
            expanding: vec![schema as *const SchemaDefinition],
            chain: vec![schema.full_name()],
            path: FieldPath::root(),
        }
    }

    /// Returns the path of the field being converted.
    pub(crate) fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Returns the chain of schemas being expanded, outermost first.
    pub(crate) fn chain(&self) -> &[String] {
        &self.chain
    }

    /// Creates a context for one field of the current schema.
    pub(crate) fn field(&self, name: &str) -> Self {
        Self {
            registry: self.registry,
            expanding: self.expanding.clone(),
            chain: self.chain.clone(),
            path: self.path.push_field(name),
        }
    }

    /// Creates a context for expanding `schema` below the current field.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::CyclicReference` if `schema` is already being
    /// expanded further up the chain.
    pub(crate) fn enter(&self, schema: &SchemaDefinition, many: bool) -> ConvertResult<Self> {
        let cyclic = self.expanding.iter().any(|&seen| std::ptr::eq(seen, schema));
        let mut chain = self.chain.clone();
        chain.push(schema.full_name());

        if cyclic {
            return Err(ConvertError::CyclicReference {
                path: self.path.clone(),
                chain,
            });
        }

        let path = if many {
            self.path.push_items()
        } else {
            self.path.clone()
        };
        let mut expanding = self.expanding.clone();
        expanding.push(schema as *const SchemaDefinition);
        Ok(Self {
            registry: self.registry,
            expanding,
            chain,
            path,
        })
    }

    /// Resolves a named nested reference through the registry.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::NestedReferenceUnresolved` if there is no
    /// registry or the registry cannot resolve the name.
    pub(crate) fn resolve(&self, name: &str) -> ConvertResult<Arc<SchemaDefinition>> {
        let result = match self.registry {
            Some(registry) => registry.resolve_schema(name),
            None => Err(RegistryError::SchemaNotFound(name.to_string())),
        };
        result.map_err(|source| {
            tracing::warn!(
                path = %self.path,
                schema = name,
                error = %source,
                "unresolved nested reference"
            );
            ConvertError::NestedReferenceUnresolved {
                path: self.path.clone(),
                name: name.to_string(),
                source,
            }
        })
    }
}
