//! Schema declarations.
//!
//! This module provides [`SchemaDefinition`], a named and ordered collection of
//! [`FieldDescriptor`]s, and [`SchemaView`], a definition instantiated with a
//! [`Projection`] applied. Definitions are immutable once shared and are read,
//! never mutated, by the converter.
//!
//! # Example
//!
//! ```rust
//! use schemacast::{Field, Projection, SchemaDefinition};
//!
//! let address = SchemaDefinition::new("Address")
//!     .field(Field::string("street"))
//!     .field(Field::string("city"))
//!     .field(Field::string("zip"));
//!
//! let view = address.project(&Projection::all().exclude(["zip"])).unwrap();
//! assert_eq!(view.field_names().collect::<Vec<_>>(), vec!["city", "street"]);
//! ```

mod field;
mod nested;

pub use field::{Field, FieldDescriptor, FieldKind, FieldType};
pub use nested::{NestedField, Projection, SchemaRef, Selector};

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::ConvertError;
use crate::path::FieldPath;
use crate::ConvertResult;

/// A named, ordered collection of field descriptors.
///
/// Redeclaring a field name replaces the earlier descriptor in place.
#[derive(Debug, Clone)]
pub struct SchemaDefinition {
    name: String,
    module: Option<String>,
    fields: IndexMap<String, FieldDescriptor>,
}

impl SchemaDefinition {
    /// Creates an empty schema with the given class name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: None,
            fields: IndexMap::new(),
        }
    }

    /// Places the schema in a dotted module path such as `app.schemas`.
    ///
    /// The registry indexes the schema under both its simple name and its
    /// qualified name `module.Name`.
    pub fn in_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Declares a field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.insert(field.name().to_string(), field);
        self
    }

    /// Wraps the definition in an `Arc` so it can be shared by nested fields.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Returns the simple class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the module path, if any.
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Returns `module.Name`, or just `Name` when no module is set.
    pub fn full_name(&self) -> String {
        match &self.module {
            Some(module) => format!("{}.{}", module, self.name),
            None => self.name.clone(),
        }
    }

    /// Looks up a declared field.
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Returns the declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Instantiates the schema with every declared field.
    pub fn view(&self) -> SchemaView<'_> {
        SchemaView::new(self, self.fields.values().collect())
    }

    /// Instantiates the schema with a projection applied.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::UnknownField` if the projection names a field the
    /// schema does not declare.
    pub fn project(&self, projection: &Projection) -> ConvertResult<SchemaView<'_>> {
        self.project_at(projection, &FieldPath::root())
    }

    pub(crate) fn project_at(
        &self,
        projection: &Projection,
        path: &FieldPath,
    ) -> ConvertResult<SchemaView<'_>> {
        let only = projection.only_names();
        let selectors = only.iter().flatten().chain(projection.excluded());
        for name in selectors {
            if !self.fields.contains_key(name) {
                return Err(ConvertError::UnknownField {
                    path: path.clone(),
                    schema: self.full_name(),
                    field: name.clone(),
                });
            }
        }

        let fields = match only {
            Some(only) => self
                .fields
                .values()
                .filter(|f| only.contains(f.name()))
                .collect(),
            None => self
                .fields
                .values()
                .filter(|f| !projection.excluded().contains(f.name()))
                .collect(),
        };
        Ok(SchemaView::new(self, fields))
    }
}

/// An instantiated schema: a definition plus its effective field set.
///
/// Fields are held sorted by name, which fixes the order of both
/// `properties` and `required` in the converted document.
#[derive(Debug, Clone)]
pub struct SchemaView<'a> {
    definition: &'a SchemaDefinition,
    fields: Vec<&'a FieldDescriptor>,
}

impl<'a> SchemaView<'a> {
    fn new(definition: &'a SchemaDefinition, mut fields: Vec<&'a FieldDescriptor>) -> Self {
        fields.sort_by(|a, b| a.name().cmp(b.name()));
        Self { definition, fields }
    }

    /// Returns the underlying definition.
    pub fn definition(&self) -> &'a SchemaDefinition {
        self.definition
    }

    /// Returns the effective fields, sorted by name.
    pub fn fields(&self) -> impl Iterator<Item = &'a FieldDescriptor> + '_ {
        self.fields.iter().copied()
    }

    /// Returns the effective field names, sorted.
    pub fn field_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.fields.iter().map(|f| f.name())
    }

    /// Returns the sorted names of the effective fields marked required.
    pub fn required(&self) -> Vec<&'a str> {
        self.fields
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.name())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
