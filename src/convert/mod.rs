//! Conversion of schema declarations into JSON Schema (Draft 4).
//!
//! [`SchemaConverter`] walks the effective fields of a [`SchemaView`] in name
//! order, resolves each one to a fragment and assembles the object document.
//! Nested references are inlined by converting the referenced schema
//! recursively; no `$ref` or `definitions` are emitted.
//!
//! # Example
//!
//! ```rust
//! use schemacast::{Field, SchemaConverter, SchemaDefinition};
//! use serde_json::json;
//!
//! let user = SchemaDefinition::new("User")
//!     .field(Field::string("name").required())
//!     .field(Field::integer("age").default(json!(0)));
//!
//! let document = SchemaConverter::new().dump(&user).unwrap();
//! assert_eq!(document, json!({
//!     "type": "object",
//!     "properties": {
//!         "age": {"title": "age", "type": "number", "format": "integer", "default": 0},
//!         "name": {"title": "name", "type": "string"}
//!     },
//!     "required": ["name"]
//! }));
//! ```

mod field;
mod nested;
mod types;

pub use types::{primitive_for, PrimitiveType, TypeMapping, FIELD_TYPE_ALIASES, FIELD_TYPE_MAP};

use std::sync::Arc;

use rayon::prelude::*;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::context::{ConversionContext, RegistryAccess};
use crate::error::{ConvertError, ConvertErrors};
use crate::path::FieldPath;
use crate::registry::RegistryError;
use crate::schema::{FieldKind, SchemaDefinition, SchemaView};
use crate::{CheckResult, ConvertResult};

/// Converts schema declarations into JSON Schema documents.
///
/// The converter holds only the registry used for named nested references.
/// It keeps no state between calls, so one converter can serve many threads.
#[derive(Clone, Default)]
pub struct SchemaConverter {
    registry: Option<Arc<dyn RegistryAccess>>,
}

impl SchemaConverter {
    /// Creates a converter without a registry.
    ///
    /// Nested references given by name fail as unresolved.
    pub fn new() -> Self {
        Self { registry: None }
    }

    /// Creates a converter that resolves named references through `registry`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemacast::{Field, SchemaConverter, SchemaDefinition, SchemaRegistry};
    ///
    /// let registry = SchemaRegistry::new();
    /// registry.register(SchemaDefinition::new("Address")
    ///     .field(Field::string("city").required())).unwrap();
    ///
    /// let converter = SchemaConverter::with_registry(registry.clone());
    /// let user = SchemaDefinition::new("User")
    ///     .field(Field::nested("address", "Address"));
    ///
    /// let document = converter.dump(&user).unwrap();
    /// assert_eq!(document["properties"]["address"]["required"][0], "city");
    /// ```
    pub fn with_registry<R>(registry: R) -> Self
    where
        R: RegistryAccess + 'static,
    {
        Self {
            registry: Some(Arc::new(registry)),
        }
    }

    /// Converts every declared field of `schema`.
    ///
    /// # Errors
    ///
    /// Fails on the first field that cannot be converted; no partial document
    /// is returned.
    pub fn dump(&self, schema: &SchemaDefinition) -> ConvertResult<Value> {
        self.convert(&schema.view())
    }

    /// Converts an instantiated, already-projected schema.
    pub fn convert(&self, view: &SchemaView<'_>) -> ConvertResult<Value> {
        let schema = view.definition();
        tracing::debug!(schema = %schema.full_name(), fields = view.len(), "converting schema");

        let context = ConversionContext::new(self.registry(), schema);
        let document = self.convert_view(view, &context)?;

        tracing::debug!(schema = %schema.full_name(), "converted schema");
        Ok(document)
    }

    /// Converts a registered schema looked up by name.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::NestedReferenceUnresolved` at the root path if
    /// the name cannot be resolved.
    pub fn dump_named(&self, name: &str) -> ConvertResult<Value> {
        let result = match self.registry() {
            Some(registry) => registry.resolve_schema(name),
            None => Err(RegistryError::SchemaNotFound(name.to_string())),
        };
        let schema = result.map_err(|source| ConvertError::NestedReferenceUnresolved {
            path: FieldPath::root(),
            name: name.to_string(),
            source,
        })?;
        self.dump(&schema)
    }

    /// Converts independent schemas in parallel, preserving input order.
    pub fn dump_many(&self, schemas: &[Arc<SchemaDefinition>]) -> Vec<ConvertResult<Value>> {
        schemas.par_iter().map(|schema| self.dump(schema)).collect()
    }

    /// Checks a schema tree and reports every conversion error at once.
    ///
    /// Unlike [`convert`](Self::convert), this does not stop at the first
    /// failure and builds no document.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemacast::{Field, FieldType, SchemaConverter, SchemaDefinition};
    ///
    /// let schema = SchemaDefinition::new("Palette")
    ///     .field(Field::of("bg", FieldType::Other("Colour".into())))
    ///     .field(Field::of("fg", FieldType::Other("Colour".into())))
    ///     .field(Field::nested("owner", "User"));
    ///
    /// let result = SchemaConverter::new().check(&schema.view());
    /// match result {
    ///     stillwater::Validation::Failure(errors) => assert_eq!(errors.len(), 3),
    ///     stillwater::Validation::Success(_) => unreachable!(),
    /// }
    /// ```
    pub fn check(&self, view: &SchemaView<'_>) -> CheckResult {
        let context = ConversionContext::new(self.registry(), view.definition());
        let mut errors = Vec::new();
        self.check_view(view, &context, &mut errors);

        match ConvertErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(()),
        }
    }

    fn registry(&self) -> Option<&dyn RegistryAccess> {
        self.registry.as_deref()
    }

    pub(crate) fn convert_view(
        &self,
        view: &SchemaView<'_>,
        context: &ConversionContext<'_>,
    ) -> ConvertResult<Value> {
        let mut properties = Map::new();
        for field in view.fields() {
            let field_context = context.field(field.name());
            let fragment = field::resolve_field(self, field, &field_context)?;
            tracing::trace!(
                path = %field_context.path(),
                kind = field.kind().kind_name(),
                "resolved field"
            );
            properties.insert(field.name().to_string(), fragment);
        }

        let mut document = Map::new();
        document.insert("type".to_string(), Value::from("object"));
        document.insert("properties".to_string(), Value::Object(properties));
        let required = view.required();
        if !required.is_empty() {
            document.insert("required".to_string(), Value::from(required));
        }
        Ok(Value::Object(document))
    }

    fn check_view(
        &self,
        view: &SchemaView<'_>,
        context: &ConversionContext<'_>,
        errors: &mut Vec<ConvertError>,
    ) {
        for field in view.fields() {
            let field_context = context.field(field.name());
            match field.kind() {
                FieldKind::Custom(_) => {}
                FieldKind::Primitive(field_type) => {
                    if primitive_for(field_type).is_none() {
                        errors.push(field::unsupported(field, &field_context));
                    }
                }
                FieldKind::Nested(nested) => {
                    let expanded = nested::target_schema(nested, &field_context).and_then(|target| {
                        let inner = field_context.enter(&target, nested.is_many())?;
                        Ok((target, inner))
                    });
                    let (target, inner) = match expanded {
                        Ok(expanded) => expanded,
                        Err(e) => {
                            errors.push(e);
                            continue;
                        }
                    };
                    match target.project_at(nested.projection(), field_context.path()) {
                        Ok(nested_view) => self.check_view(&nested_view, &inner, errors),
                        Err(e) => errors.push(e),
                    }
                }
            }
        }
    }
}
