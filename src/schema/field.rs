//! Field descriptors.
//!
//! This module provides [`FieldDescriptor`], the read-only description of one
//! declared field, together with the tagged union [`FieldKind`] that drives
//! dispatch in the converter.

use std::fmt::{self, Display};
use std::sync::Arc;

use serde_json::Value;

use crate::interop::CustomField;

use super::nested::NestedField;

/// Field classes of the schema declaration layer.
///
/// Most variants have a JSON Schema representation in the type table. `Other`
/// names a kind the table does not know; converting it fails unless the field
/// is declared as [`FieldKind::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Integer,
    Float,
    Decimal,
    Boolean,
    DateTime,
    LocalDateTime,
    Date,
    Time,
    TimeDelta,
    Uuid,
    Email,
    Url,
    Dict,
    List,
    Raw,
    Other(String),
}

impl FieldType {
    /// Returns the class name of this field type.
    pub fn name(&self) -> &str {
        match self {
            FieldType::String => "String",
            FieldType::Integer => "Integer",
            FieldType::Float => "Float",
            FieldType::Decimal => "Decimal",
            FieldType::Boolean => "Boolean",
            FieldType::DateTime => "DateTime",
            FieldType::LocalDateTime => "LocalDateTime",
            FieldType::Date => "Date",
            FieldType::Time => "Time",
            FieldType::TimeDelta => "TimeDelta",
            FieldType::Uuid => "UUID",
            FieldType::Email => "Email",
            FieldType::Url => "Url",
            FieldType::Dict => "Dict",
            FieldType::List => "List",
            FieldType::Raw => "Raw",
            FieldType::Other(name) => name.as_str(),
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a field holds, and therefore how it is converted.
#[derive(Clone)]
pub enum FieldKind {
    /// A scalar or container field described by the type table.
    Primitive(FieldType),
    /// A field structured by another schema.
    Nested(NestedField),
    /// A field that produces its own JSON Schema fragment.
    Custom(Arc<dyn CustomField>),
}

impl FieldKind {
    /// Returns a display name for this kind.
    pub fn kind_name(&self) -> &str {
        match self {
            FieldKind::Primitive(field_type) => field_type.name(),
            FieldKind::Nested(_) => "Nested",
            FieldKind::Custom(custom) => custom.kind_name(),
        }
    }
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Primitive(field_type) => {
                f.debug_tuple("Primitive").field(field_type).finish()
            }
            FieldKind::Nested(nested) => f.debug_tuple("Nested").field(nested).finish(),
            FieldKind::Custom(custom) => {
                f.debug_tuple("Custom").field(&custom.kind_name()).finish()
            }
        }
    }
}

/// One declared field of a [`SchemaDefinition`](crate::SchemaDefinition).
///
/// The default value is an `Option<Value>`: `None` means no default was
/// declared, while `Some(Value::Null)` is an explicit `null` default.
///
/// # Example
///
/// ```rust
/// use schemacast::Field;
/// use serde_json::json;
///
/// let id = Field::string("id").attribute("user_id").default(json!("no-id"));
///
/// assert_eq!(id.title(), "user_id");
/// assert_eq!(id.default_value(), Some(&json!("no-id")));
/// assert!(!id.is_required());
/// ```
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    attribute: Option<String>,
    required: bool,
    default: Option<Value>,
    kind: FieldKind,
}

impl FieldDescriptor {
    /// Creates an optional field with no default.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            attribute: None,
            required: false,
            default: None,
            kind,
        }
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the serialization alias used as the field's title.
    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Declares a default value. `Value::Null` is a valid default.
    pub fn default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Returns the declared key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the serialization alias, if any.
    pub fn attribute_name(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Returns the alias if set, otherwise the declared key.
    pub fn title(&self) -> &str {
        self.attribute.as_deref().unwrap_or(&self.name)
    }

    /// Returns true if the field is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the declared default, or `None` when no default was declared.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns the field kind.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }
}

/// Entry point for declaring fields.
///
/// # Example
///
/// ```rust
/// use schemacast::{Field, NestedField, SchemaDefinition};
///
/// let address = SchemaDefinition::new("Address")
///     .field(Field::string("city"))
///     .into_shared();
///
/// let user = SchemaDefinition::new("User")
///     .field(Field::string("name").required())
///     .field(Field::integer("age"))
///     .field(Field::nested("addresses", NestedField::new(address).many()));
///
/// assert_eq!(user.len(), 3);
/// ```
pub struct Field;

impl Field {
    /// Declares a field of the given type.
    pub fn of(name: impl Into<String>, field_type: FieldType) -> FieldDescriptor {
        FieldDescriptor::new(name, FieldKind::Primitive(field_type))
    }

    pub fn string(name: impl Into<String>) -> FieldDescriptor {
        Self::of(name, FieldType::String)
    }

    pub fn integer(name: impl Into<String>) -> FieldDescriptor {
        Self::of(name, FieldType::Integer)
    }

    pub fn float(name: impl Into<String>) -> FieldDescriptor {
        Self::of(name, FieldType::Float)
    }

    pub fn decimal(name: impl Into<String>) -> FieldDescriptor {
        Self::of(name, FieldType::Decimal)
    }

    pub fn boolean(name: impl Into<String>) -> FieldDescriptor {
        Self::of(name, FieldType::Boolean)
    }

    pub fn datetime(name: impl Into<String>) -> FieldDescriptor {
        Self::of(name, FieldType::DateTime)
    }

    pub fn date(name: impl Into<String>) -> FieldDescriptor {
        Self::of(name, FieldType::Date)
    }

    pub fn time(name: impl Into<String>) -> FieldDescriptor {
        Self::of(name, FieldType::Time)
    }

    pub fn uuid(name: impl Into<String>) -> FieldDescriptor {
        Self::of(name, FieldType::Uuid)
    }

    pub fn email(name: impl Into<String>) -> FieldDescriptor {
        Self::of(name, FieldType::Email)
    }

    pub fn url(name: impl Into<String>) -> FieldDescriptor {
        Self::of(name, FieldType::Url)
    }

    pub fn dict(name: impl Into<String>) -> FieldDescriptor {
        Self::of(name, FieldType::Dict)
    }

    pub fn list(name: impl Into<String>) -> FieldDescriptor {
        Self::of(name, FieldType::List)
    }

    /// Declares a field structured by another schema.
    ///
    /// Accepts a [`NestedField`], a shared schema handle, or a registered
    /// schema name.
    pub fn nested(name: impl Into<String>, nested: impl Into<NestedField>) -> FieldDescriptor {
        FieldDescriptor::new(name, FieldKind::Nested(nested.into()))
    }

    /// Declares a field whose JSON Schema comes from its own hook.
    pub fn custom<C>(name: impl Into<String>, custom: C) -> FieldDescriptor
    where
        C: CustomField + 'static,
    {
        FieldDescriptor::new(name, FieldKind::Custom(Arc::new(custom)))
    }
}
