//! Per-field dispatch.

use serde_json::{Map, Value};

use crate::context::ConversionContext;
use crate::error::ConvertError;
use crate::interop::ToJsonSchema;
use crate::schema::{FieldDescriptor, FieldKind};
use crate::ConvertResult;

use super::nested;
use super::types::{primitive_for, PrimitiveType};
use super::SchemaConverter;

/// Produces the JSON Schema fragment for one field.
///
/// Custom hooks win, then the type table (direct entries, then aliases), then
/// nested references. A primitive kind found in neither table fails with
/// `UnsupportedFieldType`.
pub(crate) fn resolve_field(
    converter: &SchemaConverter,
    field: &FieldDescriptor,
    context: &ConversionContext<'_>,
) -> ConvertResult<Value> {
    match field.kind() {
        FieldKind::Custom(custom) => Ok(custom.to_json_schema()),
        FieldKind::Primitive(field_type) => match primitive_for(field_type) {
            Some(primitive) => Ok(from_primitive(field, primitive)),
            None => Err(unsupported(field, context)),
        },
        FieldKind::Nested(nested) => nested::resolve_nested(converter, field, nested, context),
    }
}

pub(crate) fn unsupported(
    field: &FieldDescriptor,
    context: &ConversionContext<'_>,
) -> ConvertError {
    let kind = field.kind().kind_name().to_string();
    tracing::warn!(path = %context.path(), kind = %kind, "unsupported field type");
    ConvertError::UnsupportedFieldType {
        path: context.path().clone(),
        kind,
    }
}

fn from_primitive(field: &FieldDescriptor, primitive: PrimitiveType) -> Value {
    let mut fragment = Map::new();
    fragment.insert("title".to_string(), Value::from(field.title()));
    primitive.mapping().merge_into(&mut fragment);
    if let Some(default) = field.default_value() {
        fragment.insert("default".to_string(), default.clone());
    }
    Value::Object(fragment)
}
