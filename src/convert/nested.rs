//! Nested reference expansion.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::context::ConversionContext;
use crate::schema::{FieldDescriptor, NestedField, SchemaDefinition, SchemaRef};
use crate::ConvertResult;

use super::SchemaConverter;

/// Resolves the schema a nested field points at.
pub(crate) fn target_schema(
    nested: &NestedField,
    context: &ConversionContext<'_>,
) -> ConvertResult<Arc<SchemaDefinition>> {
    match nested.target() {
        SchemaRef::Direct(schema) => Ok(Arc::clone(schema)),
        SchemaRef::Named(name) => context.resolve(name),
    }
}

/// Expands a nested field into the inlined fragment of its projected schema.
///
/// A `many` field is wrapped as an array whose type also admits `null` unless
/// the field is required.
pub(crate) fn resolve_nested(
    converter: &SchemaConverter,
    field: &FieldDescriptor,
    nested: &NestedField,
    context: &ConversionContext<'_>,
) -> ConvertResult<Value> {
    let target = target_schema(nested, context)?;
    let inner = context.enter(&target, nested.is_many())?;
    let view = target.project_at(nested.projection(), context.path())?;
    tracing::debug!(
        path = %context.path(),
        schema = %target.full_name(),
        depth = context.chain().len(),
        fields = view.len(),
        many = nested.is_many(),
        "expanding nested schema"
    );

    let fragment = converter.convert_view(&view, &inner)?;
    if !nested.is_many() {
        return Ok(fragment);
    }

    let array_type = if field.is_required() {
        json!(["array"])
    } else {
        json!(["array", "null"])
    };
    Ok(json!({
        "type": array_type,
        "items": fragment,
    }))
}
