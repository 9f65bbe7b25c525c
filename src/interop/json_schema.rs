//! JSON Schema extension hook.
//!
//! Custom field kinds implement [`CustomField`] to produce their own JSON Schema
//! fragment. The converter returns that fragment verbatim, bypassing the type table.

use serde_json::Value;

/// Trait for types that can describe themselves as a JSON Schema fragment.
pub trait ToJsonSchema {
    /// Converts this value to a JSON Schema (Draft 4) fragment.
    fn to_json_schema(&self) -> Value;
}

/// A field kind that supplies its own JSON Schema fragment.
///
/// # Example
///
/// ```rust
/// use schemacast::{CustomField, ToJsonSchema};
/// use serde_json::{json, Value};
///
/// struct Colour;
///
/// impl ToJsonSchema for Colour {
///     fn to_json_schema(&self) -> Value {
///         json!({"type": "string"})
///     }
/// }
///
/// impl CustomField for Colour {
///     fn kind_name(&self) -> &str {
///         "Colour"
///     }
/// }
/// ```
pub trait CustomField: ToJsonSchema + Send + Sync {
    /// Name of the field kind, used in logs and error messages.
    fn kind_name(&self) -> &str;
}
