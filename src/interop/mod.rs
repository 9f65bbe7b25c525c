//! Interoperability with JSON Schema.
//!
//! This module holds the extension point through which field kinds unknown to
//! the built-in type table describe themselves as JSON Schema.

pub mod json_schema;

pub use json_schema::{CustomField, ToJsonSchema};
