//! # Schemacast
//!
//! Converts declarative data-schema declarations (named collections of typed
//! field descriptors) into JSON Schema (Draft 4) documents describing the same
//! data shape.
//!
//! ## Overview
//!
//! Every field is resolved through a fixed dispatch order: a custom hook if the
//! field supplies one, then the primitive type table, then nested schema
//! expansion. Nested schemas are projected through `only`/`exclude` selectors
//! and inlined recursively; one-to-many relationships become arrays. Conversion
//! is all-or-nothing: the first field that cannot be converted aborts the call.
//!
//! ## Core Types
//!
//! - [`SchemaDefinition`]: An ordered collection of [`FieldDescriptor`]s
//! - [`SchemaConverter`]: The conversion entry point
//! - [`SchemaRegistry`]: Name lookup for nested references given as strings
//! - [`ConvertError`]: A conversion failure located by a [`FieldPath`]
//!
//! ## Example
//!
//! ```rust
//! use schemacast::{Field, NestedField, SchemaConverter, SchemaDefinition};
//! use serde_json::json;
//!
//! let address = SchemaDefinition::new("Address")
//!     .field(Field::string("street"))
//!     .field(Field::string("city").required())
//!     .into_shared();
//!
//! let user = SchemaDefinition::new("User")
//!     .field(Field::string("name").required())
//!     .field(Field::nested("addresses", NestedField::new(address).only("city").many()));
//!
//! let document = SchemaConverter::new().dump(&user).unwrap();
//! assert_eq!(document["properties"]["addresses"]["type"], json!(["array", "null"]));
//! assert_eq!(
//!     document["properties"]["addresses"]["items"]["properties"],
//!     json!({"city": {"title": "city", "type": "string"}})
//! );
//! ```

pub mod context;
pub mod convert;
pub mod error;
pub mod interop;
pub mod path;
pub mod registry;
pub mod schema;

pub use context::RegistryAccess;
pub use convert::{PrimitiveType, SchemaConverter, TypeMapping};
pub use error::{ConvertError, ConvertErrors};
pub use interop::{CustomField, ToJsonSchema};
pub use path::{FieldPath, PathSegment};
pub use registry::{RegistryError, SchemaRegistry};
pub use schema::{
    Field, FieldDescriptor, FieldKind, FieldType, NestedField, Projection, SchemaDefinition,
    SchemaRef, SchemaView, Selector,
};

/// Result of a single conversion.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Result of an accumulating pre-flight check.
pub type CheckResult = stillwater::Validation<(), ConvertErrors>;
