//! Conversion error types.
//!
//! This module provides [`ConvertError`] for single conversion failures and
//! [`ConvertErrors`] for accumulating several of them.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::FieldPath;
use crate::registry::RegistryError;

/// A single conversion failure.
///
/// Every variant carries the [`FieldPath`] of the field being converted when
/// the failure occurred, so errors raised deep inside nested schemas still
/// point at the offending declaration.
///
/// # Example
///
/// ```rust
/// use schemacast::{ConvertError, FieldPath};
///
/// let error = ConvertError::UnsupportedFieldType {
///     path: FieldPath::from_field("favourite_colour"),
///     kind: "Colour".to_string(),
/// };
///
/// assert_eq!(error.code(), "unsupported_field_type");
/// assert_eq!(
///     error.to_string(),
///     "favourite_colour: unsupported field type 'Colour'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    /// The field matched no dispatch branch: no custom hook, no type table
    /// entry and no nested reference.
    #[error("{path}: unsupported field type '{kind}'")]
    UnsupportedFieldType { path: FieldPath, kind: String },

    /// A nested reference given by name could not be resolved.
    #[error("{path}: nested schema '{name}' could not be resolved")]
    NestedReferenceUnresolved {
        path: FieldPath,
        name: String,
        #[source]
        source: RegistryError,
    },

    /// A nested reference re-entered a schema that is already being expanded.
    #[error("{path}: cyclic nested reference {}", .chain.join(" -> "))]
    CyclicReference { path: FieldPath, chain: Vec<String> },

    /// An `only` or `exclude` selector named a field the schema does not declare.
    #[error("{path}: schema '{schema}' has no field '{field}'")]
    UnknownField {
        path: FieldPath,
        schema: String,
        field: String,
    },
}

impl ConvertError {
    /// Returns the location of the failing field.
    pub fn path(&self) -> &FieldPath {
        match self {
            ConvertError::UnsupportedFieldType { path, .. }
            | ConvertError::NestedReferenceUnresolved { path, .. }
            | ConvertError::CyclicReference { path, .. }
            | ConvertError::UnknownField { path, .. } => path,
        }
    }

    /// Machine-readable error code (e.g. `unsupported_field_type`).
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::UnsupportedFieldType { .. } => "unsupported_field_type",
            ConvertError::NestedReferenceUnresolved { .. } => "nested_reference_unresolved",
            ConvertError::CyclicReference { .. } => "cyclic_reference",
            ConvertError::UnknownField { .. } => "unknown_field",
        }
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ConvertError>();
    assert_sync::<ConvertError>();
};

/// A non-empty collection of conversion errors.
///
/// Produced by [`SchemaConverter::check`](crate::SchemaConverter::check), which
/// walks a whole schema tree instead of stopping at the first failure.
/// `ConvertErrors` implements `Semigroup`, so reports from sibling fields can
/// be combined.
///
/// ```rust
/// use schemacast::{ConvertError, ConvertErrors, FieldPath};
/// use stillwater::prelude::*;
///
/// let unsupported = |name: &str| ConvertError::UnsupportedFieldType {
///     path: FieldPath::from_field(name),
///     kind: "Colour".to_string(),
/// };
///
/// let combined = ConvertErrors::single(unsupported("fg"))
///     .combine(ConvertErrors::single(unsupported("bg")));
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertErrors(NonEmptyVec<ConvertError>);

impl ConvertErrors {
    /// Creates a `ConvertErrors` containing a single error.
    pub fn single(error: ConvertError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `ConvertErrors` from a vec, or `None` if the vec is empty.
    pub fn from_vec(errors: Vec<ConvertError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &ConvertError> {
        self.0.iter()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &ConvertError {
        self.0.head()
    }

    /// Returns all errors with the specified error code.
    pub fn with_code(&self, code: &str) -> Vec<&ConvertError> {
        self.0.iter().filter(|e| e.code() == code).collect()
    }

    /// Returns all errors at the specified path.
    pub fn at_path(&self, path: &FieldPath) -> Vec<&ConvertError> {
        self.0.iter().filter(|e| e.path() == path).collect()
    }

    /// Converts this collection into a `Vec<ConvertError>`.
    pub fn into_vec(self) -> Vec<ConvertError> {
        self.0.into_vec()
    }
}

impl Semigroup for ConvertErrors {
    fn combine(self, other: Self) -> Self {
        ConvertErrors(self.0.combine(other.0))
    }
}

impl Display for ConvertErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Conversion failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConvertErrors {}

impl IntoIterator for ConvertErrors {
    type Item = ConvertError;
    type IntoIter = std::vec::IntoIter<ConvertError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}
