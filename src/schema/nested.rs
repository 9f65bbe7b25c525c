//! Nested schema references and field projections.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;

use super::SchemaDefinition;

/// The schema a nested field points at.
#[derive(Clone)]
pub enum SchemaRef {
    /// A direct handle to the schema.
    Direct(Arc<SchemaDefinition>),
    /// A name resolved through the [`SchemaRegistry`](crate::SchemaRegistry)
    /// at conversion time.
    Named(String),
}

impl fmt::Debug for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaRef::Direct(schema) => {
                f.debug_tuple("Direct").field(&schema.full_name()).finish()
            }
            SchemaRef::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

impl From<Arc<SchemaDefinition>> for SchemaRef {
    fn from(schema: Arc<SchemaDefinition>) -> Self {
        SchemaRef::Direct(schema)
    }
}

impl From<SchemaDefinition> for SchemaRef {
    fn from(schema: SchemaDefinition) -> Self {
        SchemaRef::Direct(Arc::new(schema))
    }
}

impl From<&str> for SchemaRef {
    fn from(name: &str) -> Self {
        SchemaRef::Named(name.to_string())
    }
}

impl From<String> for SchemaRef {
    fn from(name: String) -> Self {
        SchemaRef::Named(name)
    }
}

/// An `only` selector: a single field name or an ordered set of names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    One(String),
    Many(IndexSet<String>),
}

impl Selector {
    /// Returns the selected names as an ordered set.
    pub fn normalize(&self) -> IndexSet<String> {
        match self {
            Selector::One(name) => IndexSet::from([name.clone()]),
            Selector::Many(names) => names.clone(),
        }
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Selector::One(name.to_string())
    }
}

impl From<String> for Selector {
    fn from(name: String) -> Self {
        Selector::One(name)
    }
}

impl From<IndexSet<String>> for Selector {
    fn from(names: IndexSet<String>) -> Self {
        Selector::Many(names)
    }
}

impl From<Vec<&str>> for Selector {
    fn from(names: Vec<&str>) -> Self {
        Selector::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Selector {
    fn from(names: [&str; N]) -> Self {
        Selector::Many(names.into_iter().map(str::to_string).collect())
    }
}

/// Inclusion and exclusion filters applied when instantiating a schema.
///
/// `only` takes precedence: when it is set, `exclude` is ignored.
///
/// # Example
///
/// ```rust
/// use schemacast::Projection;
///
/// let projection = Projection::all().exclude(["zip"]);
/// assert!(projection.only_names().is_none());
///
/// let projection = Projection::only("city");
/// assert_eq!(projection.only_names().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    only: Option<Selector>,
    exclude: IndexSet<String>,
}

impl Projection {
    /// Every declared field participates.
    pub fn all() -> Self {
        Self::default()
    }

    /// Only the selected fields participate.
    pub fn only(selector: impl Into<Selector>) -> Self {
        Self {
            only: Some(selector.into()),
            exclude: IndexSet::new(),
        }
    }

    /// Adds names to the exclusion set.
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    /// Returns the normalized `only` set, if one was given.
    pub fn only_names(&self) -> Option<IndexSet<String>> {
        self.only.as_ref().map(Selector::normalize)
    }

    /// Returns the exclusion set.
    pub fn excluded(&self) -> &IndexSet<String> {
        &self.exclude
    }
}

/// Payload of a nested field: target schema, projection and multiplicity.
///
/// # Example
///
/// ```rust
/// use schemacast::{Field, NestedField};
///
/// let field = Field::nested(
///     "addresses",
///     NestedField::new("Address").only("city").many(),
/// );
/// assert_eq!(field.name(), "addresses");
/// ```
#[derive(Debug, Clone)]
pub struct NestedField {
    target: SchemaRef,
    projection: Projection,
    many: bool,
}

impl NestedField {
    /// Creates a single-valued reference to `target` with no projection.
    pub fn new(target: impl Into<SchemaRef>) -> Self {
        Self {
            target: target.into(),
            projection: Projection::all(),
            many: false,
        }
    }

    /// Restricts the nested schema to the selected fields.
    pub fn only(mut self, selector: impl Into<Selector>) -> Self {
        self.projection.only = Some(selector.into());
        self
    }

    /// Removes the named fields from the nested schema.
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection = self.projection.exclude(names);
        self
    }

    /// Marks the relationship as one-to-many.
    pub fn many(mut self) -> Self {
        self.many = true;
        self
    }

    pub fn target(&self) -> &SchemaRef {
        &self.target
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn is_many(&self) -> bool {
        self.many
    }
}

impl From<Arc<SchemaDefinition>> for NestedField {
    fn from(target: Arc<SchemaDefinition>) -> Self {
        NestedField::new(target)
    }
}

impl From<SchemaDefinition> for NestedField {
    fn from(target: SchemaDefinition) -> Self {
        NestedField::new(target)
    }
}

impl From<&str> for NestedField {
    fn from(target: &str) -> Self {
        NestedField::new(target)
    }
}

impl From<String> for NestedField {
    fn from(target: String) -> Self {
        NestedField::new(target)
    }
}
