//! The primitive type table.
//!
//! [`PrimitiveType::mapping`] gives the JSON Schema fragment for each value
//! type. Field types reach a value type either through the declaration layer's
//! own type mapping ([`FIELD_TYPE_MAP`]) or through [`FIELD_TYPE_ALIASES`] for
//! field classes that are not the canonical field of any value type.

use serde_json::{Map, Value};

use crate::schema::FieldType;

/// Value types with a JSON Schema representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Dict,
    List,
    Time,
    TimeDelta,
    DateTime,
    Date,
    Uuid,
    Text,
    Binary,
    Decimal,
    Set,
    Tuple,
    Float,
    Int,
    Bool,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 15] = [
        PrimitiveType::Dict,
        PrimitiveType::List,
        PrimitiveType::Time,
        PrimitiveType::TimeDelta,
        PrimitiveType::DateTime,
        PrimitiveType::Date,
        PrimitiveType::Uuid,
        PrimitiveType::Text,
        PrimitiveType::Binary,
        PrimitiveType::Decimal,
        PrimitiveType::Set,
        PrimitiveType::Tuple,
        PrimitiveType::Float,
        PrimitiveType::Int,
        PrimitiveType::Bool,
    ];

    /// Returns the JSON Schema type and format for this value type.
    pub const fn mapping(self) -> TypeMapping {
        match self {
            PrimitiveType::Dict => TypeMapping::plain("object"),
            PrimitiveType::List | PrimitiveType::Set | PrimitiveType::Tuple => {
                TypeMapping::plain("array")
            }
            PrimitiveType::Time => TypeMapping::formatted("string", "time"),
            PrimitiveType::TimeDelta => TypeMapping::plain("string"),
            PrimitiveType::DateTime => TypeMapping::formatted("string", "date-time"),
            PrimitiveType::Date => TypeMapping::formatted("string", "date"),
            PrimitiveType::Uuid => TypeMapping::formatted("string", "uuid"),
            PrimitiveType::Text | PrimitiveType::Binary => TypeMapping::plain("string"),
            PrimitiveType::Decimal => TypeMapping::formatted("number", "decimal"),
            PrimitiveType::Float => TypeMapping::formatted("number", "float"),
            PrimitiveType::Int => TypeMapping::formatted("number", "integer"),
            PrimitiveType::Bool => TypeMapping::plain("boolean"),
        }
    }
}

/// A partial JSON Schema fragment: a `type` and optionally a `format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping {
    pub json_type: &'static str,
    pub format: Option<&'static str>,
}

impl TypeMapping {
    const fn plain(json_type: &'static str) -> Self {
        Self {
            json_type,
            format: None,
        }
    }

    const fn formatted(json_type: &'static str, format: &'static str) -> Self {
        Self {
            json_type,
            format: Some(format),
        }
    }

    /// Writes `type` and, when present, `format` into a fragment.
    pub fn merge_into(&self, fragment: &mut Map<String, Value>) {
        fragment.insert("type".to_string(), Value::from(self.json_type));
        if let Some(format) = self.format {
            fragment.insert("format".to_string(), Value::from(format));
        }
    }
}

/// Field classes that are the canonical field of a value type.
pub static FIELD_TYPE_MAP: [(FieldType, PrimitiveType); 11] = [
    (FieldType::String, PrimitiveType::Text),
    (FieldType::Integer, PrimitiveType::Int),
    (FieldType::Float, PrimitiveType::Float),
    (FieldType::Decimal, PrimitiveType::Decimal),
    (FieldType::Boolean, PrimitiveType::Bool),
    (FieldType::DateTime, PrimitiveType::DateTime),
    (FieldType::Date, PrimitiveType::Date),
    (FieldType::Time, PrimitiveType::Time),
    (FieldType::TimeDelta, PrimitiveType::TimeDelta),
    (FieldType::Uuid, PrimitiveType::Uuid),
    (FieldType::Raw, PrimitiveType::Tuple),
];

/// Further field classes mapped onto the value type whose fragment they share.
pub static FIELD_TYPE_ALIASES: [(FieldType, PrimitiveType); 5] = [
    (FieldType::Email, PrimitiveType::Text),
    (FieldType::Dict, PrimitiveType::Dict),
    (FieldType::List, PrimitiveType::List),
    (FieldType::Url, PrimitiveType::Text),
    (FieldType::LocalDateTime, PrimitiveType::DateTime),
];

/// Finds the value type for a field class, checking the direct table first.
pub fn primitive_for(field_type: &FieldType) -> Option<PrimitiveType> {
    FIELD_TYPE_MAP
        .iter()
        .chain(FIELD_TYPE_ALIASES.iter())
        .find(|(candidate, _)| candidate == field_type)
        .map(|(_, primitive)| *primitive)
}
