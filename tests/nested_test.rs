//! Tests for nested schema expansion and projection.

use std::collections::BTreeSet;
use std::sync::Arc;

use schemacast::{
    ConvertError, Field, FieldKind, FieldPath, NestedField, SchemaConverter, SchemaDefinition,
    SchemaRef, SchemaRegistry,
};
use serde_json::json;

fn address() -> Arc<SchemaDefinition> {
    SchemaDefinition::new("Address")
        .field(Field::string("street").required())
        .field(Field::string("city").required())
        .field(Field::string("zip"))
        .into_shared()
}

fn user() -> Arc<SchemaDefinition> {
    SchemaDefinition::new("User")
        .field(Field::string("name").required())
        .field(Field::email("email"))
        .field(Field::integer("age"))
        .into_shared()
}

fn group() -> SchemaDefinition {
    SchemaDefinition::new("Group")
        .field(Field::nested("user1", NestedField::new(user()).only("name").many()))
        .field(Field::nested("user2", NestedField::new(user()).only(["name", "email"]).many()))
        .field(Field::nested("user3", NestedField::new(user()).exclude(["age"]).many()))
        .field(Field::nested(
            "user4",
            NestedField::new(user()).only(["age"]).exclude(["age"]).many(),
        ))
        .field(Field::nested("user5", NestedField::new(user()).many()))
}

#[test]
fn test_nested_only_exclude() {
    let schema = group();
    let document = SchemaConverter::new().dump(&schema).unwrap();

    for field in schema.fields() {
        let nested = match field.kind() {
            FieldKind::Nested(nested) => nested,
            _ => unreachable!(),
        };
        let declared: BTreeSet<String> = match nested.target() {
            SchemaRef::Direct(target) => target.fields().map(|f| f.name().to_string()).collect(),
            SchemaRef::Named(_) => unreachable!(),
        };

        let expected: BTreeSet<String> = match nested.projection().only_names() {
            Some(only) => only.into_iter().collect(),
            None => declared
                .iter()
                .filter(|name| !nested.projection().excluded().contains(*name))
                .cloned()
                .collect(),
        };

        let actual: BTreeSet<String> = document["properties"][field.name()]["items"]["properties"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(expected, actual, "field {}", field.name());
    }
}

#[test]
fn test_many_not_required() {
    let schema = SchemaDefinition::new("Person")
        .field(Field::nested("addresses", NestedField::new(address()).many()));

    let document = SchemaConverter::new().dump(&schema).unwrap();

    assert_eq!(
        document["properties"]["addresses"],
        json!({
            "type": ["array", "null"],
            "items": {
                "type": "object",
                "properties": {
                    "city": {"title": "city", "type": "string"},
                    "street": {"title": "street", "type": "string"},
                    "zip": {"title": "zip", "type": "string"}
                },
                "required": ["city", "street"]
            }
        })
    );
}

#[test]
fn test_many_required() {
    let schema = SchemaDefinition::new("Person")
        .field(Field::nested("addresses", NestedField::new(address()).many()).required());

    let document = SchemaConverter::new().dump(&schema).unwrap();

    assert_eq!(document["properties"]["addresses"]["type"], json!(["array"]));
    assert_eq!(document["required"], json!(["addresses"]));
}

#[test]
fn test_single_nested_is_inlined() {
    let schema = SchemaDefinition::new("Person").field(Field::nested("home", address()));
    let document = SchemaConverter::new().dump(&schema).unwrap();

    assert_eq!(document["properties"]["home"]["type"], "object");
    assert!(document["properties"]["home"].get("items").is_none());
    assert!(document["properties"]["home"].get("title").is_none());
}

#[test]
fn test_only_single_name() {
    let schema = SchemaDefinition::new("Person")
        .field(Field::nested("addresses", NestedField::new(address()).only("city").many()));

    let document = SchemaConverter::new().dump(&schema).unwrap();

    assert_eq!(
        document["properties"]["addresses"]["items"]["properties"],
        json!({"city": {"title": "city", "type": "string"}})
    );
    assert_eq!(
        document["properties"]["addresses"]["items"]["required"],
        json!(["city"])
    );
}

#[test]
fn test_exclude_drops_required_entry() {
    let schema = SchemaDefinition::new("Person")
        .field(Field::nested("home", NestedField::new(address()).exclude(["street"])));

    let document = SchemaConverter::new().dump(&schema).unwrap();

    assert_eq!(document["properties"]["home"]["required"], json!(["city"]));
}

#[test]
fn test_deeply_nested() {
    let team = SchemaDefinition::new("Team")
        .field(Field::string("title").required())
        .field(Field::nested("members", NestedField::new(user()).many()).required())
        .into_shared();
    let org =
        SchemaDefinition::new("Org").field(Field::nested("teams", NestedField::new(team).many()));

    let document = SchemaConverter::new().dump(&org).unwrap();

    let members = &document["properties"]["teams"]["items"]["properties"]["members"];
    assert_eq!(members["type"], json!(["array"]));
    assert_eq!(members["items"]["properties"]["email"]["type"], "string");
}

#[test]
fn test_named_reference_through_registry() {
    let registry = SchemaRegistry::new();
    registry
        .register(
            SchemaDefinition::new("Address")
                .in_module("app.schemas")
                .field(Field::string("city").required())
                .field(Field::string("zip")),
        )
        .unwrap();
    let converter = SchemaConverter::with_registry(registry);

    let schema = SchemaDefinition::new("Person")
        .field(Field::nested("home", "Address"))
        .field(Field::nested("work", NestedField::new("app.schemas.Address").only("zip")));

    let document = converter.dump(&schema).unwrap();

    assert_eq!(document["properties"]["home"]["required"], json!(["city"]));
    assert_eq!(
        document["properties"]["work"]["properties"],
        json!({"zip": {"title": "zip", "type": "string"}})
    );
}

#[test]
fn test_unresolved_reference_fails() {
    let converter = SchemaConverter::with_registry(SchemaRegistry::new());
    let schema = SchemaDefinition::new("Person")
        .field(Field::string("name"))
        .field(Field::nested("home", "Address"));

    let err = converter.dump(&schema).unwrap_err();

    assert_eq!(err.code(), "nested_reference_unresolved");
    assert_eq!(err.path(), &FieldPath::from_field("home"));
}

#[test]
fn test_error_inside_nested_propagates() {
    let inner = SchemaDefinition::new("Inner")
        .field(Field::of("colour", schemacast::FieldType::Other("Colour".to_string())))
        .into_shared();
    let schema = SchemaDefinition::new("Outer")
        .field(Field::nested("children", NestedField::new(inner).many()));

    let err = SchemaConverter::new().dump(&schema).unwrap_err();

    assert_eq!(
        err,
        ConvertError::UnsupportedFieldType {
            path: FieldPath::from_field("children").push_items().push_field("colour"),
            kind: "Colour".to_string(),
        }
    );
}

#[test]
fn test_unknown_only_name_fails() {
    let schema = SchemaDefinition::new("Person")
        .field(Field::nested("home", NestedField::new(address()).only("country")));

    let err = SchemaConverter::new().dump(&schema).unwrap_err();

    assert_eq!(
        err,
        ConvertError::UnknownField {
            path: FieldPath::from_field("home"),
            schema: "Address".to_string(),
            field: "country".to_string(),
        }
    );
}

#[test]
fn test_self_reference_is_rejected() {
    let registry = SchemaRegistry::new();
    registry
        .register(
            SchemaDefinition::new("Node")
                .field(Field::string("label"))
                .field(Field::nested("children", NestedField::new("Node").many())),
        )
        .unwrap();

    let err = SchemaConverter::with_registry(registry).dump_named("Node").unwrap_err();

    assert_eq!(
        err,
        ConvertError::CyclicReference {
            path: FieldPath::from_field("children"),
            chain: vec!["Node".to_string(), "Node".to_string()],
        }
    );
}

#[test]
fn test_indirect_cycle_is_rejected() {
    let registry = SchemaRegistry::new();
    registry
        .register(
            SchemaDefinition::new("Author")
                .field(Field::nested("books", NestedField::new("Book").many())),
        )
        .unwrap();
    registry
        .register(SchemaDefinition::new("Book").field(Field::nested("author", "Author")))
        .unwrap();

    let err = SchemaConverter::with_registry(registry).dump_named("Author").unwrap_err();

    assert_eq!(err.code(), "cyclic_reference");
    assert_eq!(err.path().to_string(), "books[].author");
}

#[test]
fn test_same_schema_twice_is_not_a_cycle() {
    let schema = SchemaDefinition::new("Shipment")
        .field(Field::nested("from", address()))
        .field(Field::nested("to", address()));

    assert!(SchemaConverter::new().dump(&schema).is_ok());
}

#[test]
fn test_distinct_schemas_sharing_a_name_are_not_a_cycle() {
    let part = SchemaDefinition::new("Item").field(Field::string("sku").required());
    let item = SchemaDefinition::new("Item")
        .field(Field::string("label"))
        .field(Field::nested("parts", NestedField::new(part).many()));

    let document = SchemaConverter::new().dump(&item).unwrap();

    let parts = &document["properties"]["parts"];
    assert_eq!(parts["type"], json!(["array", "null"]));
    assert_eq!(parts["items"]["required"], json!(["sku"]));
}
