//! Tests for schema registry operations.

use schemacast::{
    ConvertError, Field, NestedField, RegistryError, SchemaConverter, SchemaDefinition,
    SchemaRegistry,
};
use serde_json::json;

#[test]
fn test_register_and_get() {
    let registry = SchemaRegistry::new();

    registry
        .register(SchemaDefinition::new("Email").field(Field::email("address")))
        .unwrap();

    assert!(registry.get("Email").is_some());
    assert!(registry.get("Missing").is_none());
}

#[test]
fn test_duplicate_registration_fails() {
    let registry = SchemaRegistry::new();

    registry.register(SchemaDefinition::new("User")).unwrap();

    let result = registry.register(SchemaDefinition::new("User"));
    assert_eq!(result.unwrap_err(), RegistryError::DuplicateName("User".to_string()));
}

#[test]
fn test_same_simple_name_in_different_modules() {
    let registry = SchemaRegistry::new();

    registry
        .register(SchemaDefinition::new("Address").in_module("billing"))
        .unwrap();
    registry
        .register(SchemaDefinition::new("Address").in_module("shipping"))
        .unwrap();

    assert!(matches!(
        registry.resolve("Address"),
        Err(RegistryError::Ambiguous { .. })
    ));
    assert_eq!(
        registry.resolve("billing.Address").unwrap().module(),
        Some("billing")
    );
}

#[test]
fn test_qualified_miss() {
    let registry = SchemaRegistry::new();
    registry
        .register(SchemaDefinition::new("Address").in_module("billing"))
        .unwrap();

    assert_eq!(
        registry.resolve("shipping.Address").unwrap_err(),
        RegistryError::SchemaNotFound("shipping.Address".to_string())
    );
}

#[test]
fn test_validate_refs() {
    let registry = SchemaRegistry::new();

    let inline = SchemaDefinition::new("Inline")
        .field(Field::nested("owner", "Owner"))
        .into_shared();
    registry
        .register(
            SchemaDefinition::new("User")
                .field(Field::nested("address", "Address"))
                .field(Field::nested("group", "Group"))
                .field(Field::nested("inline", inline)),
        )
        .unwrap();
    registry.register(SchemaDefinition::new("Group")).unwrap();

    assert_eq!(registry.validate_refs(), vec!["Address", "Owner"]);

    registry.register(SchemaDefinition::new("Address")).unwrap();
    registry.register(SchemaDefinition::new("Owner")).unwrap();
    assert!(registry.validate_refs().is_empty());
}

#[test]
fn test_dump_named() {
    let registry = SchemaRegistry::new();
    registry
        .register(SchemaDefinition::new("User").field(Field::string("name").required()))
        .unwrap();
    let converter = SchemaConverter::with_registry(registry);

    let document = converter.dump_named("User").unwrap();
    assert_eq!(document["required"], json!(["name"]));

    let err = converter.dump_named("Missing").unwrap_err();
    assert!(matches!(
        err,
        ConvertError::NestedReferenceUnresolved { ref name, .. } if name == "Missing"
    ));
    assert!(err.path().is_root());
}

#[test]
fn test_dump_named_without_registry() {
    let err = SchemaConverter::new().dump_named("User").unwrap_err();
    assert_eq!(err.code(), "nested_reference_unresolved");
}

#[test]
fn test_registration_after_converter_creation() {
    let registry = SchemaRegistry::new();
    let converter = SchemaConverter::with_registry(registry.clone());

    let schema = SchemaDefinition::new("Person")
        .field(Field::nested("addresses", NestedField::new("Address").many()));
    assert!(converter.dump(&schema).is_err());

    registry
        .register(SchemaDefinition::new("Address").field(Field::string("city")))
        .unwrap();
    let document = converter.dump(&schema).unwrap();
    assert_eq!(
        document["properties"]["addresses"]["items"]["properties"]["city"]["type"],
        "string"
    );
}

#[test]
fn test_ambiguous_reference_surfaces_as_source() {
    use std::error::Error;

    let registry = SchemaRegistry::new();
    registry
        .register(SchemaDefinition::new("Address").in_module("billing"))
        .unwrap();
    registry
        .register(SchemaDefinition::new("Address").in_module("shipping"))
        .unwrap();

    let schema = SchemaDefinition::new("Order").field(Field::nested("to", "Address"));
    let err = SchemaConverter::with_registry(registry).dump(&schema).unwrap_err();

    let source = err.source().unwrap().to_string();
    assert_eq!(
        source,
        "schema name 'Address' is ambiguous, use one of: billing.Address, shipping.Address"
    );
}
