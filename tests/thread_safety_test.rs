//! Tests for concurrent conversions sharing one converter and registry.

use schemacast::{Field, NestedField, SchemaConverter, SchemaDefinition, SchemaRegistry};
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn registry() -> SchemaRegistry {
    let registry = SchemaRegistry::new();
    registry
        .register(
            SchemaDefinition::new("Address")
                .field(Field::string("city").required())
                .field(Field::string("zip")),
        )
        .unwrap();
    registry
        .register(
            SchemaDefinition::new("User")
                .field(Field::string("name").required())
                .field(Field::nested("addresses", NestedField::new("Address").many())),
        )
        .unwrap();
    registry
}

#[test]
fn test_concurrent_conversions() {
    let converter = Arc::new(SchemaConverter::with_registry(registry()));
    let expected = converter.dump_named("User").unwrap();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let converter = Arc::clone(&converter);
            thread::spawn(move || converter.dump_named("User").unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_concurrent_registration_and_lookup() {
    let registry = Arc::new(SchemaRegistry::new());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry
                    .register(SchemaDefinition::new(format!("Schema{}", i)))
                    .unwrap();
                assert!(registry.get(&format!("Schema{}", i)).is_some());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(registry.len(), 10);
}

#[test]
fn test_dump_many_preserves_order() {
    let schemas: Vec<_> = (0..20)
        .map(|i| {
            SchemaDefinition::new(format!("Schema{}", i))
                .field(Field::integer(format!("field{}", i)).default(json!(i)))
                .into_shared()
        })
        .collect();

    let results = SchemaConverter::new().dump_many(&schemas);

    assert_eq!(results.len(), 20);
    for (i, result) in results.into_iter().enumerate() {
        let document = result.unwrap();
        assert_eq!(document["properties"][format!("field{}", i)]["default"], i);
    }
}

#[test]
fn test_dump_many_isolates_failures() {
    let good = SchemaDefinition::new("Good").field(Field::string("name")).into_shared();
    let bad = SchemaDefinition::new("Bad")
        .field(Field::nested("missing", "Missing"))
        .into_shared();

    let results = SchemaConverter::new().dump_many(&[Arc::clone(&good), bad, good]);

    assert!(results[0].is_ok());
    assert_eq!(results[1].as_ref().unwrap_err().code(), "nested_reference_unresolved");
    assert!(results[2].is_ok());
}
