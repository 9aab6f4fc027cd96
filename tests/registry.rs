use std::sync::Arc;
use std::thread;

use featureschema::error::SchemaError;
use featureschema::registry::{EncoderSchemaBinding, SchemaRegistry};
use featureschema::schema::constants::{GML_NAMESPACE, GML_SCHEMA_LOCATION};
use featureschema::schema::locate::schema_location_pairs;
use featureschema::schema::{discover_schema_reference, register_discovered, SchemaReference};
use rstest::rstest;

#[test]
fn lookup_returns_the_registered_location() {
    let registry = SchemaRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.lookup("http://example.org/a"), None);

    assert_eq!(registry.register("http://example.org/a", "file:/tmp/a.xsd"), None);
    assert_eq!(
        registry.lookup("http://example.org/a").as_deref(),
        Some("file:/tmp/a.xsd")
    );
    assert!(registry.contains("http://example.org/a"));
    assert!(!registry.contains("http://example.org/b"));
}

#[test]
fn registering_again_replaces_the_location() {
    let registry = SchemaRegistry::new();
    registry.register("ns", "first");
    let previous = registry.register("ns", "second");

    assert_eq!(previous.as_deref(), Some("first"));
    assert_eq!(registry.lookup("ns").as_deref(), Some("second"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn entries_are_sorted_by_namespace() {
    let registry = SchemaRegistry::new();
    registry.register("urn:c", "3");
    registry.register("urn:a", "1");
    registry.register("urn:b", "2");

    assert_eq!(
        registry.entries(),
        [
            ("urn:a".to_string(), "1".to_string()),
            ("urn:b".to_string(), "2".to_string()),
            ("urn:c".to_string(), "3".to_string()),
        ]
    );
}

#[test]
fn concurrent_writers_and_readers() {
    let registry = Arc::new(SchemaRegistry::new());

    let writers: Vec<_> = (0..8)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..100 {
                    registry.register(format!("urn:{t}:{i}"), format!("mem:{t}-{i}"));
                    // a reader sees what this thread just wrote
                    assert_eq!(
                        registry.lookup(&format!("urn:{t}:{i}")),
                        Some(format!("mem:{t}-{i}"))
                    );
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    assert_eq!(registry.len(), 800);
    assert_eq!(registry.lookup("urn:7:99").as_deref(), Some("mem:7-99"));
}

#[test]
fn encoder_binding_prefers_the_application_schema() {
    let registry = SchemaRegistry::new();
    registry.register("urn:app", "http://host/schemas/app.xsd");

    let binding = registry.encoder_binding(Some("urn:app"));
    assert!(binding.application_schema);
    assert_eq!(binding.location, "http://host/schemas/app.xsd");
    assert_eq!(
        binding.schema_location_hint(),
        format!("{GML_NAMESPACE} {GML_SCHEMA_LOCATION} urn:app http://host/schemas/app.xsd")
    );
}

#[rstest]
#[case(None)]
#[case(Some("urn:unknown"))]
fn encoder_binding_falls_back_to_gml(#[case] namespace: Option<&str>) {
    let registry = SchemaRegistry::new();
    registry.register("urn:app", "mem:app");

    let binding = registry.encoder_binding(namespace);
    assert_eq!(binding, EncoderSchemaBinding::gml());
    assert!(!binding.application_schema);
    assert_eq!(
        binding.schema_location_hint(),
        format!("{GML_NAMESPACE} {GML_SCHEMA_LOCATION}")
    );
}

#[test]
fn schema_location_values_split_into_pairs() {
    assert_eq!(
        schema_location_pairs("  urn:a  a.xsd\n urn:b b.xsd dangling "),
        [
            SchemaReference::new("urn:a", "a.xsd"),
            SchemaReference::new("urn:b", "b.xsd"),
        ]
    );
    assert!(schema_location_pairs("").is_empty());
}

const APP_COLLECTION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<wfs:FeatureCollection
    xmlns:wfs="http://www.opengis.net/wfs"
    xmlns:gml="http://www.opengis.net/gml"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xsi:schemaLocation="http://www.opengis.net/wfs http://schemas.opengis.net/wfs/1.1.0/wfs.xsd http://www.opengis.net/gml http://schemas.opengis.net/gml/3.1.1/base/gml.xsd http://www.example.org/feature-types/roads http://localhost:8080/schemas/roads.xsd">
  <gml:featureMember/>
</wfs:FeatureCollection>"#;

#[test]
fn discovers_the_application_schema_of_a_document() {
    let reference = discover_schema_reference(APP_COLLECTION).unwrap().unwrap();
    assert_eq!(
        reference,
        SchemaReference::new(
            "http://www.example.org/feature-types/roads",
            "http://localhost:8080/schemas/roads.xsd"
        )
    );
    assert!(!reference.is_gml_core());

    let registry = SchemaRegistry::new();
    assert!(register_discovered(&registry, &reference));
    assert_eq!(
        registry.lookup(&reference.namespace).as_deref(),
        Some("http://localhost:8080/schemas/roads.xsd")
    );
}

#[test]
fn core_gml_references_are_found_but_not_registered() {
    let xml = r#"<gml:FeatureCollection xmlns:gml="http://www.opengis.net/gml/3.2"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xsi:schemaLocation="http://www.opengis.net/gml/3.2 http://schemas.opengis.net/gml/3.2.1/gml.xsd"/>"#;

    let reference = discover_schema_reference(xml).unwrap().unwrap();
    assert!(reference.is_gml_core());

    let registry = SchemaRegistry::new();
    assert!(!register_discovered(&registry, &reference));
    assert!(registry.is_empty());
}

#[rstest]
#[case::no_hint(r#"<root xmlns="urn:x"><child/></root>"#)]
#[case::only_wfs(
    r#"<root xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://www.opengis.net/wfs wfs.xsd"/>"#
)]
#[case::nested_hint(
    r#"<root><child xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="urn:a a.xsd"/></root>"#
)]
#[case::empty_input("")]
fn documents_without_a_root_hint_have_no_reference(#[case] xml: &str) {
    assert_eq!(discover_schema_reference(xml).unwrap(), None);
}

#[test]
fn broken_documents_are_malformed() {
    let err = discover_schema_reference(r#"<root xsi:schemaLocation="urn:a a.xsd></root>"#)
        .unwrap_err();
    assert!(matches!(err, SchemaError::MalformedDocument(_)), "{err:?}");
}
