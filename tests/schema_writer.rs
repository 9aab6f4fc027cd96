use std::io;

use featureschema::error::SchemaError;
use featureschema::feature::{Binding, FeatureTypeDescriptor, Geometry, RawFeature, Value};
use featureschema::schema::{GeometryProbeOrder, SchemaWriter, GENERIC_PROPERTY_TYPE};
use featureschema::synthesizer::{FeatureTypeSynthesizer, SynthesizerConfig};
use geo_types::{line_string, point, polygon, GeometryCollection, MultiPoint};
use insta::assert_snapshot;
use quick_xml::events::Event;
use quick_xml::Reader;
use rstest::rstest;

fn descriptor_for(sample: RawFeature, identifier: &str) -> FeatureTypeDescriptor {
    FeatureTypeSynthesizer::default()
        .infer_with_identifier(&sample, identifier)
        .unwrap()
}

fn points() -> FeatureTypeDescriptor {
    descriptor_for(
        RawFeature::new("a")
            .with_geometry(point!(x: 7.6, y: 51.9))
            .with_property("name", Binding::Text, Some(Value::Text("a".into())))
            .with_property("age", Binding::Integer, Some(Value::Integer(10)))
            .with_property("visited", Binding::Boolean, Some(Value::Boolean(true))),
        "points",
    )
}

/// `(element name, name attribute, type attribute)` for every start or empty tag.
fn outline(xml: &str) -> Vec<(String, Option<String>, Option<String>)> {
    let mut reader = Reader::from_str(xml);
    let mut tags = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(tag) | Event::Empty(tag) => {
                let attribute = |key: &[u8]| {
                    tag.try_get_attribute(key)
                        .unwrap()
                        .map(|a| a.unescape_value().unwrap().into_owned())
                };
                tags.push((
                    String::from_utf8(tag.name().as_ref().to_vec()).unwrap(),
                    attribute(b"name"),
                    attribute(b"type"),
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    tags
}

fn geometry_property_type(xml: &str) -> String {
    outline(xml)
        .into_iter()
        .find(|(_, name, _)| name.as_deref() == Some("the_geom"))
        .and_then(|(_, _, ty)| ty)
        .unwrap()
}

#[test]
fn writes_compact_point_schema() {
    let xml = SchemaWriter::new().to_string(&points()).unwrap();
    assert_snapshot!("points_schema", xml);
}

#[test]
fn document_structure_follows_the_descriptor() {
    let descriptor = points();
    let xml = SchemaWriter::new().to_string(&descriptor).unwrap();
    let tags = outline(&xml);

    let names: Vec<&str> = tags.iter().map(|(tag, _, _)| tag.as_str()).collect();
    assert_eq!(
        names,
        [
            "xs:schema",
            "xs:import",
            "xs:element",
            "xs:complexType",
            "xs:complexContent",
            "xs:extension",
            "xs:sequence",
            "xs:element",
            "xs:element",
            "xs:simpleType",
            "xs:restriction",
            "xs:element",
            "xs:simpleType",
            "xs:restriction",
        ]
    );

    let element_names: Vec<Option<&str>> = tags
        .iter()
        .filter(|(tag, _, _)| tag == "xs:element")
        .map(|(_, name, _)| name.as_deref())
        .collect();
    assert_eq!(
        element_names,
        [Some("Feature-points"), Some("the_geom"), Some("name"), Some("age")]
    );
    assert!(xml.contains(&format!(r#"targetNamespace="{}""#, descriptor.namespace())));
    assert!(xml.contains(&format!(r#"xmlns:app="{}""#, descriptor.namespace())));
    assert!(!xml.contains("visited"));
}

#[rstest]
#[case(GeometryProbeOrder::SingularFirst, point!(x: 0.0, y: 0.0).into(), "gml:PointPropertyType")]
#[case(GeometryProbeOrder::MultiFirst, point!(x: 0.0, y: 0.0).into(), "gml:MultiPointPropertyType")]
#[case(
    GeometryProbeOrder::SingularFirst,
    line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)].into(),
    "gml:CurvePropertyType"
)]
#[case(
    GeometryProbeOrder::MultiFirst,
    line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)].into(),
    "gml:MultiCurvePropertyType"
)]
#[case(
    GeometryProbeOrder::SingularFirst,
    polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)].into(),
    "gml:SurfacePropertyType"
)]
#[case(
    GeometryProbeOrder::MultiFirst,
    polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)].into(),
    "gml:MultiSurfacePropertyType"
)]
fn geometry_property_type_depends_on_probe_order(
    #[case] order: GeometryProbeOrder,
    #[case] geometry: Geometry,
    #[case] expected: &str,
) {
    let descriptor = descriptor_for(RawFeature::new("g").with_geometry(geometry), "probe");
    assert!(descriptor.geometry_kind().is_multi());

    let xml = SchemaWriter::new()
        .with_probe_order(order)
        .to_string(&descriptor)
        .unwrap();
    assert_eq!(geometry_property_type(&xml), expected);
}

#[test]
fn unnamed_geometries_use_the_generic_property_type() {
    let collection = GeometryCollection(vec![
        Geometry::Point(point!(x: 0.0, y: 0.0)),
        Geometry::MultiPoint(MultiPoint(vec![point!(x: 1.0, y: 1.0)])),
    ]);
    let descriptor = descriptor_for(
        RawFeature::new("c").with_geometry(Geometry::GeometryCollection(collection)),
        "mixed",
    );

    for order in [GeometryProbeOrder::SingularFirst, GeometryProbeOrder::MultiFirst] {
        let xml = SchemaWriter::new()
            .with_probe_order(order)
            .to_string(&descriptor)
            .unwrap();
        assert_eq!(
            geometry_property_type(&xml),
            format!("gml:{GENERIC_PROPERTY_TYPE}")
        );
    }
}

#[test]
fn field_types_restrict_builtin_types() {
    let descriptor = descriptor_for(
        RawFeature::new("a")
            .with_geometry(point!(x: 0.0, y: 0.0))
            .with_property("label", Binding::Text, Some(Value::Text("x".into())))
            .with_property("count", Binding::Integer, Some(Value::Integer(1)))
            .with_property("height", Binding::Real, Some(Value::Real(2.5))),
        "typed",
    );
    let xml = SchemaWriter::new().to_string(&descriptor).unwrap();

    let bases: Vec<String> = xml
        .match_indices(r#"<xs:restriction base=""#)
        .map(|(start, pattern)| {
            let rest = &xml[start + pattern.len()..];
            rest[..rest.find('"').unwrap()].to_string()
        })
        .collect();
    assert_eq!(bases, ["xs:string", "xs:integer", "xs:double"]);
    assert_eq!(xml.matches(r#"minOccurs="0" maxOccurs="1""#).count(), 3);
}

#[test]
fn indented_output_is_equivalent() {
    let descriptor = points();
    let compact = SchemaWriter::new().to_string(&descriptor).unwrap();
    let pretty = SchemaWriter::new()
        .with_indent(Some(2))
        .to_string(&descriptor)
        .unwrap();

    assert!(pretty.lines().count() > 1);
    assert_eq!(outline(&pretty), outline(&compact));
}

#[test]
fn synthesizer_settings_reach_the_writer() {
    let synthesizer = FeatureTypeSynthesizer::new(
        SynthesizerConfig::default()
            .with_geometry_probe(GeometryProbeOrder::MultiFirst)
            .with_pretty(true),
    )
    .unwrap();
    let writer = synthesizer.schema_writer();
    assert_eq!(writer.probe_order(), GeometryProbeOrder::MultiFirst);

    let xml = writer.to_string(&points()).unwrap();
    assert!(xml.lines().count() > 1);
    assert_eq!(geometry_property_type(&xml), "gml:MultiPointPropertyType");
}

struct FullDisk;

impl io::Write for FullDisk {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_failures_surface_as_encoding_errors() {
    let err = SchemaWriter::new().write(&points(), FullDisk).unwrap_err();
    assert!(matches!(err, SchemaError::Encoding(_)), "{err:?}");
    assert!(err.to_string().starts_with("failed to encode schema document"));
}
