use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::error::{Result, SchemaError};
use crate::feature::FeatureTypeDescriptor;
use crate::schema::constants::{
    app, gml, xmlns, xs, ABSTRACT_FEATURE, ABSTRACT_FEATURE_TYPE, APP_PREFIX, FEATURE_TYPE,
    GEOMETRY_ELEMENT, GML_NAMESPACE, GML_PREFIX, GML_SCHEMA_LOCATION, SCHEMA_VERSION,
    XS_NAMESPACE, XS_PREFIX,
};
use crate::schema::probe::GeometryProbeOrder;

/// Serializes a [`FeatureTypeDescriptor`] into a GML application schema.
///
/// The document has a fixed shape:
///
/// - `xs:schema` declaring the `gml`, `xs` and `app` prefixes
/// - one `xs:import` of the GML base schema
/// - the `Feature-<identifier>` element in the `gml:_Feature` substitution group
/// - the `FeatureType` complex type extending `gml:AbstractFeatureType` with
///   `the_geom` followed by one optional element per attribute field
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaWriter {
    probe: GeometryProbeOrder,
    indent: Option<usize>,
}

impl SchemaWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_probe_order(mut self, probe: GeometryProbeOrder) -> Self {
        self.probe = probe;
        self
    }

    /// Indent nested elements by `indent` spaces; `None` writes a single line.
    pub fn with_indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }

    pub fn probe_order(&self) -> GeometryProbeOrder {
        self.probe
    }

    /// Write the schema document of `descriptor` into `sink`.
    pub fn write<W: Write>(&self, descriptor: &FeatureTypeDescriptor, sink: W) -> Result<()> {
        let xml = match self.indent {
            Some(width) => Writer::new_with_indent(sink, b' ', width),
            None => Writer::new(sink),
        };
        let mut document = Document {
            xml,
            descriptor,
            probe: self.probe,
        };
        document.write_schema()?;
        document.xml.into_inner().flush().map_err(SchemaError::encoding)
    }

    pub fn to_bytes(&self, descriptor: &FeatureTypeDescriptor) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(descriptor, &mut buffer)?;
        Ok(buffer)
    }

    pub fn to_string(&self, descriptor: &FeatureTypeDescriptor) -> Result<String> {
        String::from_utf8(self.to_bytes(descriptor)?).map_err(SchemaError::encoding)
    }
}

struct Document<'a, W: Write> {
    xml: Writer<W>,
    descriptor: &'a FeatureTypeDescriptor,
    probe: GeometryProbeOrder,
}

impl<W: Write> Document<'_, W> {
    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.xml.write_event(event).map_err(SchemaError::encoding)
    }

    fn element<F>(&mut self, name: &str, attributes: &[(&str, &str)], body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.event(Event::Start(start))?;
        body(self)?;
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.event(Event::Empty(element))
    }

    fn write_schema(&mut self) -> Result<()> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let descriptor = self.descriptor;
        let namespace = descriptor.namespace();
        let attributes = [
            (xmlns(GML_PREFIX), GML_NAMESPACE),
            (xmlns(XS_PREFIX), XS_NAMESPACE),
            (xmlns(APP_PREFIX), namespace),
            ("targetNamespace".to_string(), namespace),
            ("elementFormDefault".to_string(), "qualified"),
            ("version".to_string(), SCHEMA_VERSION),
        ];
        let attributes: Vec<(&str, &str)> = attributes
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();

        self.element(&xs("schema"), &attributes, |doc| {
            doc.write_import()?;
            doc.write_feature_element()?;
            doc.write_complex_type()
        })
    }

    fn write_import(&mut self) -> Result<()> {
        self.empty(
            &xs("import"),
            &[
                ("namespace", GML_NAMESPACE),
                ("schemaLocation", GML_SCHEMA_LOCATION),
            ],
        )
    }

    fn write_feature_element(&mut self) -> Result<()> {
        let name = self.descriptor.local_name();
        let feature_type = app(FEATURE_TYPE);
        let substitution_group = gml(ABSTRACT_FEATURE);
        self.empty(
            &xs("element"),
            &[
                ("name", name.as_str()),
                ("type", feature_type.as_str()),
                ("substitutionGroup", substitution_group.as_str()),
            ],
        )
    }

    fn write_complex_type(&mut self) -> Result<()> {
        let base = gml(ABSTRACT_FEATURE_TYPE);
        self.element(&xs("complexType"), &[("name", FEATURE_TYPE)], |doc| {
            doc.element(&xs("complexContent"), &[], |doc| {
                doc.element(
                    &xs("extension"),
                    &[("base", base.as_str())],
                    |doc| doc.element(&xs("sequence"), &[], Self::write_members),
                )
            })
        })
    }

    fn write_members(&mut self) -> Result<()> {
        let property_type = gml(self.probe.property_type_of(self.descriptor.geometry_kind()));
        self.empty(
            &xs("element"),
            &[("name", GEOMETRY_ELEMENT), ("type", property_type.as_str())],
        )?;

        let descriptor = self.descriptor;
        for field in descriptor.fields() {
            let base = xs(field.kind.xs_type());
            self.element(
                &xs("element"),
                &[
                    ("name", field.name.as_str()),
                    ("minOccurs", "0"),
                    ("maxOccurs", "1"),
                ],
                |doc| {
                    doc.element(&xs("simpleType"), &[], |doc| {
                        doc.empty(&xs("restriction"), &[("base", base.as_str())])
                    })
                },
            )?;
        }
        Ok(())
    }
}
