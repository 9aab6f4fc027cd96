use std::collections::BTreeMap;
use std::fmt;

use geo_types::Rect;
use serde::{Deserialize, Serialize};

use crate::common::geometry::classify;

pub type Geometry = geo_types::Geometry<f64>;

/// Attribute name that never becomes a field and never feeds the geometry slot.
pub const LOCATION_ATTRIBUTE: &str = "location";

/// Semantic geometry kind of a feature type's single geometry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    /// Any geometry outside the five singular/multi pairs (collections, lines, rects, triangles).
    Generic,
}

impl GeometryKind {
    /// Runtime type name, as consulted by the schema writer's property-type table.
    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::Generic => "Geometry",
        }
    }

    pub fn is_multi(self) -> bool {
        matches!(
            self,
            GeometryKind::MultiPoint | GeometryKind::MultiLineString | GeometryKind::MultiPolygon
        )
    }

    /// Singular kinds map to their multi form; everything else is returned unchanged.
    pub fn promoted(self) -> GeometryKind {
        match self {
            GeometryKind::Point => GeometryKind::MultiPoint,
            GeometryKind::LineString => GeometryKind::MultiLineString,
            GeometryKind::Polygon => GeometryKind::MultiPolygon,
            other => other,
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scalar kinds representable as attribute fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    Text,
    Integer,
    Real,
}

impl ScalarKind {
    /// Built-in XML Schema type restricted by the field's simple type.
    pub fn xs_type(self) -> &'static str {
        match self {
            ScalarKind::Text => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Real => "double",
        }
    }

    /// Whether `value` carries the runtime tag of this kind.
    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ScalarKind::Text, Value::Text(_))
                | (ScalarKind::Integer, Value::Integer(_))
                | (ScalarKind::Real, Value::Real(_))
        )
    }
}

/// Declared type of an ingested property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Binding {
    Text,
    Integer,
    Real,
    Boolean,
    /// Bounding box / envelope values.
    Envelope,
    /// Any geometry subtype.
    Geometry,
    /// Untyped placeholder; the runtime value decides what it is.
    Opaque,
    /// A declared type this crate has no representation for.
    Other(String),
}

impl Binding {
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            Binding::Text => Some(ScalarKind::Text),
            Binding::Integer => Some(ScalarKind::Integer),
            Binding::Real => Some(ScalarKind::Real),
            _ => None,
        }
    }
}

/// Runtime value of an ingested property, tagged once at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Geometry(Geometry),
    Envelope(Rect<f64>),
    Other(String),
}

impl Value {
    pub fn as_geometry(&self) -> Option<&Geometry> {
        match self {
            Value::Geometry(geometry) => Some(geometry),
            _ => None,
        }
    }
}

/// One named attribute of an ingested record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub binding: Binding,
    #[serde(default)]
    pub value: Option<Value>,
}

impl Property {
    pub fn new(name: impl Into<String>, binding: Binding, value: Option<Value>) -> Self {
        Self {
            name: name.into(),
            binding,
            value,
        }
    }
}

/// Coordinate reference system identifier, e.g. `EPSG:4326`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Crs(String);

impl Crs {
    pub fn new(code: impl Into<String>) -> Self {
        Crs(code.into())
    }

    pub fn epsg(code: u32) -> Self {
        Crs(format!("EPSG:{code}"))
    }

    /// WGS84 geographic coordinates.
    pub fn wgs84() -> Self {
        Crs::epsg(4326)
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl Default for Crs {
    fn default() -> Self {
        Crs::wgs84()
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A record as handed over by a format parser, before any schema is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFeature {
    pub id: String,
    /// Default geometry of the record.
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub crs: Option<Crs>,
}

impl RawFeature {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            geometry: None,
            properties: Vec::new(),
            crs: None,
        }
    }

    pub fn with_geometry(mut self, geometry: impl Into<Geometry>) -> Self {
        self.geometry = Some(geometry.into());
        self
    }

    pub fn with_property(mut self, name: &str, binding: Binding, value: Option<Value>) -> Self {
        self.properties.push(Property::new(name, binding, value));
        self
    }

    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = Some(crs);
        self
    }

    /// First property carrying `name` (case-sensitive).
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// A scalar field of a synthesized feature type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeField {
    pub name: String,
    pub kind: ScalarKind,
}

impl AttributeField {
    pub fn new(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// The homogeneous structural type shared by every record of one collection.
///
/// Built once by the inference pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureTypeDescriptor {
    identifier: String,
    namespace: String,
    geometry_kind: GeometryKind,
    fields: Vec<AttributeField>,
    crs: Crs,
}

impl FeatureTypeDescriptor {
    pub(crate) fn new(
        identifier: String,
        namespace: String,
        geometry_kind: GeometryKind,
        fields: Vec<AttributeField>,
        crs: Crs,
    ) -> Self {
        Self {
            identifier,
            namespace,
            geometry_kind,
            fields,
            crs,
        }
    }

    /// Identifier minted for this type; also names the stored schema document.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// `Feature-<identifier>`.
    pub fn local_name(&self) -> String {
        format!("Feature-{}", self.identifier)
    }

    pub fn geometry_kind(&self) -> GeometryKind {
        self.geometry_kind
    }

    pub fn fields(&self) -> &[AttributeField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&AttributeField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }
}

/// A record re-projected onto a [`FeatureTypeDescriptor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub id: String,
    pub geometry: Geometry,
    pub attributes: BTreeMap<String, Value>,
}

impl FeatureRecord {
    pub fn geometry_kind(&self) -> GeometryKind {
        classify(&self.geometry)
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

/// Normalized records that all conform to one descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollection {
    descriptor: FeatureTypeDescriptor,
    records: Vec<FeatureRecord>,
}

impl FeatureCollection {
    pub(crate) fn new(descriptor: FeatureTypeDescriptor, records: Vec<FeatureRecord>) -> Self {
        Self {
            descriptor,
            records,
        }
    }

    pub fn descriptor(&self) -> &FeatureTypeDescriptor {
        &self.descriptor
    }

    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureRecord> {
        self.records.iter()
    }

    pub fn into_parts(self) -> (FeatureTypeDescriptor, Vec<FeatureRecord>) {
        (self.descriptor, self.records)
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a FeatureRecord;
    type IntoIter = std::slice::Iter<'a, FeatureRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
