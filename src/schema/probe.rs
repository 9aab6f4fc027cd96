use serde::{Deserialize, Serialize};

use crate::feature::GeometryKind;

/// Property type used when no probe matches the geometry type name.
pub const GENERIC_PROPERTY_TYPE: &str = "GeometryPropertyType";

/// Order in which geometry type names are probed for the `the_geom` property type.
///
/// Probing is a substring test, and every multi type name contains its
/// singular name. With [`SingularFirst`](Self::SingularFirst) a multi kind
/// therefore resolves to the singular property type (`MultiPoint` becomes
/// `PointPropertyType`); this is the historical output that existing encoders
/// were fed. [`MultiFirst`](Self::MultiFirst) tests multi names first and maps
/// every kind to its own property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeometryProbeOrder {
    #[default]
    SingularFirst,
    MultiFirst,
}

const SINGULAR_FIRST: [(&str, &str); 6] = [
    ("Point", "PointPropertyType"),
    ("MultiPoint", "MultiPointPropertyType"),
    ("LineString", "CurvePropertyType"),
    ("MultiLineString", "MultiCurvePropertyType"),
    ("Polygon", "SurfacePropertyType"),
    ("MultiPolygon", "MultiSurfacePropertyType"),
];

const MULTI_FIRST: [(&str, &str); 6] = [
    ("MultiPoint", "MultiPointPropertyType"),
    ("Point", "PointPropertyType"),
    ("MultiLineString", "MultiCurvePropertyType"),
    ("LineString", "CurvePropertyType"),
    ("MultiPolygon", "MultiSurfacePropertyType"),
    ("Polygon", "SurfacePropertyType"),
];

impl GeometryProbeOrder {
    /// `(type name substring, property type)` pairs in probing order.
    pub fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            GeometryProbeOrder::SingularFirst => &SINGULAR_FIRST,
            GeometryProbeOrder::MultiFirst => &MULTI_FIRST,
        }
    }

    /// Property type of the first probe contained in `type_name`.
    pub fn property_type(self, type_name: &str) -> &'static str {
        self.table()
            .iter()
            .find(|(probe, _)| type_name.contains(probe))
            .map(|(_, property_type)| *property_type)
            .unwrap_or(GENERIC_PROPERTY_TYPE)
    }

    pub fn property_type_of(self, kind: GeometryKind) -> &'static str {
        self.property_type(kind.name())
    }
}
