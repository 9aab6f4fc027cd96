//! Fixed names of the GML application schema grammar.

pub const GML_NAMESPACE: &str = "http://www.opengis.net/gml";
pub const GML_PREFIX: &str = "gml";

pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
pub const XS_PREFIX: &str = "xs";

/// Prefix bound to a feature type's own namespace.
pub const APP_PREFIX: &str = "app";

pub const SCHEMA_VERSION: &str = "1.0";

/// Base feature schema imported by every generated document.
pub const GML_SCHEMA_LOCATION: &str = "http://schemas.opengis.net/gml/3.1.1/base/gml.xsd";

pub const GML32_NAMESPACE: &str = "http://www.opengis.net/gml/3.2";
pub const GML32_LOCATION_PREFIX: &str = "http://schemas.opengis.net/gml/3.2";
pub const WFS_NAMESPACE: &str = "http://www.opengis.net/wfs";

pub const FEATURE_TYPE: &str = "FeatureType";
pub const ABSTRACT_FEATURE: &str = "_Feature";
pub const ABSTRACT_FEATURE_TYPE: &str = "AbstractFeatureType";
pub const GEOMETRY_ELEMENT: &str = "the_geom";

pub fn gml(local: &str) -> String {
    format!("{GML_PREFIX}:{local}")
}

pub fn xs(local: &str) -> String {
    format!("{XS_PREFIX}:{local}")
}

pub fn app(local: &str) -> String {
    format!("{APP_PREFIX}:{local}")
}

pub fn xmlns(prefix: &str) -> String {
    format!("xmlns:{prefix}")
}
