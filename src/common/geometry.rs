use geo_types::{MultiLineString, MultiPoint, MultiPolygon};

use crate::feature::{Geometry, GeometryKind};

/// Map a geometry's runtime shape onto a [`GeometryKind`].
///
/// Lines, rects, triangles and geometry collections have no named pair and
/// classify as [`GeometryKind::Generic`].
pub fn classify(geometry: &Geometry) -> GeometryKind {
    match geometry {
        Geometry::Point(_) => GeometryKind::Point,
        Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
        Geometry::LineString(_) => GeometryKind::LineString,
        Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
        Geometry::Polygon(_) => GeometryKind::Polygon,
        Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
        _ => GeometryKind::Generic,
    }
}

/// Kind used for a feature type's geometry field: singular shapes are
/// promoted to their multi form, anything else is kept as classified.
pub fn promote(geometry: &Geometry) -> GeometryKind {
    classify(geometry).promoted()
}

/// Normalize `geometry` so that it matches `target`.
///
/// A singular geometry is wrapped into a one-element multi geometry when the
/// target is its multi form. A geometry already of the target kind, or any
/// geometry when the target is [`GeometryKind::Generic`], passes through
/// unchanged. Returns `None` when the geometry cannot be brought to `target`.
pub fn homogenize(geometry: Geometry, target: GeometryKind) -> Option<Geometry> {
    if target == GeometryKind::Generic {
        return Some(geometry);
    }
    let kind = classify(&geometry);
    if kind == target {
        return Some(geometry);
    }
    if kind.promoted() != target {
        return None;
    }
    match geometry {
        Geometry::Point(point) => Some(Geometry::MultiPoint(MultiPoint(vec![point]))),
        Geometry::LineString(line) => {
            Some(Geometry::MultiLineString(MultiLineString(vec![line])))
        }
        Geometry::Polygon(polygon) => Some(Geometry::MultiPolygon(MultiPolygon(vec![polygon]))),
        _ => None,
    }
}

/// A geometry is empty when it carries no coordinates at all.
///
/// Collections are empty when every member is empty.
pub fn is_empty(geometry: &Geometry) -> bool {
    match geometry {
        Geometry::LineString(line) => line.0.is_empty(),
        Geometry::Polygon(polygon) => polygon.exterior().0.is_empty(),
        Geometry::MultiPoint(points) => points.0.is_empty(),
        Geometry::MultiLineString(lines) => lines.0.iter().all(|line| line.0.is_empty()),
        Geometry::MultiPolygon(polygons) => polygons
            .0
            .iter()
            .all(|polygon| polygon.exterior().0.is_empty()),
        Geometry::GeometryCollection(collection) => collection.0.iter().all(is_empty),
        // points, lines, rects and triangles always carry coordinates
        _ => false,
    }
}

/// A geometry that is present and not empty.
pub fn usable(geometry: Option<&Geometry>) -> Option<&Geometry> {
    geometry.filter(|g| !is_empty(g))
}
