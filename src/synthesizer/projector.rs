use tracing::{debug, trace, warn};

use crate::common::geometry::promote;
use crate::common::names::is_ncname;
use crate::feature::{
    AttributeField, Binding, Geometry, GeometryKind, Property, ScalarKind, LOCATION_ATTRIBUTE,
};

/// Why a property contributes nothing to the feature type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The sample carries no value for it.
    Absent,
    /// Bounding boxes are never fields.
    Envelope,
    /// The reserved `location` attribute.
    Location,
}

/// What one property of the sample record becomes in the feature type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyRole {
    Skipped(SkipReason),
    /// Folded into the geometry slot with the given (promoted) kind.
    Geometry(GeometryKind),
    Field(ScalarKind),
    /// Declared type has no scalar representation; left on the raw record only.
    Dropped,
}

/// Decide the role of a single property.
///
/// `default_geometry` is the sample record's own geometry; a property declared
/// as geometry takes its kind from it, while an opaque property holding a
/// geometry value takes the kind of that value.
pub fn property_role(property: &Property, default_geometry: &Geometry) -> PropertyRole {
    let Some(value) = &property.value else {
        return PropertyRole::Skipped(SkipReason::Absent);
    };
    let is_location = property.name == LOCATION_ATTRIBUTE;

    match &property.binding {
        Binding::Envelope => PropertyRole::Skipped(SkipReason::Envelope),
        Binding::Geometry if !is_location => PropertyRole::Geometry(promote(default_geometry)),
        Binding::Opaque if !is_location => match value.as_geometry() {
            Some(geometry) => PropertyRole::Geometry(promote(geometry)),
            None => {
                trace!(property = %property.name, "opaque property does not hold a geometry");
                PropertyRole::Dropped
            }
        },
        _ if is_location => PropertyRole::Skipped(SkipReason::Location),
        binding => match binding.scalar_kind() {
            Some(kind) => PropertyRole::Field(kind),
            None => PropertyRole::Dropped,
        },
    }
}

/// Fields and geometry slot derived from one sample record.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeProjection {
    /// Scalar fields in encounter order.
    pub fields: Vec<AttributeField>,
    /// Kind of the geometry slot, if some property was folded into it.
    pub geometry_kind: Option<GeometryKind>,
    /// Name of the property that was folded into the geometry slot.
    pub geometry_property: Option<String>,
}

/// Run the attribute projector over the sample record's properties.
///
/// The first geometry-like property claims the geometry slot; later ones are
/// ignored. Repeated property names only yield one field.
pub fn project_attributes(properties: &[Property], default_geometry: &Geometry) -> AttributeProjection {
    let mut projection = AttributeProjection {
        fields: Vec::new(),
        geometry_kind: None,
        geometry_property: None,
    };

    for property in properties {
        match property_role(property, default_geometry) {
            PropertyRole::Skipped(reason) => {
                trace!(property = %property.name, ?reason, "skipping property");
            }
            PropertyRole::Geometry(kind) => {
                if projection.geometry_kind.is_none() {
                    projection.geometry_kind = Some(kind);
                    projection.geometry_property = Some(property.name.clone());
                } else {
                    debug!(property = %property.name, "geometry slot already taken");
                }
            }
            PropertyRole::Field(kind) => {
                if projection.fields.iter().any(|f| f.name == property.name) {
                    debug!(property = %property.name, "duplicate property name");
                    continue;
                }
                if !is_ncname(&property.name) {
                    warn!(property = %property.name, "field name is not a valid XML element name");
                }
                projection
                    .fields
                    .push(AttributeField::new(property.name.clone(), kind));
            }
            PropertyRole::Dropped => {
                debug!(
                    property = %property.name,
                    binding = ?property.binding,
                    "unsupported declared type, attribute not represented"
                );
            }
        }
    }

    projection
}
