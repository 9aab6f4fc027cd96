use tracing::{debug, warn};

use crate::common::geometry::{homogenize, promote, usable};
use crate::common::names::{compose_namespace, validate_identifier};
use crate::error::{Result, SchemaError};
use crate::feature::{Crs, FeatureTypeDescriptor, Geometry, RawFeature};
use crate::synthesizer::projector::project_attributes;
use crate::synthesizer::state::SynthesizerConfig;

/// Build the feature type of a collection from its sample record.
///
/// Fails with [`SchemaError::InvalidGeometry`] when the sample has no usable
/// geometry, or when the kind claimed by a geometry property cannot hold the
/// sample's own geometry. When no property claims the geometry slot, the slot
/// takes the promoted kind of the sample's own geometry.
pub fn infer_feature_type(
    sample: &RawFeature,
    identifier: &str,
    config: &SynthesizerConfig,
) -> Result<FeatureTypeDescriptor> {
    validate_identifier(identifier)?;
    let geometry = usable(sample.geometry.as_ref())
        .ok_or_else(|| SchemaError::invalid_geometry(&sample.id))?;

    let projection = project_attributes(&sample.properties, geometry);
    let geometry_kind = match projection.geometry_kind {
        Some(kind) => kind,
        None => {
            debug!(sample = %sample.id, "no geometry property, using the default geometry");
            promote(geometry)
        }
    };
    if homogenize(geometry.clone(), geometry_kind).is_none() {
        warn!(
            sample = %sample.id,
            kind = %geometry_kind,
            property = projection.geometry_property.as_deref().unwrap_or_default(),
            "geometry property does not fit the sample's own geometry"
        );
        return Err(SchemaError::invalid_geometry(&sample.id));
    }

    Ok(FeatureTypeDescriptor::new(
        identifier.to_string(),
        compose_namespace(&config.namespace_uri, identifier),
        geometry_kind,
        projection.fields,
        sample.crs.clone().unwrap_or_else(|| config.default_crs.clone()),
    ))
}

/// Build an attribute-less feature type around a bare geometry.
pub fn infer_geometry_only(
    geometry: &Geometry,
    crs: Option<Crs>,
    identifier: &str,
    config: &SynthesizerConfig,
) -> Result<FeatureTypeDescriptor> {
    validate_identifier(identifier)?;
    let geometry =
        usable(Some(geometry)).ok_or_else(|| SchemaError::invalid_geometry(identifier))?;

    Ok(FeatureTypeDescriptor::new(
        identifier.to_string(),
        compose_namespace(&config.namespace_uri, identifier),
        promote(geometry),
        Vec::new(),
        crs.unwrap_or_else(|| config.default_crs.clone()),
    ))
}
