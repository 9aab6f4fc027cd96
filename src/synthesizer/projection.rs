use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::common::geometry::{classify, homogenize, usable};
use crate::error::{Result, SchemaError};
use crate::feature::{FeatureRecord, FeatureTypeDescriptor, RawFeature};

/// Identifier given to the normalized record built from input position `index`.
pub fn record_id(index: usize) -> String {
    format!("ID{index}")
}

/// Re-project one raw record onto `descriptor`.
///
/// Field values are copied by case-sensitive name match; a value whose runtime
/// tag differs from the field's kind is left out. The record's own
/// geometry is homogenized to the descriptor's geometry kind. A null, empty or
/// incompatible geometry is an [`SchemaError::InvalidGeometry`].
pub fn project_record(
    index: usize,
    raw: &RawFeature,
    descriptor: &FeatureTypeDescriptor,
) -> Result<FeatureRecord> {
    let geometry =
        usable(raw.geometry.as_ref()).ok_or_else(|| SchemaError::invalid_geometry(&raw.id))?;

    let kind = classify(geometry);
    let geometry = homogenize(geometry.clone(), descriptor.geometry_kind()).ok_or_else(|| {
        warn!(
            record = %raw.id,
            %kind,
            expected = %descriptor.geometry_kind(),
            "record geometry does not fit the feature type"
        );
        SchemaError::invalid_geometry(&raw.id)
    })?;

    let mut attributes = BTreeMap::new();
    for field in descriptor.fields() {
        let value = raw
            .properties
            .iter()
            .filter(|p| p.name == field.name)
            .find_map(|p| p.value.clone());
        match value {
            Some(value) if field.kind.accepts(&value) => {
                attributes.insert(field.name.clone(), value);
            }
            Some(value) => warn!(
                record = %raw.id,
                field = %field.name,
                expected = ?field.kind,
                ?value,
                "value does not match the field type, leaving it out"
            ),
            None => {}
        }
    }

    Ok(FeatureRecord {
        id: record_id(index),
        geometry,
        attributes,
    })
}

/// Projection pass: every record that yields a valid geometry, in input order.
///
/// Records with invalid geometries are dropped, never replaced.
pub fn project_records(records: &[RawFeature], descriptor: &FeatureTypeDescriptor) -> Vec<FeatureRecord> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match project_record(index, raw, descriptor) {
            Ok(record) => Some(record),
            Err(err) => {
                debug!(record = %raw.id, error = %err, "dropping record");
                None
            }
        })
        .collect()
}
