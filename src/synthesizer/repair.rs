use tracing::debug;

use crate::common::geometry::{is_empty, usable};
use crate::feature::RawFeature;

/// Give a record without a usable default geometry the first non-empty
/// geometry held by one of its properties.
///
/// Returns whether the record was changed.
pub fn repair_default_geometry(record: &mut RawFeature) -> bool {
    if usable(record.geometry.as_ref()).is_some() {
        return false;
    }
    let candidate = record.properties.iter().find_map(|p| {
        p.value
            .as_ref()
            .and_then(|v| v.as_geometry())
            .filter(|g| !is_empty(g))
            .map(|g| (p.name.as_str(), g.clone()))
    });
    match candidate {
        Some((name, geometry)) => {
            debug!(record = %record.id, property = name, "adopting property as default geometry");
            record.geometry = Some(geometry);
            true
        }
        None => false,
    }
}

/// Repair every record of a collection, returning how many were changed.
pub fn repair_default_geometries(records: &mut [RawFeature]) -> usize {
    records
        .iter_mut()
        .map(repair_default_geometry)
        .filter(|repaired| *repaired)
        .count()
}
