pub mod inference;
pub mod projection;
pub mod projector;
pub mod repair;
pub mod state;

pub use state::SynthesizerConfig;

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use tracing::{info, instrument};

use crate::common::names::mint_identifier;
use crate::error::{Result, SchemaError};
use crate::feature::{Crs, FeatureCollection, FeatureTypeDescriptor, Geometry, RawFeature};
use crate::registry::SchemaRegistry;
use crate::schema::writer::SchemaWriter;
use crate::store::SchemaStore;

use inference::{infer_feature_type, infer_geometry_only};
use projection::project_records;
use repair::repair_default_geometries;

/// Turns heterogeneous raw records into one feature type plus normalized records.
///
/// Each call works on private state only, so one synthesizer can serve
/// concurrent conversions.
#[derive(Debug, Clone, Default)]
pub struct FeatureTypeSynthesizer {
    config: SynthesizerConfig,
}

impl FeatureTypeSynthesizer {
    pub fn new(config: SynthesizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SynthesizerConfig {
        &self.config
    }

    /// Schema writer configured from this synthesizer's settings.
    pub fn schema_writer(&self) -> SchemaWriter {
        SchemaWriter::new()
            .with_probe_order(self.config.geometry_probe)
            .with_indent(self.config.pretty.then_some(2))
    }

    /// Inference pass under a freshly minted identifier.
    pub fn infer(&self, sample: &RawFeature) -> Result<FeatureTypeDescriptor> {
        self.infer_with_identifier(sample, &mint_identifier())
    }

    pub fn infer_with_identifier(
        &self,
        sample: &RawFeature,
        identifier: &str,
    ) -> Result<FeatureTypeDescriptor> {
        infer_feature_type(sample, identifier, &self.config)
    }

    /// Feature type without attribute fields, for inputs that only carry geometries.
    pub fn geometry_only(&self, geometry: &Geometry, crs: Option<Crs>) -> Result<FeatureTypeDescriptor> {
        infer_geometry_only(geometry, crs, &mint_identifier(), &self.config)
    }

    /// Projection pass: re-project every record onto `descriptor`.
    pub fn project(&self, descriptor: FeatureTypeDescriptor, records: &[RawFeature]) -> FeatureCollection {
        let projected = project_records(records, &descriptor);
        FeatureCollection::new(descriptor, projected)
    }

    /// Run both passes, using the first record as the sample.
    pub fn synthesize(&self, records: &[RawFeature]) -> Result<FeatureCollection> {
        self.synthesize_with_identifier(records, &mint_identifier())
    }

    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn synthesize_with_identifier(
        &self,
        records: &[RawFeature],
        identifier: &str,
    ) -> Result<FeatureCollection> {
        let records: Cow<'_, [RawFeature]> = if self.config.repair_geometries {
            let mut owned = records.to_vec();
            repair_default_geometries(&mut owned);
            Cow::Owned(owned)
        } else {
            Cow::Borrowed(records)
        };

        let sample = records.first().ok_or(SchemaError::EmptyCollection)?;
        let descriptor = self.infer_with_identifier(sample, identifier)?;
        let collection = self.project(descriptor, &records);

        info!(
            namespace = collection.descriptor().namespace(),
            geometry = %collection.descriptor().geometry_kind(),
            fields = collection.descriptor().fields().len(),
            kept = collection.len(),
            dropped = records.len() - collection.len(),
            "synthesized feature type"
        );
        Ok(collection)
    }
}

/// A synthesized collection whose schema document is stored and registered.
#[derive(Debug, Clone)]
pub struct PublishedFeatureType {
    pub collection: FeatureCollection,
    /// Where the schema document can be resolved.
    pub location: String,
    pub document: Vec<u8>,
}

impl PublishedFeatureType {
    pub fn namespace(&self) -> &str {
        self.collection.descriptor().namespace()
    }
}

/// Write, store and register the schema of an already synthesized collection.
pub fn publish_collection<S>(
    collection: FeatureCollection,
    writer: &SchemaWriter,
    store: &S,
    registry: &SchemaRegistry,
) -> Result<PublishedFeatureType>
where
    S: SchemaStore + ?Sized,
{
    let descriptor = collection.descriptor();
    let document = writer.to_bytes(descriptor)?;
    let location = store.store(descriptor.identifier(), &document)?;
    registry.register(descriptor.namespace(), location.clone());
    info!(namespace = descriptor.namespace(), %location, "published schema");

    Ok(PublishedFeatureType {
        collection,
        location,
        document,
    })
}

/// Synthesize `records` and publish the resulting schema.
pub fn publish<S>(
    synthesizer: &FeatureTypeSynthesizer,
    records: &[RawFeature],
    store: &S,
    registry: &SchemaRegistry,
) -> Result<PublishedFeatureType>
where
    S: SchemaStore + ?Sized,
{
    let collection = synthesizer.synthesize(records)?;
    publish_collection(collection, &synthesizer.schema_writer(), store, registry)
}

/// Read a JSON array of raw records from disk and publish its schema.
///
/// `identifier` pins the feature type identifier instead of minting one.
pub fn convert_feature_file<S>(
    records_path: impl AsRef<Path>,
    synthesizer: &FeatureTypeSynthesizer,
    identifier: Option<&str>,
    store: &S,
    registry: &SchemaRegistry,
) -> Result<PublishedFeatureType>
where
    S: SchemaStore + ?Sized,
{
    let path = records_path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| SchemaError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<RawFeature> = serde_json::from_str(&content)?;

    let collection = match identifier {
        Some(id) => synthesizer.synthesize_with_identifier(&records, id)?,
        None => synthesizer.synthesize(&records)?,
    };
    publish_collection(collection, &synthesizer.schema_writer(), store, registry)
}
