//! # featureschema
//!
//! Describe heterogeneous geographic feature records with one homogeneous
//! feature type, and publish that type as a
//! [GML](https://www.ogc.org/standards/gml) application schema.
//!
//! ## Features
//!
//! - Infers a feature type (scalar fields + a single geometry field) from a
//!   sample record
//! - Promotes singular geometries to their multi form and homogenizes every
//!   record onto the inferred type
//! - Silently leaves attributes of unsupported declared types out of the type
//! - Writes an XML Schema document for the type with `quick-xml`
//! - Keeps a thread-safe registry from feature type namespace to schema location
//! - CLI tool `features2xsd` for batch conversion
//!
//! ## Example (Programmatic Usage)
//!
//! ```no_run
//! use featureschema::feature::{Binding, RawFeature, Value};
//! use featureschema::registry::SchemaRegistry;
//! use featureschema::store::MemorySchemaStore;
//! use featureschema::synthesizer::{publish, FeatureTypeSynthesizer};
//! use geo_types::point;
//!
//! let records = vec![
//!     RawFeature::new("a")
//!         .with_geometry(point!(x: 7.0, y: 51.9))
//!         .with_property("name", Binding::Text, Some(Value::Text("a".into())))
//!         .with_property("age", Binding::Integer, Some(Value::Integer(10))),
//! ];
//!
//! let registry = SchemaRegistry::new();
//! let store = MemorySchemaStore::new();
//! let published = publish(&FeatureTypeSynthesizer::default(), &records, &store, &registry)?;
//!
//! assert_eq!(
//!     registry.lookup(published.namespace()).as_deref(),
//!     Some(published.location.as_str())
//! );
//! # Ok::<(), featureschema::error::SchemaError>(())
//! ```
//!
//! ## Example (CLI)
//!
//! ```bash
//! features2xsd records.json out_dir --service-url http://localhost:8080/wps/service
//! ```
//!
//! ## Crate Layout
//!
//! - [`feature`]: Data model (`RawFeature`, `FeatureTypeDescriptor`, `FeatureRecord`, ...)
//! - [`common`]: Geometry classification and namespace helpers
//! - [`synthesizer`]: Two-pass feature type synthesis and publishing
//! - [`schema`]: Schema document writer and schema reference discovery
//! - [`registry`]: Namespace → schema location registry
//! - [`store`]: Where schema documents are persisted
//!
//! The CLI binary is enabled with the `cli` feature.
pub mod common;
pub mod error;
pub mod feature;
pub mod registry;
pub mod schema;
pub mod store;
pub mod synthesizer;
