//! Namespace → schema location lookup shared by concurrent conversions.
//!
//! The registry is an explicit service: create one at startup, hand it (or an
//! `Arc` of it) to every conversion and encoder, and drop it at shutdown.
//! Entries are never evicted.
//!
//! # Thread Safety
//!
//! Entries live in a `DashMap`; `register` and `lookup` lock a single shard,
//! so readers see either the previous or the new location, never a partial one.

use dashmap::DashMap;
use tracing::debug;

use crate::schema::constants::{GML_NAMESPACE, GML_SCHEMA_LOCATION};

#[derive(Debug, Default)]
pub struct SchemaRegistry {
    locations: DashMap<String, String>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where the schema of `namespace` lives.
    ///
    /// Registering the same namespace again replaces the location; the previous
    /// one is returned.
    pub fn register(
        &self,
        namespace: impl Into<String>,
        location: impl Into<String>,
    ) -> Option<String> {
        let namespace = namespace.into();
        let location = location.into();
        debug!(%namespace, %location, "registering schema location");
        self.locations.insert(namespace, location)
    }

    pub fn lookup(&self, namespace: &str) -> Option<String> {
        self.locations
            .get(namespace)
            .map(|entry| entry.value().clone())
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.locations.contains_key(namespace)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// All entries, sorted by namespace.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .locations
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        entries.sort();
        entries
    }

    /// Schema an encoder should declare for features of `namespace`.
    ///
    /// Falls back to plain GML when the namespace is unknown or absent.
    pub fn encoder_binding(&self, namespace: Option<&str>) -> EncoderSchemaBinding {
        match namespace.and_then(|ns| self.lookup(ns).map(|location| (ns, location))) {
            Some((namespace, location)) => EncoderSchemaBinding {
                namespace: namespace.to_string(),
                location,
                application_schema: true,
            },
            None => EncoderSchemaBinding::gml(),
        }
    }
}

/// Namespace and schema location handed to a feature encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderSchemaBinding {
    pub namespace: String,
    pub location: String,
    /// `false` when the binding is the GML base schema fallback.
    pub application_schema: bool,
}

impl EncoderSchemaBinding {
    pub fn gml() -> Self {
        Self {
            namespace: GML_NAMESPACE.to_string(),
            location: GML_SCHEMA_LOCATION.to_string(),
            application_schema: false,
        }
    }

    /// Value of the `xsi:schemaLocation` attribute of an encoded document.
    pub fn schema_location_hint(&self) -> String {
        if self.application_schema {
            format!(
                "{GML_NAMESPACE} {GML_SCHEMA_LOCATION} {} {}",
                self.namespace, self.location
            )
        } else {
            format!("{GML_NAMESPACE} {GML_SCHEMA_LOCATION}")
        }
    }
}
