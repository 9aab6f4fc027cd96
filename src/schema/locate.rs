use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::registry::SchemaRegistry;
use crate::schema::constants::{GML32_LOCATION_PREFIX, GML32_NAMESPACE, GML_NAMESPACE, WFS_NAMESPACE};

/// A `namespace location` pair taken from an `xsi:schemaLocation` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaReference {
    pub namespace: String,
    pub location: String,
}

impl SchemaReference {
    pub fn new(namespace: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            location: location.into(),
        }
    }

    /// Whether the pair points at the GML core schemas rather than an application schema.
    pub fn is_gml_core(&self) -> bool {
        self.namespace == GML_NAMESPACE
            || self.namespace == GML32_NAMESPACE
            || self.location.starts_with(GML32_LOCATION_PREFIX)
    }

    fn is_wfs(&self) -> bool {
        self.namespace == WFS_NAMESPACE
    }
}

/// Split an `xsi:schemaLocation` value into its pairs. A trailing unpaired token is ignored.
pub fn schema_location_pairs(value: &str) -> Vec<SchemaReference> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    tokens
        .chunks_exact(2)
        .map(|pair| SchemaReference::new(pair[0], pair[1]))
        .collect()
}

/// Find the schema an incoming GML document claims to conform to.
///
/// Only the root element is inspected. The first application schema pair wins;
/// failing that, the first GML core pair is returned. WFS pairs are ignored.
pub fn discover_schema_reference(xml: &str) -> Result<Option<SchemaReference>> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(root) | Event::Empty(root) => return root_reference(&root),
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

fn root_reference(root: &BytesStart<'_>) -> Result<Option<SchemaReference>> {
    for attribute in root.attributes() {
        let attribute = attribute.map_err(malformed)?;
        if attribute.key.local_name().as_ref() != b"schemaLocation" {
            continue;
        }
        let value = attribute.unescape_value().map_err(malformed)?;
        let pairs: Vec<SchemaReference> = schema_location_pairs(&value)
            .into_iter()
            .filter(|r| !r.is_wfs())
            .collect();
        let chosen = pairs
            .iter()
            .find(|r| !r.is_gml_core())
            .or_else(|| pairs.first())
            .cloned();
        return Ok(chosen);
    }
    Ok(None)
}

/// Record an application schema reference in the registry.
///
/// GML core references are not registered; returns whether an entry was written.
pub fn register_discovered(registry: &SchemaRegistry, reference: &SchemaReference) -> bool {
    if reference.is_gml_core() {
        debug!(namespace = %reference.namespace, "core GML schema, not registering");
        return false;
    }
    registry.register(reference.namespace.clone(), reference.location.clone());
    true
}

fn malformed<E>(err: E) -> SchemaError
where
    E: std::error::Error + Send + Sync + 'static,
{
    SchemaError::MalformedDocument(Box::new(err))
}
