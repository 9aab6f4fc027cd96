use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

/// Boxed error raised by the XML event sink.
pub type SinkError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while synthesizing, writing, storing or resolving a feature schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// No sample record is available for the inference pass.
    #[error("cannot infer a feature type from an empty collection")]
    EmptyCollection,

    /// A record geometry is null or empty.
    #[error("record {record} has no usable geometry")]
    InvalidGeometry { record: String },

    /// The schema document sink refused a write event.
    #[error("failed to encode schema document: {0}")]
    Encoding(#[source] SinkError),

    /// An incoming XML document could not be read.
    #[error("malformed XML document: {0}")]
    MalformedDocument(#[source] SinkError),

    /// The schema document could not be persisted.
    #[error("failed to store schema at {location}: {source}")]
    Storage { location: String, source: io::Error },

    /// A records file could not be read.
    #[error("failed to read {path:?}: {source}")]
    Input { path: PathBuf, source: io::Error },

    /// A records or configuration file is not valid JSON for the data model.
    #[error("invalid input document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// A caller supplied feature type identifier is not usable in a namespace or element name.
    #[error("invalid feature type identifier {0:?}")]
    InvalidIdentifier(String),
}

impl SchemaError {
    pub(crate) fn encoding<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SchemaError::Encoding(Box::new(err))
    }

    pub(crate) fn invalid_geometry(record: impl Into<String>) -> Self {
        SchemaError::InvalidGeometry {
            record: record.into(),
        }
    }
}
