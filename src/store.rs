use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use tracing::debug;
use url::Url;

use crate::error::{Result, SchemaError};

pub const SCHEMA_SUFFIX: &str = "xsd";

/// Durable home for schema documents.
///
/// `store` blocks on I/O and returns the location under which the document
/// can be resolved later.
pub trait SchemaStore {
    fn store(&self, identifier: &str, document: &[u8]) -> Result<String>;
}

/// Stores `<identifier>.xsd` files in one directory.
///
/// Locations are `file:` URLs unless a service URL is configured, in which
/// case they point at `schemas/<identifier>.xsd` relative to that URL.
#[derive(Debug, Clone)]
pub struct DirectorySchemaStore {
    directory: PathBuf,
    service_url: Option<Url>,
}

impl DirectorySchemaStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            service_url: None,
        }
    }

    /// Publish locations relative to `service_url`; its query and fragment are dropped.
    pub fn with_service_url(mut self, service_url: &str) -> Result<Self> {
        let mut url = Url::parse(service_url)
            .map_err(|e| SchemaError::Config(format!("service URL {service_url:?}: {e}")))?;
        url.set_query(None);
        url.set_fragment(None);
        self.service_url = Some(url);
        Ok(self)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn file_name(identifier: &str) -> String {
        format!("{identifier}.{SCHEMA_SUFFIX}")
    }

    pub fn path_for(&self, identifier: &str) -> PathBuf {
        self.directory.join(Self::file_name(identifier))
    }

    fn location_for(&self, identifier: &str, path: &Path) -> Result<String> {
        let storage = |source: io::Error| SchemaError::Storage {
            location: path.display().to_string(),
            source,
        };
        let url = match &self.service_url {
            Some(service) => service
                .join(&format!("schemas/{}", Self::file_name(identifier)))
                .map_err(|e| storage(io::Error::other(e)))?,
            None => {
                let absolute = fs::canonicalize(path).map_err(storage)?;
                Url::from_file_path(&absolute).map_err(|()| {
                    storage(io::Error::other(format!(
                        "{} cannot be expressed as a file URL",
                        absolute.display()
                    )))
                })?
            }
        };
        Ok(url.into())
    }
}

impl SchemaStore for DirectorySchemaStore {
    fn store(&self, identifier: &str, document: &[u8]) -> Result<String> {
        let path = self.path_for(identifier);
        let storage = |source: io::Error| SchemaError::Storage {
            location: path.display().to_string(),
            source,
        };
        fs::create_dir_all(&self.directory).map_err(storage)?;
        fs::write(&path, document).map_err(storage)?;
        debug!(path = %path.display(), bytes = document.len(), "stored schema document");
        self.location_for(identifier, &path)
    }
}

/// Keeps schema documents in memory under `mem:<identifier>` locations.
#[derive(Debug, Default)]
pub struct MemorySchemaStore {
    documents: DashMap<String, Vec<u8>>,
}

impl MemorySchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(identifier: &str) -> String {
        format!("mem:{identifier}")
    }

    pub fn get(&self, identifier: &str) -> Option<Vec<u8>> {
        self.documents.get(identifier).map(|doc| doc.value().clone())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl SchemaStore for MemorySchemaStore {
    fn store(&self, identifier: &str, document: &[u8]) -> Result<String> {
        self.documents
            .insert(identifier.to_string(), document.to_vec());
        Ok(Self::location(identifier))
    }
}
