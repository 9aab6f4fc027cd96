use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::names::validate_namespace_uri;
use crate::error::{Result, SchemaError};
use crate::feature::Crs;
use crate::schema::probe::GeometryProbeOrder;

/// Settings shared by every synthesis run of one [`FeatureTypeSynthesizer`].
///
/// [`FeatureTypeSynthesizer`]: crate::synthesizer::FeatureTypeSynthesizer
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct SynthesizerConfig {
    /// Base URI the minted namespaces are derived from.
    pub namespace_uri: String,
    /// Reference system for records that do not carry one.
    pub default_crs: Crs,
    /// Order in which the schema writer probes geometry type names.
    pub geometry_probe: GeometryProbeOrder,
    /// Indent the schema document.
    pub pretty: bool,
    /// Adopt a geometry-valued property as default geometry before inference.
    pub repair_geometries: bool,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SynthesizerConfig {
    pub const DEFAULT_NAMESPACE_URI: &'static str = "http://www.example.org/feature-types";

    pub fn new() -> Self {
        Self {
            namespace_uri: Self::DEFAULT_NAMESPACE_URI.to_string(),
            default_crs: Crs::wgs84(),
            geometry_probe: GeometryProbeOrder::default(),
            pretty: false,
            repair_geometries: false,
        }
    }

    /// Parse a JSON configuration document; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SynthesizerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SchemaError::Input {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        validate_namespace_uri(&self.namespace_uri)?;
        if self.default_crs.code().trim().is_empty() {
            return Err(SchemaError::Config("default_crs must not be empty".into()));
        }
        Ok(())
    }

    pub fn with_namespace_uri(mut self, namespace_uri: impl Into<String>) -> Self {
        self.namespace_uri = namespace_uri.into();
        self
    }

    pub fn with_geometry_probe(mut self, order: GeometryProbeOrder) -> Self {
        self.geometry_probe = order;
        self
    }

    pub fn with_default_crs(mut self, crs: Crs) -> Self {
        self.default_crs = crs;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_repair_geometries(mut self, repair: bool) -> Self {
        self.repair_geometries = repair;
        self
    }
}
