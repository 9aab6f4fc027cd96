use std::sync::LazyLock;

use regex::Regex;
use url::Url;
use uuid::Uuid;

use crate::error::{Result, SchemaError};

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.\-]*$").expect("identifier pattern compiles")
});

// ASCII subset of the XML NCName production.
static NCNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").expect("ncname pattern compiles")
});

/// Mint a fresh feature type identifier.
pub fn mint_identifier() -> String {
    Uuid::new_v4().to_string()
}

/// Check that `identifier` can be appended to a namespace URI and to `Feature-`.
pub fn validate_identifier(identifier: &str) -> Result<()> {
    if IDENTIFIER.is_match(identifier) {
        Ok(())
    } else {
        Err(SchemaError::InvalidIdentifier(identifier.to_string()))
    }
}

/// Whether `name` is usable as an unprefixed XML element name.
pub fn is_ncname(name: &str) -> bool {
    NCNAME.is_match(name)
}

/// Check that a namespace base URI is an absolute URL.
pub fn validate_namespace_uri(base: &str) -> Result<()> {
    Url::parse(base)
        .map(|_| ())
        .map_err(|e| SchemaError::Config(format!("namespace URI {base:?}: {e}")))
}

/// Compose the namespace of a feature type from the base URI and its identifier.
///
/// A `/` separator is inserted unless the base already ends in `/`, `#` or `:`.
pub fn compose_namespace(base: &str, identifier: &str) -> String {
    if base.is_empty() || base.ends_with(['/', '#', ':']) {
        format!("{base}{identifier}")
    } else {
        format!("{base}/{identifier}")
    }
}
