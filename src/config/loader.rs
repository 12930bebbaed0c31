//! Properties resource resolution and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::ServerProperties;
use crate::error::ResourceError;

/// Environment variable overriding the resource lookup root.
pub const RESOURCE_ROOT_ENV: &str = "HARNESS_RESOURCE_ROOT";

/// Resolve a named resource from the fixed lookup root.
///
/// The root is `$HARNESS_RESOURCE_ROOT` when set, otherwise the crate's
/// `resources/` directory. Returns `None` when the resource does not
/// exist; callers treat that as a startup error.
pub fn resolve_resource(name: &str) -> Option<PathBuf> {
    let root = std::env::var(RESOURCE_ROOT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("resources"));

    let candidate = root.join(name);
    candidate.is_file().then_some(candidate)
}

/// Load and parse a resolved properties resource.
pub fn load_properties(path: &Path) -> Result<ServerProperties, ResourceError> {
    let content = fs::read_to_string(path)?;
    let properties: ServerProperties = toml::from_str(&content)?;
    Ok(properties)
}
