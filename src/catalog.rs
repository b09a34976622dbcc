//! Component catalogs: named collections of template components.
//!
//! A catalog is a directory named after its id under one of the configured
//! catalog search paths, described by a `catalog.toml` manifest:
//!
//! ```toml
//! [components.button]
//! path = "button"        # directory relative to the catalog root
//! entry = "index.hbs"    # default entry file when the component itself is referenced
//!
//! [components."pkg/nested"]
//! entry = "main.hbs"
//! ```
//!
//! Component names may contain `/` to form nested namespaces; the `path`
//! field defaults to the component name. Scoped catalog ids (`@scope/name`)
//! nest as two directory levels under the search path.
//!
//! Resolved catalogs are cached in the configuration's shared
//! [`catalogs`](crate::config::ResolveConfig::catalogs) map so a catalog
//! manifest is read at most once per cache, no matter how many partial names
//! resolve into it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, trace};

use crate::config::ResolveConfig;
use crate::error::ResolveError;
use crate::utils::fs;

/// Manifest file name expected at the root of every catalog directory.
pub const CATALOG_MANIFEST: &str = "catalog.toml";

/// A unit within a [`Catalog`]: a filesystem root, a name, and an optional
/// default entry file for the template grammar.
#[derive(Debug, Clone)]
pub struct Component {
    /// Component name, unique within its catalog; may contain `/`
    pub name: String,
    /// Name of the catalog this component belongs to
    pub catalog_name: String,
    /// Absolute filesystem root of the component
    pub path: PathBuf,
    /// Default entry file, relative to `path`, if the component can be
    /// referenced by its bare name
    pub entry_file: Option<String>,
}

/// A resolved catalog: its id, filesystem root, and component table.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Catalog id, e.g. `ui` or `@scope/ui`
    pub name: String,
    /// Absolute filesystem root of the catalog
    pub path: PathBuf,
    /// Components keyed by component name
    pub components: HashMap<String, Component>,
}

#[derive(Debug, Deserialize)]
struct CatalogManifest {
    #[serde(default)]
    components: HashMap<String, ComponentManifest>,
}

#[derive(Debug, Default, Deserialize)]
struct ComponentManifest {
    path: Option<String>,
    entry: Option<String>,
}

impl Catalog {
    fn from_manifest(name: &str, root: PathBuf, manifest: CatalogManifest) -> Self {
        let components = manifest
            .components
            .into_iter()
            .map(|(component_name, component)| {
                let dir = component.path.unwrap_or_else(|| component_name.clone());
                let component = Component {
                    name: component_name.clone(),
                    catalog_name: name.to_string(),
                    path: root.join(dir),
                    entry_file: component.entry,
                };
                (component_name, component)
            })
            .collect();

        Self {
            name: name.to_string(),
            path: root,
            components,
        }
    }
}

/// Resolve a catalog id to a [`Catalog`], consulting the shared cache first
/// and the configured catalog search paths second.
///
/// Returns `Ok(None)` when no search path contains a catalog with that id.
/// A manifest that exists but fails to parse is an error, not a miss.
pub async fn resolve_catalog(
    id: &str,
    config: &ResolveConfig,
) -> Result<Option<Arc<Catalog>>, ResolveError> {
    if let Some(hit) = config.catalogs.get(id) {
        trace!(catalog = %id, "catalog cache hit");
        return Ok(Some(hit.value().clone()));
    }

    for search_path in &config.catalog_search_paths {
        let root = fs::absolute_path(&search_path.join(id))?;
        let manifest_path = root.join(CATALOG_MANIFEST);
        if !fs::path_exists(&manifest_path).await? {
            continue;
        }

        let text = fs::read_text(&manifest_path).await?;
        let manifest: CatalogManifest =
            toml::from_str(&text).map_err(|err| ResolveError::CatalogManifest {
                path: manifest_path.clone(),
                reason: err.to_string(),
            })?;

        debug!(catalog = %id, root = %root.display(), "resolved catalog");
        let catalog = Arc::new(Catalog::from_manifest(id, root, manifest));
        config.catalogs.insert(id.to_string(), catalog.clone());
        return Ok(Some(catalog));
    }

    Ok(None)
}

/// A partial name split into its catalog id and the remaining name path.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ParsedPartialName {
    pub catalog: String,
    pub remainder: String,
}

/// Split a partial name into catalog id and remainder.
///
/// The catalog id is the first path segment, or the first two when the name
/// is scoped (`@scope/name/...`). Returns `None` when the name has no
/// catalog-qualified shape: no separator, an empty segment, or nothing left
/// after the id.
pub(crate) fn parse_catalog_name(name: &str) -> Option<ParsedPartialName> {
    let segments: Vec<&str> = name.split('/').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return None;
    }

    let id_segments = if name.starts_with('@') { 2 } else { 1 };
    if segments.len() <= id_segments {
        return None;
    }

    Some(ParsedPartialName {
        catalog: segments[..id_segments].join("/"),
        remainder: segments[id_segments..].join("/"),
    })
}
