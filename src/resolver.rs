//! Resolution of a partial name to the absolute path of its source.
//!
//! Strategies are tried in a fixed order:
//!
//! 1. **Local search.** Every `search_path/name.extension` combination is
//!    probed concurrently; the first existing candidate wins. When several
//!    exist there is no guarantee which is returned. Only an
//!    every-candidate-is-absent outcome falls through to the next strategy;
//!    any other stat failure propagates immediately.
//! 2. **Catalog lookup.** The name is parsed into a catalog id and a
//!    remainder path. Because the component name and the file path inside it
//!    share one namespace with no delimiter, progressively longer prefixes
//!    of the remainder are tried against the catalog's component table until
//!    one names a component. A reference to the component itself resolves to
//!    its default entry file; anything longer resolves to a file inside the
//!    component, probed with the same extension whitelist.
//!
//! Overrides are not handled here: they belong to the dependency graph
//! walk in [`crate::graph`], which never asks the resolver about an
//! overridden name.

use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use tracing::{debug, trace};

use crate::catalog::{self, Catalog, Component};
use crate::config::ResolveConfig;
use crate::error::ResolveError;
use crate::utils::fs;

/// Resolve a partial name to the absolute path of its source file.
///
/// Tries the configured local search paths first and component catalogs
/// second; fails with a [`ResolveError`] naming the stage that gave up.
///
/// ```rust,no_run
/// use hbs_partials::{ResolveConfig, resolve_partial_name};
///
/// # async fn example() -> Result<(), hbs_partials::ResolveError> {
/// let config = ResolveConfig::new()
///     .with_partial_search_paths(vec!["templates".into()]);
/// let path = resolve_partial_name("site/header", &config).await?;
/// println!("header lives at {}", path.display());
/// # Ok(())
/// # }
/// ```
pub async fn resolve_partial_name(
    name: &str,
    config: &ResolveConfig,
) -> Result<PathBuf, ResolveError> {
    let config = config.normalized()?;
    resolve_name(name, &config).await
}

/// Resolution against an already-normalized configuration.
pub(crate) async fn resolve_name(
    name: &str,
    config: &ResolveConfig,
) -> Result<PathBuf, ResolveError> {
    let mut candidates =
        Vec::with_capacity(config.partial_search_paths.len() * config.extensions.len());
    for search_path in &config.partial_search_paths {
        for extension in &config.extensions {
            candidates.push(fs::absolute_path(
                &search_path.join(format!("{name}.{extension}")),
            )?);
        }
    }

    if let Some(found) = first_existing(candidates).await? {
        debug!(partial = %name, path = %found.display(), "resolved partial on a search path");
        return Ok(found);
    }

    trace!(partial = %name, "no search path candidate exists, trying catalogs");
    resolve_in_catalog(name, config).await
}

/// Probe all candidate paths concurrently and return the first that exists.
///
/// `Ok(None)` means every candidate failed with the "does not exist" kind;
/// any other failure short-circuits. This is the primitive behind the
/// local-search-then-catalog fall-through.
pub(crate) async fn first_existing(
    candidates: Vec<PathBuf>,
) -> Result<Option<PathBuf>, ResolveError> {
    let probes = candidates.iter().map(|candidate| fs::path_exists(candidate));
    let existing = try_join_all(probes).await?;

    Ok(candidates
        .into_iter()
        .zip(existing)
        .find_map(|(candidate, exists)| exists.then_some(candidate)))
}

/// Probe `base/relative.<extension>` for each whitelisted extension.
pub(crate) async fn find_with_extensions(
    base: &Path,
    relative: &str,
    extensions: &[String],
) -> Result<Option<PathBuf>, ResolveError> {
    let candidates = extensions
        .iter()
        .map(|extension| fs::absolute_path(&base.join(format!("{relative}.{extension}"))))
        .collect::<Result<Vec<_>, _>>()?;
    first_existing(candidates).await
}

async fn resolve_in_catalog(name: &str, config: &ResolveConfig) -> Result<PathBuf, ResolveError> {
    let Some(parsed) = catalog::parse_catalog_name(name) else {
        return Err(ResolveError::PartialNotFound {
            name: name.to_string(),
        });
    };

    let catalog = catalog::resolve_catalog(&parsed.catalog, config)
        .await?
        .ok_or_else(|| ResolveError::CatalogNotFound {
            name: name.to_string(),
            catalog: parsed.catalog.clone(),
        })?;

    let component = match_component(&catalog, &parsed.remainder).ok_or_else(|| {
        ResolveError::ComponentNotFound {
            name: name.to_string(),
            catalog: parsed.catalog.clone(),
            remainder: parsed.remainder.clone(),
        }
    })?;

    if name.ends_with(&component.name) {
        // the reference names the component itself
        let Some(entry) = component.entry_file.as_deref() else {
            return Err(ResolveError::MissingEntryFile {
                catalog: catalog.name.clone(),
                component: component.name.clone(),
            });
        };
        let path = fs::absolute_path(&component.path.join(entry))?;
        debug!(partial = %name, path = %path.display(), "resolved partial to a component entry file");
        return Ok(path);
    }

    // the reference names a file inside the component: drop the
    // `catalog/component/` prefix and probe the rest against its root
    let prefix_len = parsed.catalog.len() + component.name.len() + 2;
    let relative = &name[prefix_len..];
    match find_with_extensions(&component.path, relative, &config.extensions).await? {
        Some(path) => {
            debug!(partial = %name, path = %path.display(), "resolved partial inside a component");
            Ok(path)
        }
        None => Err(ResolveError::ComponentFileNotFound {
            name: name.to_string(),
            component: component.name.clone(),
            relative: relative.to_string(),
        }),
    }
}

/// Find the most specific component the remainder path points into.
///
/// The component name and the path inside it have no separating delimiter,
/// so progressively longer prefixes of the remainder are tried until one
/// names a component.
fn match_component<'a>(catalog: &'a Catalog, remainder: &str) -> Option<&'a Component> {
    let segments: Vec<&str> = remainder.split('/').collect();
    for length in 1..=segments.len() {
        let prefix = segments[..length].join("/");
        if let Some(component) = catalog.components.get(&prefix) {
            return Some(component);
        }
    }
    None
}
