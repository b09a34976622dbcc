//! Registration of templates and their dependencies into a Handlebars
//! registry.
//!
//! This is the convenience layer on top of the resolution core: give it a
//! root name and source, and it compiles the root plus every transitively
//! referenced partial into the registry's template table, each exactly once.
//! Names already present in the registry are left untouched, so repeated
//! registrations are cheap and a caller can pre-register hand-built
//! partials that take precedence.

use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use handlebars::Handlebars;
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::ResolveConfig;
use crate::error::ResolveError;
use crate::graph::get_partial_dependencies;
use crate::utils::fs;

/// Options for [`register_partial`] and [`register_catalog`].
#[derive(Debug, Clone)]
pub struct RegisterOptions {
    /// Resolve and register the template's transitive partial dependencies
    /// after the template itself. Defaults to `true`.
    pub register_transitive_dependencies: bool,
    /// Configuration used to resolve those dependencies.
    pub dependency_config: ResolveConfig,
}

impl Default for RegisterOptions {
    fn default() -> Self {
        Self {
            register_transitive_dependencies: true,
            dependency_config: ResolveConfig::default(),
        }
    }
}

/// Compile `source` into the registry under `name`, then resolve its
/// transitive partial dependencies and register each of them exactly once.
///
/// A name already present in the registry is never recompiled, neither the
/// root nor a dependency. Dependency sources are read concurrently before
/// being registered.
pub async fn register_partial(
    registry: &mut Handlebars<'_>,
    name: &str,
    source: &str,
    options: &RegisterOptions,
) -> Result<(), ResolveError> {
    if registry.get_template(name).is_none() {
        debug!(partial = %name, "registering partial");
        registry.register_template_string(name, source)?;
    }

    if !options.register_transitive_dependencies {
        debug!(partial = %name, "not registering transitive dependencies");
        return Ok(());
    }

    let dependencies = get_partial_dependencies(source, &options.dependency_config).await?;
    let missing: Vec<(String, PathBuf)> = dependencies
        .into_iter()
        .filter(|(dependency, _)| registry.get_template(dependency).is_none())
        .collect();

    // the registry is written sequentially, but all dependency sources are
    // read as one concurrent batch
    let sources = try_join_all(missing.iter().map(|(_, path)| fs::read_text(path))).await?;
    for ((dependency, _), text) in missing.iter().zip(sources) {
        debug!(partial = %dependency, "registering dependency partial");
        registry.register_template_string(dependency, &text)?;
    }

    Ok(())
}

/// Register every component of a catalog that has a template entry file,
/// under `catalogName/componentName`, including each one's transitive
/// dependencies.
///
/// The directory the catalog was resolved from is appended to the catalog
/// search paths for the nested resolution, so components referencing
/// siblings by qualified name resolve without extra configuration.
pub async fn register_catalog(
    registry: &mut Handlebars<'_>,
    catalog: &Catalog,
    options: &RegisterOptions,
) -> Result<(), ResolveError> {
    let mut options = options.clone();
    if let Some(root) = catalog_search_root(catalog) {
        options.dependency_config.catalog_search_paths.push(root);
    }

    for component in catalog.components.values() {
        let Some(entry) = component.entry_file.as_deref() else {
            debug!(component = %component.name, "component has no template entry file, skipping");
            continue;
        };
        let name = format!("{}/{}", catalog.name, component.name);
        let source = fs::read_text(&component.path.join(entry)).await?;
        register_partial(registry, &name, &source, &options).await?;
    }

    Ok(())
}

/// The directory the catalog was resolved from: its root with the (possibly
/// scoped) catalog name stripped off the end.
fn catalog_search_root(catalog: &Catalog) -> Option<PathBuf> {
    let mut root = catalog.path.as_path();
    for _ in Path::new(&catalog.name).components() {
        root = root.parent()?;
    }
    Some(root.to_path_buf())
}
