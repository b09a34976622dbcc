//! Resolution configuration.
//!
//! A [`ResolveConfig`] tells the resolver where partials live: which file
//! extensions to probe, which directories to search, which names are
//! overridden with in-memory source text, and where component catalogs can be
//! found. It is immutable once handed to a resolution call.
//!
//! All fields have working defaults, so the zero-configuration path is just:
//!
//! ```rust,no_run
//! use hbs_partials::ResolveConfig;
//!
//! let config = ResolveConfig::new()
//!     .with_partial_search_paths(vec!["templates".into()]);
//! ```
//!
//! The catalog cache is shared through an [`Arc`], so cloning a configuration
//! (or deriving one with the builder methods) keeps pointing at the same
//! cache. Pass a common handle via [`ResolveConfig::with_catalog_cache`] to
//! share resolved catalogs across otherwise unrelated configurations.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;

use crate::catalog::Catalog;
use crate::error::ResolveError;

/// The reserved name Handlebars substitutes with the outer block content of
/// a partial block call (`{{> @partial-block}}`).
///
/// Configuration normalization always seeds this name as an empty override,
/// so referencing it never triggers filesystem or catalog resolution and it
/// never appears in a dependency map.
pub const PARTIAL_BLOCK: &str = "@partial-block";

/// Extensions probed by default, in order.
pub const DEFAULT_EXTENSIONS: &[&str] = &["hbs", "handlebars"];

/// Directory searched for catalogs by default.
pub const DEFAULT_CATALOG_DIR: &str = "catalogs";

/// Configuration for partial resolution.
#[derive(Debug, Clone)]
pub struct ResolveConfig {
    /// File extensions to try when probing for partial sources, in order.
    /// The first candidate that exists on disk wins; when several exist
    /// there is no guarantee which is returned.
    pub extensions: Vec<String>,
    /// Directories searched for local partials, in order.
    pub partial_search_paths: Vec<PathBuf>,
    /// Partial names whose source text is already known. Overridden names
    /// are still explored for their own dependencies but never appear in a
    /// dependency map.
    pub overrides: HashMap<String, String>,
    /// Directories searched for catalogs, in order.
    pub catalog_search_paths: Vec<PathBuf>,
    /// Shared cache of resolved catalogs, keyed by catalog id.
    pub catalogs: Arc<DashMap<String, Arc<Catalog>>>,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            partial_search_paths: vec![PathBuf::from(".")],
            overrides: HashMap::new(),
            catalog_search_paths: vec![PathBuf::from(DEFAULT_CATALOG_DIR)],
            catalogs: Arc::new(DashMap::new()),
        }
    }
}

impl ResolveConfig {
    /// Create a configuration with the default extensions, the current
    /// working directory as the only search path, no overrides, and a fresh
    /// catalog cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the extension whitelist.
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Replace the local partial search paths.
    pub fn with_partial_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.partial_search_paths = paths;
        self
    }

    /// Replace the override map.
    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Add one override entry.
    pub fn with_override(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.overrides.insert(name.into(), source.into());
        self
    }

    /// Replace the catalog search paths.
    pub fn with_catalog_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.catalog_search_paths = paths;
        self
    }

    /// Share a catalog cache with other configurations.
    pub fn with_catalog_cache(mut self, catalogs: Arc<DashMap<String, Arc<Catalog>>>) -> Self {
        self.catalogs = catalogs;
        self
    }

    /// Validate the configuration and seed the reserved
    /// [`PARTIAL_BLOCK`] override.
    ///
    /// Runs before any I/O in every public entry point.
    pub(crate) fn normalized(&self) -> Result<Self, ResolveError> {
        if self.extensions.is_empty() {
            return Err(ResolveError::Config {
                message: "`extensions` must name at least one file extension".to_string(),
            });
        }
        if self.partial_search_paths.is_empty() {
            return Err(ResolveError::Config {
                message: "`partial_search_paths` must name at least one directory".to_string(),
            });
        }
        if self.catalog_search_paths.is_empty() {
            return Err(ResolveError::Config {
                message: "`catalog_search_paths` must name at least one directory".to_string(),
            });
        }

        let mut normalized = self.clone();
        normalized.overrides.insert(PARTIAL_BLOCK.to_string(), String::new());
        Ok(normalized)
    }
}
