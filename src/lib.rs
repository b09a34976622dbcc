//! Build-time dependency resolution for Handlebars partials.
//!
//! A template that references partials (`{{> header}}`) can only render once
//! every referenced partial (and everything *those* partials reference) is
//! registered with the engine. This crate resolves that transitive set ahead
//! of time: given a root template's source, it produces a map from each
//! partial name to the absolute filesystem location of its source, and can
//! register the whole set into a [`handlebars::Handlebars`] registry in one
//! call. It runs at build/registration time, not at render time, so
//! templates can be precompiled with all their dependencies known up front.
//!
//! # Resolution strategy
//!
//! Each referenced name is resolved by trying, in order:
//!
//! 1. the caller-supplied **override map**: names whose source text is
//!    already in memory; explored for their own dependencies but excluded
//!    from the result,
//! 2. the **local search paths**: `search_path/name.extension` for every
//!    configured directory and whitelisted extension, probed concurrently,
//! 3. a **component catalog**: namespace-qualified names
//!    (`catalog/component/...`) resolved against nested, prefix-matched
//!    component directories described by `catalog.toml` manifests.
//!
//! # Core Modules
//!
//! - [`scanner`] - Extraction of partial references from a parsed template,
//!   excluding inline-defined partials and dynamic names
//! - [`resolver`] - Resolution of one partial name to an absolute source path
//! - [`graph`] - Recursive, cycle-tolerant dependency discovery
//! - [`catalog`] - Component catalog model, manifests, and cached lookup
//! - [`registry`] - Registration of a template and its dependencies into a
//!   Handlebars registry
//! - [`config`] - Resolution configuration and defaults
//! - [`error`] - Typed failure taxonomy
//!
//! # Example
//!
//! ```rust,no_run
//! use hbs_partials::{ResolveConfig, get_partial_dependencies};
//!
//! # async fn example() -> Result<(), hbs_partials::ResolveError> {
//! let config = ResolveConfig::new()
//!     .with_partial_search_paths(vec!["templates".into()])
//!     .with_override("analytics", "<!-- injected at build time -->");
//!
//! let dependencies =
//!     get_partial_dependencies(r#"{{#> layout}}{{> sidebar}}{{/layout}}"#, &config).await?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod graph;
pub mod registry;
pub mod resolver;
pub mod scanner;
pub mod utils;

pub use catalog::{Catalog, Component, resolve_catalog};
pub use config::{PARTIAL_BLOCK, ResolveConfig};
pub use error::ResolveError;
pub use graph::get_partial_dependencies;
pub use registry::{RegisterOptions, register_catalog, register_partial};
pub use resolver::resolve_partial_name;
pub use scanner::PartialScanner;
