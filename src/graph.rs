//! Transitive dependency discovery for a template source.
//!
//! [`get_partial_dependencies`] parses a template, scans it for partial
//! references, resolves each new name, reads that partial's own source, and
//! recurses, producing one flat map from partial name to the absolute path
//! of its source file.
//!
//! The walk is depth-first with eager fan-out at every level: sibling names
//! are resolved, read, and explored concurrently. One shared `seen` map is
//! threaded through every branch and is the single source of truth for
//! "already visited"; a name is claimed in it before any I/O is issued for
//! that name, which is what makes reference cycles terminate and keeps each
//! name resolved at most once per call.
//!
//! Names present in the override map are explored using their supplied
//! source text instead of filesystem or catalog resolution. They are marked
//! in `seen` with no location, so they are (1) visited at most once and
//! (2) dropped from the caller-visible result.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use futures::FutureExt;
use futures::future::{BoxFuture, try_join_all};
use handlebars::template::Template;
use tracing::{debug, trace};

use crate::config::ResolveConfig;
use crate::error::ResolveError;
use crate::resolver;
use crate::scanner::PartialScanner;
use crate::utils::fs;

/// Partial name → resolved location, or `None` for names supplied by the
/// override map (visited but excluded from the result).
type SeenMap = HashMap<String, Option<PathBuf>>;

/// Map every partial a template transitively depends on to the absolute
/// path of its source file.
///
/// Override-map names never appear in the result, but partials reachable
/// only through an override's own body do. A template with no static partial
/// references yields an empty map.
///
/// ```rust,no_run
/// use hbs_partials::{ResolveConfig, get_partial_dependencies};
///
/// # async fn example() -> Result<(), hbs_partials::ResolveError> {
/// let config = ResolveConfig::new()
///     .with_partial_search_paths(vec!["templates".into()]);
/// let dependencies = get_partial_dependencies("{{> site/header}}", &config).await?;
/// for (name, path) in &dependencies {
///     println!("{name} -> {}", path.display());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn get_partial_dependencies(
    template: &str,
    config: &ResolveConfig,
) -> Result<HashMap<String, PathBuf>, ResolveError> {
    let config = config.normalized()?;
    let seen = Mutex::new(SeenMap::new());
    explore(template, &config, &seen).await?;

    let seen = seen.into_inner().expect("seen map lock poisoned");
    debug!(count = seen.len(), "dependency walk finished");
    Ok(seen
        .into_iter()
        .filter_map(|(name, location)| location.map(|path| (name, path)))
        .collect())
}

/// How a claimed name's source text will be obtained.
enum Pending {
    /// Text supplied by the override map.
    Override(String),
    /// Resolve against search paths and catalogs, then read from disk.
    Disk,
}

fn explore<'a>(
    source: &'a str,
    config: &'a ResolveConfig,
    seen: &'a Mutex<SeenMap>,
) -> BoxFuture<'a, Result<(), ResolveError>> {
    async move {
        let ast = Template::compile(source)?;
        let referenced = PartialScanner::scan(&ast);

        // claim unseen names while holding the lock so no concurrent sibling
        // branch dispatches the same name twice
        let mut to_visit = Vec::new();
        {
            let mut seen = seen.lock().expect("seen map lock poisoned");
            for name in referenced {
                if seen.contains_key(&name) {
                    continue;
                }
                seen.insert(name.clone(), None);
                if let Some(text) = config.overrides.get(&name) {
                    to_visit.push((name, Pending::Override(text.clone())));
                } else {
                    to_visit.push((name, Pending::Disk));
                }
            }
        }

        let branches = to_visit.into_iter().map(|(name, pending)| async move {
            let text = match pending {
                Pending::Override(text) => {
                    trace!(partial = %name, "exploring override source");
                    text
                }
                Pending::Disk => {
                    let path = resolver::resolve_name(&name, config).await?;
                    seen.lock()
                        .expect("seen map lock poisoned")
                        .insert(name.clone(), Some(path.clone()));
                    fs::read_text(&path).await?
                }
            };
            explore(&text, config, seen).await
        });
        try_join_all(branches).await?;
        Ok(())
    }
    .boxed()
}
