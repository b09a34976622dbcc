//! Async filesystem primitives for the resolver.
//!
//! Everything the crate knows about the filesystem goes through these three
//! functions. The important contract is in [`path_exists`]: a missing file is
//! an `Ok(false)` answer, while every other stat failure is an error. The
//! resolution strategies fall through from one candidate location to the next
//! only when a candidate is genuinely absent; an unreadable directory or an
//! I/O fault must surface to the caller instead of being mistaken for "this
//! partial does not exist".

use std::io;
use std::path::{Path, PathBuf};

use crate::error::ResolveError;

/// Check whether `path` exists.
///
/// Returns `Ok(false)` for the "does not exist" failure kind and propagates
/// every other stat failure as [`ResolveError::Io`].
pub async fn path_exists(path: &Path) -> Result<bool, ResolveError> {
    match tokio::fs::metadata(path).await {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(ResolveError::io(path, err)),
    }
}

/// Read a template source file as UTF-8 text.
pub async fn read_text(path: &Path) -> Result<String, ResolveError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|err| ResolveError::io(path, err))
}

/// Absolutize `path` against the current working directory.
///
/// Purely lexical: does not touch the filesystem and does not require the
/// path to exist.
pub fn absolute_path(path: &Path) -> Result<PathBuf, ResolveError> {
    std::path::absolute(path).map_err(|err| ResolveError::io(path, err))
}
