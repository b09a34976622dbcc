//! Error handling for partial resolution.
//!
//! All fallible operations in this crate return [`ResolveError`]. The enum is
//! deliberately fine-grained about *which* resolution stage failed so that a
//! caller (or a human reading a log line) can tell "you referenced a partial
//! that does not exist" apart from "your filesystem is broken":
//!
//! - **Configuration errors** ([`ResolveError::Config`]) are raised
//!   synchronously, before any I/O is attempted.
//! - **Not-found errors** ([`ResolveError::PartialNotFound`],
//!   [`ResolveError::CatalogNotFound`], [`ResolveError::ComponentNotFound`],
//!   [`ResolveError::ComponentFileNotFound`],
//!   [`ResolveError::MissingEntryFile`]) describe a name that no resolution
//!   strategy could satisfy, naming the stage that gave up.
//! - **Infrastructure errors** ([`ResolveError::Io`],
//!   [`ResolveError::CatalogManifest`]) are propagated immediately and are
//!   never reinterpreted as "not found".
//! - **Syntax errors** ([`ResolveError::TemplateParse`]) come from the
//!   Handlebars parser and are fatal to the resolution branch that hit them.
//!
//! Use [`ResolveError::is_not_found`] to distinguish the recoverable
//! "unresolvable name" class from everything else.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The error type for all partial resolution and registration operations.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The resolution configuration was rejected before any I/O.
    #[error("Invalid resolver configuration: {message}")]
    Config {
        /// Description of the invalid field
        message: String,
    },

    /// The name did not resolve on any search path and does not have a
    /// catalog-qualified shape.
    #[error("Could not locate a partial named '{name}'")]
    PartialNotFound {
        /// The partial name that could not be resolved
        name: String,
    },

    /// The name is catalog-qualified but no catalog with that id exists on
    /// the configured catalog search paths.
    #[error("Could not locate a partial named '{name}': no such catalog '{catalog}'")]
    CatalogNotFound {
        /// The partial name that could not be resolved
        name: String,
        /// The catalog id parsed out of the name
        catalog: String,
    },

    /// The catalog exists but no prefix of the remaining name path matches a
    /// component in it.
    #[error("Could not locate a partial named '{name}': no component matches '{remainder}' in catalog '{catalog}'")]
    ComponentNotFound {
        /// The partial name that could not be resolved
        name: String,
        /// The catalog that was searched
        catalog: String,
        /// The portion of the name that was matched against component names
        remainder: String,
    },

    /// A component matched, but the file the name points at inside it does
    /// not exist under any whitelisted extension.
    #[error("Could not locate a partial named '{name}': no file '{relative}' in component '{component}'")]
    ComponentFileNotFound {
        /// The partial name that could not be resolved
        name: String,
        /// The component the name matched
        component: String,
        /// The path probed relative to the component root
        relative: String,
    },

    /// The name references a component itself, but the component declares no
    /// default entry file for the template grammar.
    #[error("Component '{component}' in catalog '{catalog}' has no template entry file")]
    MissingEntryFile {
        /// The catalog containing the component
        catalog: String,
        /// The component that lacks an entry file
        component: String,
    },

    /// A catalog manifest exists but could not be parsed.
    #[error("Invalid catalog manifest at {}: {reason}", .path.display())]
    CatalogManifest {
        /// Path to the manifest that failed to parse
        path: PathBuf,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// The Handlebars parser rejected a template source.
    #[error("Template syntax error: {reason}")]
    TemplateParse {
        /// The parser's diagnostic
        reason: String,
    },

    /// An I/O failure other than "does not exist" (permissions, faults).
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The path the operation touched
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ResolveError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether this error reports an unresolvable name rather than an
    /// infrastructure, syntax, or configuration failure.
    ///
    /// Resolution falls through from one strategy to the next only on this
    /// class of error; everything else short-circuits.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PartialNotFound { .. }
                | Self::CatalogNotFound { .. }
                | Self::ComponentNotFound { .. }
                | Self::ComponentFileNotFound { .. }
                | Self::MissingEntryFile { .. }
        )
    }
}

impl From<handlebars::TemplateError> for ResolveError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::TemplateParse {
            reason: err.to_string(),
        }
    }
}
