//! Integration test suite for hbs-partials
//!
//! End-to-end tests that exercise the public API against real template
//! trees and catalogs on disk.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **dependencies**: transitive dependency maps (`get_partial_dependencies`)
//! - **resolution**: single-name resolution (`resolve_partial_name`) across
//!   search paths and catalogs
//! - **registration**: registering templates and catalogs into a Handlebars
//!   registry


// Integration tests
mod dependencies;
mod registration;
