//! Discovery of OpenAPI and Swagger documents.
//!
//! This crate provides mechanisms for:
//! - Walking a source tree for `.json`/`.yaml`/`.yml` files that carry a spec marker key.
//! - Extracting declared spec paths from untrusted build-configuration XML.
//! - Locating a build plugin's execution configurations in a Maven descriptor.
//!
//! # Examples
//!
//! ```
//! use oasprobe_discovery::{declared_spec_paths, find_spec_files};
//! use tempfile::tempdir;
//!
//! let temp = tempdir().unwrap();
//! std::fs::write(temp.path().join("api.yaml"), "openapi: 3.0.0\n").unwrap();
//! std::fs::write(temp.path().join("ci.yaml"), "jobs: {}\n").unwrap();
//!
//! let found: Vec<_> = find_spec_files(temp.path()).collect();
//! assert_eq!(found.len(), 1);
//!
//! let declared = declared_spec_paths("<inputSpec>api.yaml</inputSpec>").unwrap();
//! assert_eq!(declared, vec!["api.yaml"]);
//! ```

#![deny(unsafe_code)]

/// Hardened scanning of build-configuration fragments.
pub mod build_config;
/// Maven descriptor plugin lookup.
pub mod pom;
/// Source tree walking.
pub mod scanner;
/// Content sniffing of candidate files.
pub mod sniff;
/// Shared result and error types.
pub mod types;

pub use build_config::{
    declared_spec_paths, has_spec_suffix, scan_fragments, HardenedXml, SPEC_SUFFIXES,
};
pub use pom::{plugin_configurations, OPENAPI_GENERATOR_PLUGIN};
pub use scanner::{find_spec_files, find_spec_files_with, DiscoveryConfig, SpecFiles};
pub use sniff::{looks_like_spec, sniff_file, MARKER_KEYS};
pub use types::{BuildConfigError, Candidate, DeclaredPaths, RejectedFragment};
