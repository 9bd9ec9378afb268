//! Classification, reference flattening, and packaging of OpenAPI and
//! Swagger documents.
//!
//! This crate turns the bytes behind one location into a [`Spec`] record:
//! - The document is classified by its `openapi`/`swagger` marker key.
//! - Servers and security schemes are extracted.
//! - External `$ref`s are flattened when present.
//! - The canonical YAML form is gzip-compressed and base64-encoded.
//!
//! # Examples
//!
//! ```
//! use oasprobe_spec::{decode_content, ExtractOptions, SpecProcessor};
//! use std::time::Duration;
//! use tempfile::tempdir;
//!
//! let temp = tempdir().unwrap();
//! let path = temp.path().join("petstore.json");
//! std::fs::write(&path, r#"{"openapi": "3.0.1", "info": {"version": "1.2.0"}}"#).unwrap();
//!
//! let processor = SpecProcessor::with_timeout(Duration::from_secs(5), ExtractOptions::default()).unwrap();
//! let spec = processor.process(path.to_str().unwrap()).unwrap();
//! assert_eq!(spec.version.as_deref(), Some("3.0.1"));
//! assert_eq!(spec.info_version.as_deref(), Some("1.2.0"));
//!
//! let yaml = decode_content(spec.content.as_deref().unwrap()).unwrap();
//! assert!(String::from_utf8(yaml).unwrap().starts_with("openapi: 3.0.1"));
//! ```

#![deny(unsafe_code)]

pub mod document;
pub mod error;
pub mod extract;
pub mod model;
pub mod package;
pub mod processor;
pub mod refs;
pub mod resolve;
pub mod security;
pub mod source;

/// Result type for spec operations.
pub type Result<T> = std::result::Result<T, SpecError>;

pub use error::SpecError;
pub use extract::{
    classify, extract, extract_security_schemes, extract_servers, ExtractOptions, Extraction,
    MissingServerField, UnknownSchemePolicy, NO_DESCRIPTION, NO_URL,
};
pub use model::{Dialect, OAuthFlow, SecurityScheme, Server, SourceFormat, Spec};
pub use package::{canonical_unresolved, decode_content, encode_content};
pub use processor::SpecProcessor;
pub use refs::{external_refs, is_local_ref, requires_resolution};
pub use resolve::{resolve_to_yaml, Resolver, STRIPPED_FIELDS};
pub use security::parse_security_scheme;
pub use source::{display_name, is_remote, DefaultLoader, Source, SourceLoader, DEFAULT_FETCH_TIMEOUT};
