//! Cheap content check applied to every candidate file.

use oasprobe_spec::document::parse_document;
use oasprobe_spec::SourceFormat;
use std::path::Path;

/// Top-level keys that mark a document as a spec.
pub const MARKER_KEYS: [&str; 2] = ["openapi", "swagger"];

/// True iff `bytes`, parsed as `format`, is a mapping with an `openapi` or
/// `swagger` key. Parse failures count as "not a spec".
pub fn looks_like_spec(bytes: &[u8], format: SourceFormat) -> bool {
    let Ok(document) = parse_document(bytes, format, "") else {
        return false;
    };
    document
        .as_mapping()
        .is_some_and(|root| MARKER_KEYS.iter().any(|key| root.contains_key(*key)))
}

/// Reads `path` and sniffs it. Unreadable files are not specs.
pub fn sniff_file(path: &Path, format: SourceFormat) -> bool {
    match std::fs::read(path) {
        Ok(bytes) => looks_like_spec(&bytes, format),
        Err(error) => {
            tracing::debug!(
                target: "oasprobe::discovery",
                path = %path.display(),
                %error,
                "unreadable candidate"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_keys_are_recognised() {
        assert!(looks_like_spec(br#"{"openapi": "3.1.0"}"#, SourceFormat::Json));
        assert!(looks_like_spec(b"swagger: '2.0'\n", SourceFormat::Yaml));
        assert!(looks_like_spec(b"info: {}\nopenapi: 3.0.0\n", SourceFormat::Yaml));
    }

    #[test]
    fn other_documents_are_rejected() {
        assert!(!looks_like_spec(br#"{"name": "pkg"}"#, SourceFormat::Json));
        assert!(!looks_like_spec(b"- openapi\n- swagger\n", SourceFormat::Yaml));
        assert!(!looks_like_spec(b"nested:\n  openapi: 3.0.0\n", SourceFormat::Yaml));
    }

    #[test]
    fn parse_failures_are_not_specs() {
        assert!(!looks_like_spec(b"{\"openapi\": ", SourceFormat::Json));
        assert!(!looks_like_spec(b"openapi: [unclosed\n", SourceFormat::Yaml));
        assert!(!looks_like_spec(b"openapi: 3.0.0\n", SourceFormat::Json));
        assert!(!looks_like_spec(b"openapi: 'unterminated\n", SourceFormat::Yaml));
    }

    #[test]
    fn missing_files_are_not_specs() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(!sniff_file(&tmp.path().join("gone.yaml"), SourceFormat::Yaml));
    }
}
