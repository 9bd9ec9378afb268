//! Textual detection of external `$ref` pointers.
//!
//! This is a cheap line scan, not a structural parse. It may fire on a
//! `$ref`-looking line inside a string literal; that only costs an extra
//! resolution pass.

use regex::Regex;
use std::sync::LazyLock;

/// Prefix of a pointer into the same document.
pub const LOCAL_REF_PREFIX: &str = "#/";

// `$ref` as a quoted JSON key or a bare YAML key, at line start or after a
// flow/sequence delimiter, capturing the (optionally quoted) value.
static REF_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)(?:^|[-{,])\s*(?:"\$ref"|'\$ref'|\$ref)\s*[:=]\s*["']?([^"'\r\n,}]*)"#)
        .expect("valid regex")
});

/// Returns true if the document contains at least one `$ref` whose target is
/// outside the document.
pub fn requires_resolution(bytes: &[u8]) -> bool {
    let content = String::from_utf8_lossy(bytes);
    let found = external_refs(&content).next().is_some();
    found
}

/// Yields the raw target of every external `$ref` found by the line scan.
pub fn external_refs(content: &str) -> impl Iterator<Item = &str> {
    REF_LINE.captures_iter(content).filter_map(|caps| {
        let target = caps.get(1)?.as_str().trim();
        if target.is_empty() || is_local_ref(target) {
            None
        } else {
            Some(target)
        }
    })
}

/// True for pointers into the current document (`#/...`).
pub fn is_local_ref(target: &str) -> bool {
    target.starts_with(LOCAL_REF_PREFIX) || target == "#"
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn external_json_ref_requires_resolution() {
        let doc = br#"{
  "components": {
    "schemas": {
      "Pet": {
        "$ref": "other.yaml#/components/schemas/Foo"
      }
    }
  }
}"#;
        assert!(requires_resolution(doc));
    }

    #[test]
    fn local_json_ref_does_not() {
        let doc = br##"{
  "schema": {
    "$ref": "#/components/schemas/Foo"
  }
}"##;
        assert!(!requires_resolution(doc));
    }

    #[test]
    fn yaml_forms_are_recognised() {
        assert!(requires_resolution(b"schema:\n  $ref: ./models/pet.yaml\n"));
        assert!(requires_resolution(b"schema:\n  $ref: 'common.yaml#/Pet'\n"));
        assert!(requires_resolution(b"allOf:\n  - $ref: \"https://x/y.json\"\n"));
        assert!(!requires_resolution(b"schema:\n  $ref: '#/components/schemas/Pet'\n"));
        assert!(!requires_resolution(b"schema:\n  $ref: \"#/components/schemas/Pet\"\n"));
    }

    #[test]
    fn inline_json_objects_are_recognised() {
        assert!(requires_resolution(br#"  "schema": {"$ref": "pet.json"},"#));
        assert!(!requires_resolution(br##"  "schema": {"$ref": "#/definitions/Pet"},"##));
    }

    #[test]
    fn documents_without_refs_do_not_require_resolution() {
        assert!(!requires_resolution(b"openapi: 3.0.0\ninfo:\n  version: '1'\n"));
        assert!(!requires_resolution(b""));
    }

    #[test]
    fn collects_external_targets() {
        let doc = "a:\n  $ref: a.yaml\nb:\n  $ref: '#/x'\nc:\n  $ref: c.yaml#/C\n";
        let targets: Vec<_> = external_refs(doc).collect();
        assert_eq!(targets, vec!["a.yaml", "c.yaml#/C"]);
    }

    proptest! {
        #[test]
        fn local_pointers_never_trigger(path in "[A-Za-z0-9_/]{1,24}") {
            let doc = format!("schema:\n  $ref: '#/{path}'\n");
            prop_assert!(!requires_resolution(doc.as_bytes()));
        }

        #[test]
        fn file_pointers_always_trigger(file in "[a-z][a-z0-9_]{0,12}", ext in "(yaml|yml|json)") {
            let doc = format!("schema:\n  $ref: '{file}.{ext}#/Thing'\n");
            prop_assert!(requires_resolution(doc.as_bytes()));
        }
    }
}
