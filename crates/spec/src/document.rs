//! The in-memory document tree shared by extraction and resolution.
//!
//! JSON and YAML sources both parse into [`serde_yaml::Value`], a recursive
//! mapping/sequence/scalar sum type that keeps key order and tolerates the
//! non-string keys YAML allows (`200:` under `responses`).

use crate::error::SpecError;
use crate::model::SourceFormat;
use serde_yaml::Value;

/// Parses raw bytes as the given format.
pub fn parse_document(bytes: &[u8], format: SourceFormat, location: &str) -> Result<Value, SpecError> {
    match format {
        SourceFormat::Json => {
            serde_json::from_slice::<Value>(bytes).map_err(|e| SpecError::parse(location, e))
        }
        SourceFormat::Yaml => {
            serde_yaml::from_slice::<Value>(bytes).map_err(|e| SpecError::parse(location, e))
        }
    }
}

/// Renders a scalar the way it reads in the document.
///
/// Numbers and booleans are stringified (`swagger: 2.0` gives `"2.0"`);
/// mappings, sequences, and null yield `None`.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Removes every key in `fields` from every mapping in the tree, at any depth.
pub fn strip_fields(value: &mut Value, fields: &[&str]) {
    match value {
        Value::Mapping(map) => {
            for field in fields {
                map.remove(*field);
            }
            for (_, child) in map.iter_mut() {
                strip_fields(child, fields);
            }
        }
        Value::Sequence(items) => {
            for item in items.iter_mut() {
                strip_fields(item, fields);
            }
        }
        Value::Tagged(tagged) => strip_fields(&mut tagged.value, fields),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

/// Serializes a tree as YAML without a leading document marker.
pub fn to_yaml(value: &Value) -> Result<String, SpecError> {
    let text = serde_yaml::to_string(value).map_err(|e| SpecError::Encoding(e.to_string()))?;
    Ok(match text.strip_prefix("---\n") {
        Some(rest) => rest.to_string(),
        None => text,
    })
}
