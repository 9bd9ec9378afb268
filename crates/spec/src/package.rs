//! Canonical form and transport encoding of spec content.
//!
//! The canonical form is YAML. It is always stored gzip-compressed and
//! base64-encoded, never raw.

use crate::document::to_yaml;
use crate::error::SpecError;
use crate::model::SourceFormat;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use flate2::read::GzDecoder;
use flate2::{write::GzEncoder, Compression};
use serde_yaml::Value;
use std::io::{Read, Write};

/// Canonical YAML for a document that needs no resolution.
///
/// YAML sources are kept byte for byte; JSON sources are re-serialized as
/// YAML from their parsed tree.
pub fn canonical_unresolved(
    raw: &[u8],
    document: &Value,
    format: SourceFormat,
) -> Result<Vec<u8>, SpecError> {
    match format {
        SourceFormat::Yaml => Ok(raw.to_vec()),
        SourceFormat::Json => Ok(to_yaml(document)?.into_bytes()),
    }
}

/// Gzip-compresses and base64-encodes canonical content.
pub fn encode_content(canonical: &[u8]) -> Result<String, SpecError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(canonical)
        .map_err(|e| SpecError::Encoding(e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| SpecError::Encoding(e.to_string()))?;
    Ok(BASE64.encode(compressed))
}

/// Inverse of [`encode_content`].
pub fn decode_content(content: &str) -> Result<Vec<u8>, SpecError> {
    let compressed = BASE64
        .decode(content.trim())
        .map_err(|e| SpecError::Encoding(format!("invalid base64: {e}")))?;
    let mut decoder = GzDecoder::new(&compressed[..]);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| SpecError::Encoding(format!("invalid gzip stream: {e}")))?;
    Ok(out)
}
