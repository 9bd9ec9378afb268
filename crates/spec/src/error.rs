//! Error types for spec processing.
//!
//! Every variant names the location it concerns so a skipped file can be
//! reported with a human-readable cause.

use thiserror::Error;

/// Errors raised while reading, classifying, resolving, or packaging a spec.
///
/// All of these are scoped to a single location: callers drop the affected
/// spec and continue with the rest of the run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpecError {
    /// The local file could not be read.
    #[error("failed to read '{location}': {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// A network source could not be fetched.
    #[error("failed to fetch '{location}': {message}")]
    Fetch { location: String, message: String },

    /// A network source did not answer within the configured timeout.
    #[error("timed out after {secs}s fetching '{location}'")]
    Timeout { location: String, secs: u64 },

    /// The document is not valid JSON or YAML.
    #[error("failed to parse '{location}': {message}")]
    Parse { location: String, message: String },

    /// The document has neither an `openapi` nor a `swagger` key.
    #[error("'{location}' is neither an OpenAPI nor a Swagger document")]
    UnrecognizedDialect { location: String },

    /// `info` is present but is not an object carrying `version`.
    #[error("'{location}' has a malformed info block: {message}")]
    MalformedInfo { location: String, message: String },

    /// A security scheme entry has the wrong shape.
    #[error("invalid security scheme '{name}': {message}")]
    InvalidSecurityScheme { name: String, message: String },

    /// A security scheme entry declares a `type` outside the four known variants.
    #[error("unknown security scheme type '{kind}' for '{name}'")]
    UnknownSecuritySchemeType { name: String, kind: String },

    /// External references could not be flattened.
    #[error("failed to resolve '{location}': {message}")]
    Resolution { location: String, message: String },

    /// Canonical content could not be compressed or encoded.
    #[error("failed to encode content: {0}")]
    Encoding(String),
}

impl SpecError {
    pub(crate) fn parse(location: impl Into<String>, message: impl ToString) -> Self {
        SpecError::Parse {
            location: location.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn resolution(location: impl Into<String>, message: impl Into<String>) -> Self {
        SpecError::Resolution {
            location: location.into(),
            message: message.into(),
        }
    }
}
