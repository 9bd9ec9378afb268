//! Spec classification and metadata extraction.
//!
//! Reads a parsed document and fills in the dialect, versions, servers, and
//! security schemes of a [`Spec`]. Failures here are scoped to one file.

use crate::document::{parse_document, scalar_string};
use crate::error::SpecError;
use crate::model::{Dialect, SecurityScheme, Server, SourceFormat, Spec};
use crate::refs::requires_resolution;
use crate::security::parse_security_scheme;
use crate::source::display_name;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

/// Placeholder for a server entry without `url` in a JSON source.
pub const NO_URL: &str = "No URL";
/// Placeholder for a server entry without `description` in a JSON source.
pub const NO_DESCRIPTION: &str = "No Description";

/// What to do with a security scheme whose `type` is not one of the four
/// known variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownSchemePolicy {
    /// Drop that one entry with a warning and keep extracting.
    #[default]
    Skip,
    /// Abort extraction of the whole spec.
    Reject,
}

impl std::str::FromStr for UnknownSchemePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(UnknownSchemePolicy::Skip),
            "reject" => Ok(UnknownSchemePolicy::Reject),
            other => Err(format!("unknown scheme policy '{other}' (expected skip|reject)")),
        }
    }
}

/// Knobs for [`extract`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    pub unknown_scheme: UnknownSchemePolicy,
}

/// How a missing `url`/`description` in a `servers` entry is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingServerField {
    /// Substitute [`NO_URL`] / [`NO_DESCRIPTION`].
    Placeholder,
    /// Leave the field unset.
    Null,
}

impl MissingServerField {
    /// JSON sources get placeholders, YAML sources get nulls.
    pub fn for_format(format: SourceFormat) -> Self {
        match format {
            SourceFormat::Json => MissingServerField::Placeholder,
            SourceFormat::Yaml => MissingServerField::Null,
        }
    }

    fn fill(self, value: Option<String>, placeholder: &str) -> Option<String> {
        match self {
            MissingServerField::Placeholder => value.or_else(|| Some(placeholder.to_string())),
            MissingServerField::Null => value,
        }
    }
}

/// A classified spec plus the document tree it was read from.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub spec: Spec,
    pub document: Value,
    pub format: SourceFormat,
}

/// Classifies `bytes` read from `location` and extracts its metadata.
///
/// `content` is left unset; packaging fills it in.
pub fn extract(
    bytes: &[u8],
    location: &str,
    format: SourceFormat,
    options: ExtractOptions,
) -> Result<Extraction, SpecError> {
    let document = parse_document(bytes, format, location)?;
    let root = document
        .as_mapping()
        .ok_or_else(|| SpecError::UnrecognizedDialect {
            location: location.to_string(),
        })?;

    let (dialect, version) = classify(root).ok_or_else(|| SpecError::UnrecognizedDialect {
        location: location.to_string(),
    })?;

    let mut spec = Spec::new(display_name(location), location);
    spec.dialect = Some(dialect);
    spec.version = version;
    spec.info_version = info_version(root, location)?;
    spec.servers = extract_servers(root, format, location);
    spec.security_schemes = extract_security_schemes(root, location, options.unknown_scheme)?;
    spec.requires_resolution = requires_resolution(bytes);

    tracing::debug!(
        target: "oasprobe::extract",
        location,
        dialect = %dialect,
        version = spec.version.as_deref().unwrap_or(""),
        servers = spec.servers.len(),
        schemes = spec.security_schemes.len(),
        requires_resolution = spec.requires_resolution,
        "classified spec"
    );

    Ok(Extraction {
        spec,
        document,
        format,
    })
}

/// Returns the dialect and its version string; `openapi` wins over `swagger`.
pub fn classify(root: &Mapping) -> Option<(Dialect, Option<String>)> {
    [Dialect::OpenApi, Dialect::Swagger]
        .into_iter()
        .find_map(|dialect| {
            root.get(dialect.marker())
                .map(|value| (dialect, scalar_string(value)))
        })
}

fn info_version(root: &Mapping, location: &str) -> Result<Option<String>, SpecError> {
    let info = match root.get("info") {
        None | Some(Value::Null) => return Ok(None),
        Some(info) => info,
    };
    let malformed = |message: &str| SpecError::MalformedInfo {
        location: location.to_string(),
        message: message.to_string(),
    };
    let info = info
        .as_mapping()
        .ok_or_else(|| malformed("'info' is not an object"))?;
    let version = info
        .get("version")
        .ok_or_else(|| malformed("'info.version' is missing"))?;
    scalar_string(version)
        .map(Some)
        .ok_or_else(|| malformed("'info.version' is not a scalar"))
}

/// Reads `servers` in document order.
///
/// Missing fields are filled per [`MissingServerField::for_format`]. Entries
/// that are not objects are skipped, and a non-sequence `servers` value
/// yields no servers; both are logged.
pub fn extract_servers(root: &Mapping, format: SourceFormat, location: &str) -> Vec<Server> {
    let policy = MissingServerField::for_format(format);
    let Some(servers) = root.get("servers") else {
        return Vec::new();
    };
    let Some(entries) = servers.as_sequence() else {
        tracing::warn!(target: "oasprobe::extract", location, "'servers' is not a list; ignoring it");
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let Some(entry) = entry.as_mapping() else {
                tracing::warn!(
                    target: "oasprobe::extract",
                    location,
                    index,
                    "server entry is not an object; skipping it"
                );
                return None;
            };
            let url = entry.get("url").and_then(scalar_string);
            let description = entry.get("description").and_then(scalar_string);
            Some(Server::new(
                policy.fill(url, NO_URL),
                policy.fill(description, NO_DESCRIPTION),
            ))
        })
        .collect()
}

/// Reads the scheme container: `components.securitySchemes` when the
/// document has `components`, top-level `securityDefinitions` otherwise.
pub fn extract_security_schemes(
    root: &Mapping,
    location: &str,
    policy: UnknownSchemePolicy,
) -> Result<BTreeMap<String, SecurityScheme>, SpecError> {
    let container = match root.get("components") {
        Some(components) => components.get("securitySchemes"),
        None => root.get("securityDefinitions"),
    };
    let Some(entries) = container.and_then(Value::as_mapping) else {
        return Ok(BTreeMap::new());
    };

    let mut schemes = BTreeMap::new();
    for (key, raw) in entries {
        let Some(name) = scalar_string(key) else {
            continue;
        };
        match parse_security_scheme(&name, raw) {
            Ok(scheme) => {
                schemes.insert(name, scheme);
            }
            Err(err @ SpecError::UnknownSecuritySchemeType { .. })
                if policy == UnknownSchemePolicy::Reject =>
            {
                return Err(err);
            }
            Err(err) => {
                tracing::warn!(
                    target: "oasprobe::extract",
                    location,
                    scheme = %name,
                    error = %err,
                    "could not parse security scheme; dropping it"
                );
            }
        }
    }
    Ok(schemes)
}
