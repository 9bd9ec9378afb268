use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The specification family a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// OpenAPI 3.x, marked by a top-level `openapi` key.
    #[serde(rename = "OpenAPI")]
    OpenApi,
    /// Swagger 2.0, marked by a top-level `swagger` key.
    #[serde(rename = "swagger")]
    Swagger,
}

impl Dialect {
    /// The top-level key that marks this dialect.
    pub fn marker(self) -> &'static str {
        match self {
            Dialect::OpenApi => "openapi",
            Dialect::Swagger => "swagger",
        }
    }

    /// The tag written to the `type` field of a [`Spec`].
    pub fn label(self) -> &'static str {
        match self {
            Dialect::OpenApi => "OpenAPI",
            Dialect::Swagger => "swagger",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Serialization format of a source document, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Extensions accepted as spec candidates.
    pub const EXTENSIONS: [&'static str; 3] = ["json", "yaml", "yml"];

    /// Picks the format for a path or URL.
    ///
    /// `.json` selects JSON; anything else is read as YAML, which is also a
    /// superset of JSON.
    pub fn from_location(location: &str) -> Self {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        if path.to_ascii_lowercase().ends_with(".json") {
            SourceFormat::Json
        } else {
            SourceFormat::Yaml
        }
    }

    /// Returns the format for a bare extension, if it is a candidate extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(SourceFormat::Json),
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            _ => None,
        }
    }
}

/// One discovered specification.
///
/// `location` is the identity key: two specs with the same location are the
/// same entity. Optional fields are omitted from JSON output when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spec {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,
    pub name: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_version: Option<String>,
    /// Gzip-compressed, base64-encoded canonical YAML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub requires_resolution: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub security_schemes: BTreeMap<String, SecurityScheme>,
}

impl Spec {
    /// Creates an empty record for `location`.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            dialect: None,
            name: name.into(),
            location: location.into(),
            version: None,
            info_version: None,
            content: None,
            requires_resolution: false,
            servers: Vec::new(),
            security_schemes: BTreeMap::new(),
        }
    }
}

/// A `servers` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    pub fn new(url: Option<String>, description: Option<String>) -> Self {
        Self { url, description }
    }
}

/// A security scheme, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SecurityScheme {
    #[serde(rename = "apiKey")]
    ApiKey {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
        r#in: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename = "http")]
    Http {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scheme: Option<String>,
        #[serde(
            rename = "bearerFormat",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        bearer_format: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename = "oauth2")]
    OAuth2 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        flows: BTreeMap<String, OAuthFlow>,
    },
    #[serde(rename = "openIdConnect")]
    OpenIdConnect {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(
            rename = "openIdConnectUrl",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        open_id_connect_url: Option<String>,
    },
}

impl SecurityScheme {
    /// The `type` discriminator as written in documents.
    pub fn kind(&self) -> &'static str {
        match self {
            SecurityScheme::ApiKey { .. } => "apiKey",
            SecurityScheme::Http { .. } => "http",
            SecurityScheme::OAuth2 { .. } => "oauth2",
            SecurityScheme::OpenIdConnect { .. } => "openIdConnect",
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            SecurityScheme::ApiKey { description, .. }
            | SecurityScheme::Http { description, .. }
            | SecurityScheme::OAuth2 { description, .. }
            | SecurityScheme::OpenIdConnect { description, .. } => description.as_deref(),
        }
    }
}

/// One OAuth2 flow (`implicit`, `password`, `clientCredentials`, `authorizationCode`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scopes: BTreeMap<String, String>,
}
