//! Security scheme parsing.
//!
//! Turns one raw entry of `components.securitySchemes` (OpenAPI 3.x) or
//! `securityDefinitions` (Swagger 2.0) into a [`SecurityScheme`] variant,
//! selected by the entry's `type`.

use crate::document::scalar_string;
use crate::error::SpecError;
use crate::model::{OAuthFlow, SecurityScheme};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

/// Parses a single named security scheme entry.
///
/// Fails with [`SpecError::UnknownSecuritySchemeType`] when `type` is not one
/// of `apiKey`, `http`, `oauth2`, `openIdConnect`, and with
/// [`SpecError::InvalidSecurityScheme`] when the entry is not an object, has no
/// `type`, or is an `oauth2` entry without any flow.
pub fn parse_security_scheme(name: &str, raw: &Value) -> Result<SecurityScheme, SpecError> {
    let map = raw.as_mapping().ok_or_else(|| invalid(name, "expected an object"))?;
    let kind = map
        .get("type")
        .and_then(scalar_string)
        .ok_or_else(|| invalid(name, "missing 'type'"))?;

    let scheme = match kind.as_str() {
        "apiKey" => SecurityScheme::ApiKey {
            name: text(map, "name"),
            r#in: text(map, "in"),
            description: text(map, "description"),
        },
        "http" => SecurityScheme::Http {
            scheme: text(map, "scheme"),
            bearer_format: text(map, "bearerFormat"),
            description: text(map, "description"),
        },
        "oauth2" => SecurityScheme::OAuth2 {
            description: text(map, "description"),
            flows: oauth_flows(name, map)?,
        },
        "openIdConnect" => SecurityScheme::OpenIdConnect {
            description: text(map, "description"),
            open_id_connect_url: text(map, "openIdConnectUrl"),
        },
        _ => {
            return Err(SpecError::UnknownSecuritySchemeType {
                name: name.to_string(),
                kind,
            })
        }
    };
    Ok(scheme)
}

fn invalid(name: &str, message: &str) -> SpecError {
    SpecError::InvalidSecurityScheme {
        name: name.to_string(),
        message: message.to_string(),
    }
}

fn text(map: &Mapping, key: &str) -> Option<String> {
    map.get(key).and_then(scalar_string)
}

/// Reads OAuth2 flows.
///
/// OpenAPI 3.x nests them under `flows`; Swagger 2.0 declares a single flow
/// inline with its name in `flow`.
fn oauth_flows(name: &str, map: &Mapping) -> Result<BTreeMap<String, OAuthFlow>, SpecError> {
    if let Some(flows) = map.get("flows") {
        let flows = flows
            .as_mapping()
            .ok_or_else(|| invalid(name, "'flows' must be an object"))?;
        let mut out = BTreeMap::new();
        for (flow_name, flow) in flows {
            let flow_name = scalar_string(flow_name)
                .ok_or_else(|| invalid(name, "flow names must be scalars"))?;
            let flow = flow
                .as_mapping()
                .ok_or_else(|| invalid(name, "each flow must be an object"))?;
            out.insert(flow_name, oauth_flow(flow));
        }
        return Ok(out);
    }

    if let Some(flow_name) = text(map, "flow") {
        return Ok(BTreeMap::from([(flow_name, oauth_flow(map))]));
    }

    Err(invalid(name, "oauth2 scheme declares no flows"))
}

fn oauth_flow(map: &Mapping) -> OAuthFlow {
    let scopes = map
        .get("scopes")
        .and_then(Value::as_mapping)
        .map(|scopes| {
            scopes
                .iter()
                .filter_map(|(scope, desc)| {
                    Some((scalar_string(scope)?, scalar_string(desc).unwrap_or_default()))
                })
                .collect()
        })
        .unwrap_or_default();

    OAuthFlow {
        authorization_url: text(map, "authorizationUrl"),
        token_url: text(map, "tokenUrl"),
        refresh_url: text(map, "refreshUrl"),
        scopes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(src: &str) -> Value {
        serde_yaml::from_str(src).unwrap()
    }

    #[test]
    fn parses_api_key() {
        let scheme =
            parse_security_scheme("apiKeyAuth", &yaml("type: apiKey\nname: X-Key\nin: header"))
                .unwrap();
        assert_eq!(
            scheme,
            SecurityScheme::ApiKey {
                name: Some("X-Key".into()),
                r#in: Some("header".into()),
                description: None,
            }
        );
    }

    #[test]
    fn parses_http_bearer() {
        let scheme = parse_security_scheme(
            "bearer",
            &yaml("type: http\nscheme: bearer\nbearerFormat: JWT\ndescription: tokens"),
        )
        .unwrap();
        match scheme {
            SecurityScheme::Http {
                scheme,
                bearer_format,
                description,
            } => {
                assert_eq!(scheme.as_deref(), Some("bearer"));
                assert_eq!(bearer_format.as_deref(), Some("JWT"));
                assert_eq!(description.as_deref(), Some("tokens"));
            }
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn parses_oauth2_flows_with_scopes() {
        let raw = yaml(
            r#"
type: oauth2
flows:
  authorizationCode:
    authorizationUrl: https://auth.example.com/authorize
    tokenUrl: https://auth.example.com/token
    scopes:
      read:pets: read your pets
      write:pets: modify pets
  clientCredentials:
    tokenUrl: https://auth.example.com/token
"#,
        );
        let SecurityScheme::OAuth2 { flows, .. } = parse_security_scheme("petstore", &raw).unwrap()
        else {
            panic!("expected oauth2");
        };
        assert_eq!(flows.len(), 2);
        let code = &flows["authorizationCode"];
        assert_eq!(
            code.authorization_url.as_deref(),
            Some("https://auth.example.com/authorize")
        );
        assert_eq!(code.scopes["read:pets"], "read your pets");
        assert!(flows["clientCredentials"].scopes.is_empty());
    }

    #[test]
    fn parses_swagger2_inline_oauth2_flow() {
        let raw = yaml(
            "type: oauth2\nflow: implicit\nauthorizationUrl: https://a/auth\nscopes:\n  admin: all",
        );
        let SecurityScheme::OAuth2 { flows, .. } = parse_security_scheme("legacy", &raw).unwrap()
        else {
            panic!("expected oauth2");
        };
        assert_eq!(flows["implicit"].authorization_url.as_deref(), Some("https://a/auth"));
        assert_eq!(flows["implicit"].scopes["admin"], "all");
    }

    #[test]
    fn parses_open_id_connect() {
        let scheme = parse_security_scheme(
            "oidc",
            &yaml("type: openIdConnect\nopenIdConnectUrl: https://id/.well-known"),
        )
        .unwrap();
        assert_eq!(scheme.kind(), "openIdConnect");
    }

    #[test]
    fn unknown_type_is_a_distinct_error() {
        let err = parse_security_scheme("basic", &yaml("type: basic")).unwrap_err();
        assert!(matches!(
            err,
            SpecError::UnknownSecuritySchemeType { ref kind, .. } if kind == "basic"
        ));
    }

    #[test]
    fn malformed_entries_are_invalid() {
        assert!(matches!(
            parse_security_scheme("a", &yaml("just a string")),
            Err(SpecError::InvalidSecurityScheme { .. })
        ));
        assert!(matches!(
            parse_security_scheme("b", &yaml("name: X-Key")),
            Err(SpecError::InvalidSecurityScheme { .. })
        ));
        assert!(matches!(
            parse_security_scheme("c", &yaml("type: oauth2")),
            Err(SpecError::InvalidSecurityScheme { .. })
        ));
    }
}
