use crate::common::{Check, CheckReport, SpecIssue};
use oasprobe_spec::Spec;

const INSECURE_SCHEME: &str = "http://";

/// Runs every check against one spec.
pub fn check_spec(spec: &Spec) -> Vec<SpecIssue> {
    let mut issues = Vec::new();
    let location = spec.location.as_str();

    if spec.servers.is_empty() {
        issues.push(
            SpecIssue::warning(
                Check::NoServers,
                location,
                format!("{} declares no servers", spec.name),
            )
            .with_suggestion("add a `servers` entry (or `host` for Swagger 2)"),
        );
    }

    for url in spec.servers.iter().filter_map(|s| s.url.as_deref()) {
        let is_insecure = url
            .get(..INSECURE_SCHEME.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(INSECURE_SCHEME));
        if is_insecure {
            issues.push(
                SpecIssue::error(
                    Check::InsecureServer,
                    location,
                    format!("{} uses insecure server URL {url}", spec.name),
                )
                .with_suggestion("serve the API over https://"),
            );
        }
    }

    if spec.security_schemes.is_empty() {
        issues.push(SpecIssue::warning(
            Check::NoSecuritySchemes,
            location,
            format!("{} declares no security schemes", spec.name),
        ));
    }

    issues
}

/// Checks every spec, keeping issues in spec order.
pub fn check_specs(specs: &[Spec]) -> CheckReport {
    CheckReport {
        checked: specs.len(),
        issues: specs.iter().flat_map(check_spec).collect(),
    }
}
