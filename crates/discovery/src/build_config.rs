//! Declared spec paths in untrusted build-configuration XML.
//!
//! All XML goes through [`HardenedXml`]: DTDs are refused outright, so no
//! entity (internal or external) is ever declared or expanded, and nothing
//! outside the given text is read.

use crate::types::{BuildConfigError, DeclaredPaths, RejectedFragment};
use roxmltree::{Document, ParsingOptions};

/// Suffixes a file name or leaf text must end with to count as a spec
/// path. Matching is exact and case-sensitive.
pub const SPEC_SUFFIXES: [&str; 3] = [".json", ".yaml", ".yml"];

pub fn has_spec_suffix(value: &str) -> bool {
    SPEC_SUFFIXES.iter().any(|suffix| value.ends_with(suffix))
}

const FRAGMENT_ROOT: &str = "oasprobe-fragment";

/// Upper bound on nodes in one parsed text.
const NODES_LIMIT: u32 = 1_000_000;

/// The fixed parser preset for untrusted XML.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardenedXml;

impl HardenedXml {
    fn options() -> ParsingOptions {
        let mut options = ParsingOptions::default();
        options.allow_dtd = false;
        options.nodes_limit = NODES_LIMIT;
        options
    }

    /// Parses a complete XML document.
    pub fn parse(text: &str) -> Result<Document<'_>, BuildConfigError> {
        Document::parse_with_options(text, Self::options()).map_err(|e| {
            BuildConfigError::Malformed {
                reason: e.to_string(),
            }
        })
    }
}

/// Extracts every leaf element text that ends in a spec suffix.
///
/// `fragment` may be a whole document, a single element, several sibling
/// elements, or bare text; the last two are wrapped in a synthetic root
/// before parsing. Anything carrying a DOCTYPE is rejected.
pub fn declared_spec_paths(fragment: &str) -> Result<Vec<String>, BuildConfigError> {
    let trimmed = fragment.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let wrapped;
    let text = if trimmed.starts_with("<?") || trimmed.starts_with("<!") {
        trimmed
    } else {
        wrapped = format!("<{FRAGMENT_ROOT}>{trimmed}</{FRAGMENT_ROOT}>");
        wrapped.as_str()
    };

    let document = HardenedXml::parse(text)?;
    let paths = document
        .descendants()
        .filter(|node| node.is_element() && !node.children().any(|c| c.is_element()))
        .filter_map(|node| {
            let value: String = node
                .children()
                .filter(|c| c.is_text())
                .filter_map(|c| c.text())
                .collect();
            let value = value.trim();
            has_spec_suffix(value).then(|| value.to_string())
        })
        .collect();
    Ok(paths)
}

/// Scans every fragment, collecting paths in order.
///
/// A fragment that fails to parse contributes no paths and is reported in
/// [`DeclaredPaths::rejected`]; the others are still scanned.
pub fn scan_fragments<I, S>(fragments: I) -> DeclaredPaths
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = DeclaredPaths::default();
    for (index, fragment) in fragments.into_iter().enumerate() {
        match declared_spec_paths(fragment.as_ref()) {
            Ok(paths) => out.paths.extend(paths),
            Err(error) => {
                tracing::warn!(
                    target: "oasprobe::build_config",
                    fragment = index,
                    %error,
                    "ignoring build configuration fragment"
                );
                out.rejected.push(RejectedFragment { index, error });
            }
        }
    }
    out
}
