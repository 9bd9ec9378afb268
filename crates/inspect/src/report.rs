use oasprobe_spec::Spec;
use oasprobe_validate::SpecIssue;
use serde::Serialize;

/// A location that produced no spec, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    pub location: String,
    pub reason: String,
}

impl Skipped {
    pub fn new(location: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    /// Logs the skip at `warn` and returns it.
    pub fn logged(location: impl Into<String>, reason: impl ToString) -> Self {
        let skipped = Self::new(location, reason);
        tracing::warn!(
            target: "oasprobe::pipeline",
            location = %skipped.location,
            reason = %skipped.reason,
            "skipping spec"
        );
        skipped
    }
}

/// Everything one scan produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Specs in merged order: discovered first, then declared.
    pub specs: Vec<Spec>,
    pub skipped: Vec<Skipped>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<SpecIssue>,
}
