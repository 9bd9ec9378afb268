//! Common types for spec checks.

use serde::{Deserialize, Serialize};

/// Severity level for check issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// The spec exposes something unsafe.
    Error,
    /// The spec is incomplete.
    Warning,
}

/// Which check produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Check {
    /// No `servers` are declared.
    NoServers,
    /// A server URL uses plain `http://`.
    InsecureServer,
    /// No security schemes are declared.
    NoSecuritySchemes,
}

impl Check {
    pub fn code(self) -> &'static str {
        match self {
            Check::NoServers => "no-servers",
            Check::InsecureServer => "insecure-server",
            Check::NoSecuritySchemes => "no-security-schemes",
        }
    }
}

/// A single issue found in one spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecIssue {
    /// Severity of the issue.
    pub severity: Severity,
    pub check: Check,
    /// Location of the spec the issue belongs to.
    pub location: String,
    /// Human-readable message.
    pub message: String,
    /// Suggested fix, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl SpecIssue {
    /// Create an error-level issue.
    pub fn error(check: Check, location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            check,
            location: location.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Create a warning-level issue.
    pub fn warning(check: Check, location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            check,
            location: location.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggested fix to the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Issues gathered across a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Number of specs that were checked.
    pub checked: usize,
    pub issues: Vec<SpecIssue>,
}

impl CheckReport {
    /// Returns true if there are any issues at all.
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Returns the number of error-level issues.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warning-level issues.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }
}
