//! Quality checks over discovered specs.
//!
//! Three checks run per spec: missing servers, plain-HTTP server URLs, and
//! missing security schemes. [`CheckSpecMode`] decides whether findings are
//! ignored, logged, or fail the run.
//!
//! # Example
//!
//! ```rust
//! use oasprobe_spec::Spec;
//! use oasprobe_validate::{enforce, CheckSpecMode};
//!
//! let spec = Spec::new("api.yaml", "/srv/api.yaml");
//! let report = enforce(CheckSpecMode::Warn, &[spec]).unwrap();
//! assert_eq!(report.issues.len(), 2);
//! assert!(enforce(CheckSpecMode::Fail, &[Spec::new("b.yaml", "/b.yaml")]).is_err());
//! ```

pub mod checks;
pub mod common;
pub mod mode;

pub use checks::{check_spec, check_specs};
pub use common::{Check, CheckReport, Severity, SpecIssue};
pub use mode::CheckSpecMode;

use thiserror::Error;

/// Raised in [`CheckSpecMode::Fail`] when any check reports an issue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("spec checks failed with {count} issue(s) across {checked} spec(s)")]
pub struct CheckFailed {
    pub count: usize,
    pub checked: usize,
    pub report: CheckReport,
}

/// Runs the checks according to `mode`.
///
/// `None` skips them and returns an empty report. `Warn` logs each issue.
/// `Fail` logs each issue and returns [`CheckFailed`] if there were any.
pub fn enforce(mode: CheckSpecMode, specs: &[oasprobe_spec::Spec]) -> Result<CheckReport, CheckFailed> {
    if mode == CheckSpecMode::None {
        return Ok(CheckReport::default());
    }

    let report = check_specs(specs);
    for issue in &report.issues {
        tracing::warn!(
            target: "oasprobe::check",
            location = %issue.location,
            check = issue.check.code(),
            severity = ?issue.severity,
            "{}",
            issue.message
        );
    }
    tracing::info!(
        target: "oasprobe::check",
        %mode,
        checked = report.checked,
        errors = report.error_count(),
        warnings = report.warning_count(),
        "spec checks complete"
    );

    if mode == CheckSpecMode::Fail && report.has_issues() {
        return Err(CheckFailed {
            count: report.issues.len(),
            checked: report.checked,
            report,
        });
    }
    Ok(report)
}
