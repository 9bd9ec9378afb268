use oasprobe_spec::SourceFormat;
use std::path::PathBuf;
use thiserror::Error;

/// A file under the scanned root that passed the format sniffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path as produced by the walk (rooted at the scan root).
    pub path: PathBuf,
    /// Format implied by the extension.
    pub format: SourceFormat,
}

impl Candidate {
    /// The identity string recorded on the resulting spec.
    pub fn location(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Why a build-configuration fragment or descriptor could not be read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildConfigError {
    /// The text is not well-formed XML, or it carries a DTD.
    #[error("malformed build configuration: {reason}")]
    Malformed { reason: String },
}

/// A fragment that yielded no paths because it could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedFragment {
    /// Position of the fragment in the scanned input.
    pub index: usize,
    pub error: BuildConfigError,
}

/// Paths declared across a set of build-configuration fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredPaths {
    /// Declared spec paths in fragment order, then document order.
    pub paths: Vec<String>,
    pub rejected: Vec<RejectedFragment>,
}
