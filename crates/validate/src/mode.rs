use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How spec check findings affect a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckSpecMode {
    /// Checks are not run.
    #[default]
    None,
    /// Findings are logged.
    Warn,
    /// Findings are logged and the run fails if there are any.
    Fail,
}

impl CheckSpecMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckSpecMode::None => "none",
            CheckSpecMode::Warn => "warn",
            CheckSpecMode::Fail => "fail",
        }
    }
}

impl fmt::Display for CheckSpecMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckSpecMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(CheckSpecMode::None),
            "warn" => Ok(CheckSpecMode::Warn),
            "fail" => Ok(CheckSpecMode::Fail),
            other => Err(format!(
                "unknown check mode '{other}' (expected none|warn|fail)"
            )),
        }
    }
}
