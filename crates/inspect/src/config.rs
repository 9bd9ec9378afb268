//! Configuration file support for oasprobe.
//!
//! Loads settings from `./oasprobe.toml`, falling back to
//! `~/.oasprobe/config.toml`, with the following precedence:
//! CLI arguments > Environment variables > Config file
//!
//! ## Configuration File Format
//!
//! ```toml
//! [scan]
//! # Seconds before a network source counts as failed
//! fetch_timeout_secs = 30
//!
//! # none | warn | fail
//! check = "warn"
//!
//! # Build plugins (groupId:artifactId) whose executions declare specs
//! plugins = ["org.openapitools:openapi-generator-maven-plugin"]
//!
//! # skip | reject
//! unknown_scheme = "skip"
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_FETCH_TIMEOUT_SECS: &str = "OASPROBE_FETCH_TIMEOUT_SECS";
pub const ENV_CHECK_SPECS: &str = "OASPROBE_CHECK_SPECS";
pub const ENV_UNKNOWN_SCHEME: &str = "OASPROBE_UNKNOWN_SCHEME";
pub const ENV_PLUGINS: &str = "OASPROBE_PLUGINS";

const LOCAL_CONFIG: &str = "oasprobe.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Scan command configuration.
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Configuration for the scan command.
#[derive(Debug, Default, Deserialize)]
pub struct ScanConfig {
    pub fetch_timeout_secs: Option<u64>,
    pub check: Option<String>,
    pub plugins: Option<Vec<String>>,
    pub unknown_scheme: Option<String>,
}

/// Returns the config file in effect: `oasprobe.toml` in `cwd` if present,
/// else `~/.oasprobe/config.toml`.
fn config_path(cwd: &Path) -> Option<PathBuf> {
    let local = cwd.join(LOCAL_CONFIG);
    if local.is_file() {
        return Some(local);
    }
    dirs::home_dir().map(|h| h.join(".oasprobe").join("config.toml"))
}

/// Loads the configuration file if it exists.
///
/// Returns `Ok(None)` if the file doesn't exist.
/// Returns `Err` if the file exists but fails to parse.
pub fn load_config() -> Result<Option<Config>> {
    let cwd = std::env::current_dir()?;
    load_config_from(&cwd)
}

fn load_config_from(cwd: &Path) -> Result<Option<Config>> {
    let Some(path) = config_path(cwd) else {
        return Ok(None);
    };

    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&content)?;

    tracing::debug!(
        target: "oasprobe::config",
        path = %path.display(),
        "Loaded configuration file"
    );

    Ok(Some(config))
}

/// Applies configuration file settings to environment variables.
///
/// Only sets environment variables that are not already set, preserving
/// the precedence: CLI > ENV > config file. Call before parsing CLI
/// arguments.
pub fn apply_config_to_env() -> Result<()> {
    if let Some(config) = load_config()? {
        apply_scan_config_to_env(&config.scan);
    }
    Ok(())
}

fn apply_scan_config_to_env(scan: &ScanConfig) {
    fn set_if_absent(key: &str, value: &str) {
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
            tracing::trace!(
                target: "oasprobe::config",
                key,
                "Set environment variable from config file"
            );
        }
    }

    if let Some(secs) = scan.fetch_timeout_secs {
        set_if_absent(ENV_FETCH_TIMEOUT_SECS, &secs.to_string());
    }
    if let Some(ref check) = scan.check {
        set_if_absent(ENV_CHECK_SPECS, check);
    }
    if let Some(ref plugins) = scan.plugins {
        set_if_absent(ENV_PLUGINS, &plugins.join(","));
    }
    if let Some(ref policy) = scan.unknown_scheme {
        set_if_absent(ENV_UNKNOWN_SCHEME, policy);
    }
}
