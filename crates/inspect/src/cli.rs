use crate::config::{ENV_CHECK_SPECS, ENV_FETCH_TIMEOUT_SECS, ENV_PLUGINS, ENV_UNKNOWN_SCHEME};
use clap::{Parser, Subcommand, ValueEnum};
use oasprobe_spec::UnknownSchemePolicy;
use oasprobe_validate::CheckSpecMode;
use std::path::PathBuf;

/// Output format for scan results.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// One line per spec plus totals.
    Text,
}

/// Command-line interface for the `oasprobe` application.
#[derive(Debug, Parser)]
#[command(
    name = "oasprobe",
    version,
    about = "Discovers, classifies, and packages OpenAPI/Swagger specs in a source tree"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available `oasprobe` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scans a source tree, build configuration, and URLs for specs.
    Scan {
        /// Directory to walk for spec files.
        #[arg(long, value_name = "DIR", default_value = ".")]
        root: PathBuf,
        /// File holding a raw build-configuration fragment (repeatable).
        #[arg(long = "build-config", value_name = "FILE")]
        build_configs: Vec<PathBuf>,
        /// Maven build descriptor whose plugin executions declare specs (repeatable).
        #[arg(long = "pom", value_name = "FILE")]
        poms: Vec<PathBuf>,
        /// Build plugins (`groupId:artifactId`) read from descriptors.
        #[arg(
            long = "plugin",
            value_name = "KEY",
            env = ENV_PLUGINS,
            value_delimiter = ',',
            default_value = oasprobe_discovery::OPENAPI_GENERATOR_PLUGIN
        )]
        plugins: Vec<String>,
        /// Additional network source (repeatable).
        #[arg(long = "url", value_name = "URL")]
        urls: Vec<String>,
        /// Spec checks: none, warn, or fail.
        #[arg(long, value_name = "MODE", env = ENV_CHECK_SPECS, default_value = "none")]
        check: CheckSpecMode,
        /// Seconds before a network source counts as failed.
        #[arg(long, value_name = "SECS", env = ENV_FETCH_TIMEOUT_SECS, default_value_t = 30)]
        fetch_timeout_secs: u64,
        /// Security schemes with an unknown type: skip the entry or reject the spec.
        #[arg(long, value_name = "POLICY", env = ENV_UNKNOWN_SCHEME, default_value = "skip")]
        unknown_scheme: UnknownSchemePolicy,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Include skipped locations and check issues in the output.
        #[arg(long, default_value_t = false)]
        diagnose: bool,
    },
    /// Processes a single location (path or URL) and prints its record.
    Inspect {
        /// File path or `http(s)://` URL.
        location: String,
        /// Seconds before a network source counts as failed.
        #[arg(long, value_name = "SECS", env = ENV_FETCH_TIMEOUT_SECS, default_value_t = 30)]
        fetch_timeout_secs: u64,
        /// Security schemes with an unknown type: skip the entry or reject the spec.
        #[arg(long, value_name = "POLICY", env = ENV_UNKNOWN_SCHEME, default_value = "skip")]
        unknown_scheme: UnknownSchemePolicy,
    },
    /// Decodes a `content` field back to its canonical YAML.
    Decode {
        /// The encoded content, or `-` to read it from stdin.
        content: String,
    },
}
