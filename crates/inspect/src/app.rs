use crate::cli::{Cli, Commands};
use crate::commands::{
    handle_decode_command, handle_inspect_command, handle_scan_command, ScanArgs,
};
use crate::config::apply_config_to_env;
use anyhow::Result;
use clap::Parser;

/// Entry point of the `oasprobe` binary.
///
/// Logs go to stderr (filtered by `RUST_LOG`); results go to stdout.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = apply_config_to_env() {
        tracing::warn!(target: "oasprobe::config", %error, "ignoring unreadable config file");
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan {
            root,
            build_configs,
            poms,
            plugins,
            urls,
            check,
            fetch_timeout_secs,
            unknown_scheme,
            format,
            diagnose,
        } => handle_scan_command(ScanArgs {
            root,
            build_configs,
            poms,
            plugins,
            urls,
            check,
            fetch_timeout_secs,
            unknown_scheme,
            format,
            diagnose,
        }),
        Commands::Inspect {
            location,
            fetch_timeout_secs,
            unknown_scheme,
        } => handle_inspect_command(location, fetch_timeout_secs, unknown_scheme),
        Commands::Decode { content } => handle_decode_command(content),
    }
}
