//! Command-line interface for the `oasprobe` application.
//!
//! This crate serves as the main entry point for the executable, delegating
//! its core functionality to the `oasprobe-inspect` crate.

fn main() -> anyhow::Result<()> {
    oasprobe_inspect::run()
}
