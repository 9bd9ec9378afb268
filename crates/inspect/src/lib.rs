//! Orchestration for the `oasprobe` application.
//!
//! The [`pipeline`] walks a source tree, reads build configuration, fetches
//! network sources, and hands every location to
//! [`oasprobe_spec::SpecProcessor`]. The [`merge`] step then appends
//! declared specs that the walk did not find. The main entry point for the
//! binary is [`run`].

#![deny(unsafe_code)]

mod app;
pub mod cli;
mod commands;
pub mod config;
pub mod merge;
pub mod pipeline;
pub mod report;

pub use app::run;
pub use merge::{merge, missing_declared};
pub use pipeline::{descriptor_fragments, read_build_config, Pipeline, ScanRequest};
pub use report::{RunReport, Skipped};
