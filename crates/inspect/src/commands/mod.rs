//! CLI command handlers for the oasprobe application.

mod decode;
mod inspect;
mod scan;

pub(crate) use decode::handle_decode_command;
pub(crate) use inspect::handle_inspect_command;
pub(crate) use scan::{handle_scan_command, ScanArgs};
