use anyhow::Result;
use oasprobe_spec::{ExtractOptions, SpecProcessor, UnknownSchemePolicy};
use std::time::Duration;

/// Handle the `inspect` command.
pub(crate) fn handle_inspect_command(
    location: String,
    fetch_timeout_secs: u64,
    unknown_scheme: UnknownSchemePolicy,
) -> Result<()> {
    let processor = SpecProcessor::with_timeout(
        Duration::from_secs(fetch_timeout_secs),
        ExtractOptions { unknown_scheme },
    )?;
    let spec = processor.process(&location)?;
    println!("{}", serde_json::to_string_pretty(&spec)?);
    Ok(())
}
