use anyhow::{Context, Result};
use oasprobe_spec::decode_content;
use std::io::{Read, Write};

/// Handle the `decode` command.
pub(crate) fn handle_decode_command(content: String) -> Result<()> {
    let encoded = if content == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read content from stdin")?;
        buf
    } else {
        content
    };
    let decoded = decode_content(&encoded)?;
    std::io::stdout().write_all(&decoded)?;
    Ok(())
}
