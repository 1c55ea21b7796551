//! Stdin prompt helpers for the interactive modes.

use std::io::{self, Write};

use anyhow::{Context, Result};

/// Print `prompt` and read one trimmed line.
///
/// Returns `None` on empty input or EOF — interactive cancellation.
pub fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush().context("flush stdout")?;
    let mut buf = String::new();
    let n = io::stdin().read_line(&mut buf).context("read stdin")?;
    if n == 0 {
        return Ok(None);
    }
    let line = buf.trim();
    if line.is_empty() {
        Ok(None)
    } else {
        Ok(Some(line.to_string()))
    }
}
