use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read the code under review from a file, or from stdin when no file is given.
///
/// Rejects empty input up front so no prompt is ever built for it.
pub fn read_source(file: Option<&Path>) -> Result<String> {
    let source = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read code from stdin")?;
            buf
        }
    };

    if source.trim().is_empty() {
        bail!("no code to review; pass a file or pipe code on stdin");
    }

    Ok(source)
}
