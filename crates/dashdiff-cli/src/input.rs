use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;

use dashdiff_types::DiffLine;

/// Read diff lines from `path`, or from stdin when `path` is absent or `-`.
pub fn read_lines(path: Option<&Path>) -> anyhow::Result<Vec<DiffLine>> {
    let text = match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            text
        }
    };
    parse_lines(&text)
}

/// Parse a JSON array of diff lines, or one diff line per input line.
pub fn parse_lines(text: &str) -> anyhow::Result<Vec<DiffLine>> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("invalid JSON array of diff lines");
    }

    text.lines()
        .enumerate()
        .filter(|(_, raw)| !raw.trim().is_empty())
        .map(|(index, raw)| {
            serde_json::from_str(raw)
                .with_context(|| format!("invalid diff line on input line {}", index + 1))
        })
        .collect()
}
