use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use dashdiff_basic::{AssemblerConfig, UnterminatedPolicy};

use crate::cli::AssembleArgs;

/// Contents of a `dashdiff.toml` file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub assembler: AssemblerConfig,
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }
}

/// Config file first, then command-line flags on top.
pub fn resolve(args: &AssembleArgs) -> anyhow::Result<AssemblerConfig> {
    let mut config = match &args.config {
        Some(path) => Settings::load(path)?.assembler,
        None => AssemblerConfig::default(),
    };
    if args.flush {
        config.on_unterminated = UnterminatedPolicy::Flush;
    }
    if args.no_count {
        config.count_leaves = false;
    }
    Ok(config)
}
