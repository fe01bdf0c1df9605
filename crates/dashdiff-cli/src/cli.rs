use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dashdiff",
    about = "Fold a flattened document diff into per-field change blocks",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Assemble diff lines into blocks
    Assemble(AssembleArgs),
    /// Check diff lines against the line producer contract
    Check(CheckArgs),
}

#[derive(Args)]
pub struct AssembleArgs {
    /// Diff lines as a JSON array or newline-delimited JSON; stdin when absent or `-`
    pub input: Option<PathBuf>,
    /// Emit blocks and summaries still open at end of input
    #[arg(long)]
    pub flush: bool,
    /// Leave summary counts at zero
    #[arg(long)]
    pub no_count: bool,
    /// TOML file with an [assembler] table
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    pub input: Option<PathBuf>,
}
