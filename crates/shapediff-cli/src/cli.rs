use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shapediff",
    about = "Structural JSON diff: minimal patches and default reconciliation",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with sync settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show what UPDATED changes relative to ORIGINAL
    Diff(DiffArgs),
    /// List the leaves of a JSON document by dotted path
    Flatten(FlattenArgs),
    /// Print the value at a dotted path
    Get(GetArgs),
    /// Write every leaf of a patch onto a target document
    Apply(ApplyArgs),
    /// Bring a model in line with a new set of defaults
    Sync(SyncArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub updated: PathBuf,
    /// Omit to diff against nothing
    pub original: Option<PathBuf>,
}

#[derive(Args)]
pub struct FlattenArgs {
    pub patch: PathBuf,
}

#[derive(Args)]
pub struct GetArgs {
    pub file: PathBuf,
    pub path: String,
}

#[derive(Args)]
pub struct ApplyArgs {
    pub target: PathBuf,
    pub patch: PathBuf,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SyncArgs {
    pub model: PathBuf,
    /// Omit to clear the model
    pub defaults: Option<PathBuf>,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(long)]
    pub no_prune: bool,
    #[arg(long)]
    pub max_depth: Option<usize>,
}
