//! Command-line interface definitions.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI entry point for the browser policy generator.
#[derive(Parser, Debug)]
#[command(
    name = "policygen",
    about = "Generate macOS, Windows and Linux browser policy files from one YAML source",
    version
)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Policy source file
    #[arg(short, long, global = true, default_value = "policies.yaml")]
    pub input: PathBuf,

    /// Directory the macos/, windows/ and linux/ outputs are written under
    #[arg(short, long, global = true, default_value = "generated")]
    pub output: PathBuf,

    /// Transcode everything but write no files
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate policy files for every platform
    Generate(GenerateOpts),
    /// Check the policy source without writing anything
    Validate,
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the per-command log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Generate(_) => "generate",
            Self::Validate => "validate",
            Self::Version => "version",
        }
    }
}

/// Options for the `generate` subcommand.
#[derive(Args, Debug, Clone)]
pub struct GenerateOpts {
    /// Generate only these browsers (chrome, brave, edge)
    #[arg(short, long, value_delimiter = ',')]
    pub browser: Vec<String>,
}
