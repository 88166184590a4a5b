//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// chils-build - build the CHILS native library and stage it for packaging
#[derive(Parser)]
#[command(name = "chils-build")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the native library and stage it into the package directory
    Build(BuildArgs),

    /// Show the toolchain that would be used
    Toolchain(ToolchainArgs),

    /// Remove the build output tree
    Clean(CleanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Directory containing the makefile (defaults to current directory)
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Build output root to stage into (defaults to build/lib)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Build for this platform class instead of the host (windows, darwin, unix)
    #[arg(long)]
    pub platform: Option<String>,

    /// C compiler passed to the native build as CC
    #[arg(long, env = "CHILS_CC")]
    pub cc: Option<PathBuf>,

    /// Build tool to run instead of make
    #[arg(long)]
    pub make: Option<PathBuf>,

    /// Number of parallel build jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Print the build plan as JSON (no build)
    #[arg(long)]
    pub plan: bool,
}

#[derive(Args)]
pub struct ToolchainArgs {
    /// Directory containing the makefile (defaults to current directory)
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Resolve for this platform class instead of the host
    #[arg(long)]
    pub platform: Option<String>,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Directory containing the makefile (defaults to current directory)
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Build output root to remove (defaults to build/lib)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
