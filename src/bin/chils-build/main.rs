//! chils-build CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chils_build::BuildError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        if let Some(help) = e
            .chain()
            .find_map(|cause| cause.downcast_ref::<BuildError>())
            .and_then(BuildError::help)
        {
            eprintln!("{}", help);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("chils_build=debug")
    } else {
        EnvFilter::new("chils_build=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Build(args) => commands::build::execute(args),
        Commands::Toolchain(args) => commands::toolchain::execute(args),
        Commands::Clean(args) => commands::clean::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
