//! # hg CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hg_cli::catalog::{run_species, run_thresholds, SpeciesArgs, ThresholdsArgs};
use hg_cli::simulate::{run_simulate, SimulateArgs};
use hg_cli::validate::{run_validate, ValidateArgs};

/// HerGenesis CLI.
///
/// Inspect the species catalog and lifecycle tables, simulate a pet's life
/// offline, and validate lifecycle configuration files.
#[derive(Parser, Debug)]
#[command(name = "hg", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the revivable species.
    Species(SpeciesArgs),

    /// Show interaction gains and evolution thresholds.
    Thresholds(ThresholdsArgs),

    /// Run a pet through an interaction schedule.
    Simulate(SimulateArgs),

    /// Validate lifecycle configuration files.
    ValidateConfig(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Species(args) => run_species(&args),
        Commands::Thresholds(args) => run_thresholds(&args),
        Commands::Simulate(args) => run_simulate(&args),
        Commands::ValidateConfig(args) => run_validate(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
