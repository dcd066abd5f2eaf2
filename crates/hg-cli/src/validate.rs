//! # Validate-Config Subcommand
//!
//! `hg validate-config PATH...` parses each lifecycle YAML file and checks
//! the threshold invariants. Exit code 0 when every file passes, 1 otherwise.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use hg_state::LifecycleConfig;

/// Arguments for `hg validate-config`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Lifecycle YAML files to check.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let mut had_failures = false;
    for path in &args.paths {
        match validate_file(path) {
            Ok(()) => println!("OK    {}", path.display()),
            Err(reason) => {
                had_failures = true;
                println!("FAIL  {}: {reason}", path.display());
            }
        }
    }
    Ok(u8::from(had_failures))
}

/// Validate one file, returning the failure reason.
pub fn validate_file(path: &std::path::Path) -> Result<(), String> {
    let yaml = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    LifecycleConfig::from_yaml_str(&yaml)
        .map(|_| ())
        .map_err(|e| e.to_string())
}
