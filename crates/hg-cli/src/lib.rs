//! # hg-cli: HerGenesis Command-Line Interface
//!
//! Offline tooling around the lifecycle engine. Nothing here talks to the
//! ledger or the narrative service.
//!
//! ## Subcommands
//!
//! - `species`: the species catalog
//! - `thresholds`: the active gains and evolution thresholds
//! - `simulate`: run a pet through an interaction schedule
//! - `validate-config`: check a lifecycle YAML file
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in the `*Args` structs; each `run_*` returns a
//!   process exit code.
//! - Rendering functions return `String` so tests can assert on output.

pub mod catalog;
pub mod simulate;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use hg_state::LifecycleConfig;

/// Load a lifecycle config from `path`, or the built-in table when `None`.
pub fn load_lifecycle(path: Option<&Path>) -> Result<LifecycleConfig> {
    let Some(path) = path else {
        return Ok(LifecycleConfig::default());
    };
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    LifecycleConfig::from_yaml_str(&yaml).with_context(|| format!("invalid lifecycle config {}", path.display()))
}

/// A `width`-segment bar with `filled` segments lit.
pub fn bar(filled: u16, width: u16) -> String {
    let filled = filled.min(width) as usize;
    let width = width as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}
