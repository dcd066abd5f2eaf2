//! # Catalog Subcommands
//!
//! `hg species` lists the revivable species; `hg thresholds` prints the
//! gains and the stage table in effect for a lifecycle config.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use hg_core::Species;
use hg_state::{LifeStage, LifecycleConfig};

/// Arguments for `hg species`.
#[derive(Args, Debug)]
pub struct SpeciesArgs {
    /// Print the catalog as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `hg thresholds`.
#[derive(Args, Debug)]
pub struct ThresholdsArgs {
    /// Lifecycle YAML file. Defaults to the built-in table.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print as YAML instead of a table.
    #[arg(long)]
    pub yaml: bool,
}

pub fn run_species(args: &SpeciesArgs) -> Result<u8> {
    if args.json {
        let catalog: Vec<_> = Species::ALL.iter().map(Species::data).collect();
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        print!("{}", render_species());
    }
    Ok(0)
}

pub fn run_thresholds(args: &ThresholdsArgs) -> Result<u8> {
    let config = crate::load_lifecycle(args.config.as_deref())?;
    if args.yaml {
        print!("{}", serde_yaml::to_string(&config)?);
    } else {
        print!("{}", render_thresholds(&config));
    }
    Ok(0)
}

/// One line per species: slug, name, scientific name, extinction, origin.
pub fn render_species() -> String {
    let mut out = String::new();
    for species in Species::ALL {
        let data = species.data();
        let _ = writeln!(
            out,
            "{:<10} {:<15} {:<25} extinct {:<8} {}",
            species.slug(),
            data.name,
            data.scientific_name,
            data.extinction_year,
            data.origin
        );
    }
    out
}

pub fn render_thresholds(config: &LifecycleConfig) -> String {
    let gains = config.gains;
    let mut out = format!(
        "gains: feed +{} | pet +{} | clean +{}\n{:<10} {:>6} {:>8} {:>6}  credit\n",
        gains.feed, gains.pet, gains.clean, "stage", "hunger", "intimacy", "health"
    );
    for stage in LifeStage::ALL {
        let Some(t) = config.thresholds.for_candidate(stage) else {
            continue;
        };
        let _ = writeln!(
            out,
            "{:<10} {:>6} {:>8} {:>6}  +{}",
            stage.to_string(),
            t.hunger,
            t.intimacy,
            t.health,
            stage.population_credit()
        );
    }
    out
}
