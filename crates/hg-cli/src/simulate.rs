//! # Simulate Subcommand
//!
//! Runs a freshly minted pet through a repeating interaction schedule and
//! reports each stage transition with the population credit it earns.
//!
//! ```text
//! hg simulate --species dodo --schedule feed,pet,clean
//! ```

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use hg_core::{PetId, Species, Timestamp};
use hg_state::{
    InteractionKind, LifeStage, LifecycleEngine, Pet, StageTransition, MINT_POPULATION_CREDIT,
};

/// Segments per stat bar.
const BAR_WIDTH: u16 = 10;

/// Arguments for `hg simulate`.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Species to mint.
    #[arg(long, default_value = "dodo")]
    pub species: String,

    /// Comma-separated interactions, repeated in order.
    #[arg(long, default_value = "feed,pet,clean")]
    pub schedule: String,

    /// Stop after this many interactions even if the pet is not yet a
    /// matriarch.
    #[arg(long, default_value_t = 1000)]
    pub max_steps: usize,

    /// Lifecycle YAML file. Defaults to the built-in table.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// A transition observed during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulatedTransition {
    /// 1-based interaction count at which the transition happened.
    pub step: usize,
    pub trigger: InteractionKind,
    pub transition: StageTransition,
    pub population_credit: u64,
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub pet: Pet,
    pub steps: usize,
    pub transitions: Vec<SimulatedTransition>,
    /// Mint credit plus every transition credit.
    pub population_credit: u64,
}

pub fn run_simulate(args: &SimulateArgs) -> Result<u8> {
    let species: Species = args.species.parse()?;
    let schedule = parse_schedule(&args.schedule)?;
    let engine = LifecycleEngine::new(crate::load_lifecycle(args.config.as_deref())?)?;

    let report = simulate(&engine, species, &schedule, args.max_steps)?;
    tracing::info!(
        steps = report.steps,
        stage = %report.pet.stage,
        completed = completed(&report),
        "simulation finished"
    );
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(0)
}

pub fn parse_schedule(raw: &str) -> Result<Vec<InteractionKind>> {
    let schedule = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<InteractionKind>().map_err(anyhow::Error::msg))
        .collect::<Result<Vec<_>>>()?;
    if schedule.is_empty() {
        bail!("schedule must name at least one interaction");
    }
    Ok(schedule)
}

/// Apply `schedule` cyclically until the pet reaches the terminal stage or
/// `max_steps` interactions have run.
pub fn simulate(
    engine: &LifecycleEngine,
    species: Species,
    schedule: &[InteractionKind],
    max_steps: usize,
) -> Result<SimulationReport> {
    let mut pet = Pet::minted(PetId::new(), species, 0, Timestamp::now());
    let mut transitions = Vec::new();
    let mut steps = 0;

    for kind in schedule.iter().copied().cycle().take(max_steps) {
        if pet.stage.is_terminal() {
            break;
        }
        let result = engine.apply(pet, kind)?;
        steps += 1;
        if let Some(transition) = result.transition {
            tracing::debug!(step = steps, from = %transition.from, to = %transition.to, "transition");
            transitions.push(SimulatedTransition {
                step: steps,
                trigger: kind,
                transition,
                population_credit: transition.population_delta(),
            });
        }
        pet = result.pet;
    }

    let population_credit =
        MINT_POPULATION_CREDIT + transitions.iter().map(|t| t.population_credit).sum::<u64>();
    Ok(SimulationReport {
        pet,
        steps,
        transitions,
        population_credit,
    })
}

pub fn render_report(report: &SimulationReport) -> String {
    let mut out = format!("{} ({})\n", report.pet.name, report.pet.species.data().scientific_name);
    for t in &report.transitions {
        let _ = writeln!(
            out,
            "step {:>4}  {:<6} {} -> {}  +{}",
            t.step,
            t.trigger.as_str(),
            t.transition.from,
            t.transition.to,
            t.population_credit
        );
    }
    let stats = report.pet.stats;
    let (hunger, intimacy, health) = stats.filled_chunks(BAR_WIDTH);
    let _ = writeln!(out, "hunger   {} {}", crate::bar(hunger, BAR_WIDTH), stats.hunger);
    let _ = writeln!(out, "intimacy {} {}", crate::bar(intimacy, BAR_WIDTH), stats.intimacy);
    let _ = writeln!(out, "health   {} {}", crate::bar(health, BAR_WIDTH), stats.health);
    let _ = writeln!(
        out,
        "stage {} after {} interactions, population credit {}",
        report.pet.stage, report.steps, report.population_credit
    );
    out
}

/// Whether the run reached the terminal stage.
pub fn completed(report: &SimulationReport) -> bool {
    report.pet.stage == LifeStage::Matriarch
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_cycle() -> Vec<InteractionKind> {
        parse_schedule("feed,pet,clean").unwrap()
    }

    #[test]
    fn balanced_schedule_reaches_matriarch_in_sixty_steps() {
        let report = simulate(&LifecycleEngine::default(), Species::Dodo, &full_cycle(), 1000).unwrap();
        assert!(completed(&report));
        assert_eq!(report.steps, 60);
        let stages: Vec<LifeStage> = report.transitions.iter().map(|t| t.transition.to).collect();
        assert_eq!(stages, vec![LifeStage::Adult, LifeStage::Breeding, LifeStage::Matriarch]);
        assert_eq!(
            report.transitions.iter().map(|t| t.step).collect::<Vec<_>>(),
            vec![9, 30, 60]
        );
        assert_eq!(report.population_credit, 5);
    }

    #[test]
    fn one_sided_schedule_never_evolves() {
        let schedule = parse_schedule("feed").unwrap();
        let report = simulate(&LifecycleEngine::default(), Species::Mammoth, &schedule, 50).unwrap();
        assert_eq!(report.steps, 50);
        assert!(report.transitions.is_empty());
        assert_eq!(report.pet.stats.hunger, 200);
        assert_eq!(report.population_credit, 1);
    }

    #[test]
    fn schedule_parsing() {
        assert_eq!(
            parse_schedule(" Feed, clean ").unwrap(),
            vec![InteractionKind::Feed, InteractionKind::Clean]
        );
        assert!(parse_schedule("").is_err());
        assert!(parse_schedule("feed,groom").is_err());
    }

    #[test]
    fn report_renders_bars() {
        let report = simulate(&LifecycleEngine::default(), Species::Thylacine, &full_cycle(), 9).unwrap();
        let out = render_report(&report);
        assert!(out.contains("INFANT -> ADULT  +0"));
        assert!(out.contains("hunger   [##........] 30"));
        assert!(out.contains("population credit 1"));
    }
}
