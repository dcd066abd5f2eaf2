//! # Lifecycle Engine
//!
//! `apply_interaction(pet, kind)` produces the next pet value and reports
//! whether a stage transition occurred:
//!
//! 1. Reject pets whose stats are already outside `[0, 200]` or whose
//!    generation is zero. Pre-existing bad values are never clamped.
//! 2. Add the configured gain for `kind` to exactly one stat, saturating
//!    at 200.
//! 3. Pick the candidate next stage from the **current** stage. The
//!    terminal stage has none and is never re-evaluated.
//! 4. Transition iff all three new stats meet (`>=`) the candidate's
//!    threshold.
//!
//! Population counters are the caller's business; see
//! [`StageTransition::population_delta`].

use thiserror::Error;

use hg_core::{HgError, PetId};

use crate::config::{ConfigError, LifecycleConfig};
use crate::interaction::InteractionKind;
use crate::pet::{Pet, StageTransition};
use crate::stats::STAT_MAX;

/// Errors raised by the lifecycle engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The caller passed a pet that violates the pet invariants.
    #[error("pet {pet_id} is in an invalid state: {reason}")]
    InvalidState {
        pet_id: PetId,
        reason: String,
    },
}

impl From<LifecycleError> for HgError {
    fn from(err: LifecycleError) -> Self {
        HgError::InvalidState(err.to_string())
    }
}

/// Outcome of one interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionResult {
    /// The updated pet.
    pub pet: Pet,
    /// The stage advance, if one occurred.
    pub transition: Option<StageTransition>,
}

impl InteractionResult {
    pub fn transitioned(&self) -> bool {
        self.transition.is_some()
    }

    /// Population credit owed by the caller for this interaction.
    pub fn population_delta(&self) -> u64 {
        self.transition.map_or(0, |t| t.population_delta())
    }
}

/// Lifecycle engine bound to a validated configuration.
#[derive(Debug, Clone, Default)]
pub struct LifecycleEngine {
    config: LifecycleConfig,
}

impl LifecycleEngine {
    /// Build an engine, rejecting invalid configuration.
    pub fn new(config: LifecycleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Apply one interaction. See the module documentation.
    pub fn apply(&self, pet: Pet, kind: InteractionKind) -> Result<InteractionResult, LifecycleError> {
        apply_interaction(pet, kind, &self.config)
    }
}

/// Apply one interaction to `pet` under `config`.
pub fn apply_interaction(
    pet: Pet,
    kind: InteractionKind,
    config: &LifecycleConfig,
) -> Result<InteractionResult, LifecycleError> {
    validate_pet(&pet)?;

    let stats = pet.stats.with_gain(kind, config.gains.for_kind(kind));
    let transition = config
        .thresholds
        .gating(pet.stage)
        .filter(|(_, threshold)| stats.meets(threshold))
        .map(|(candidate, _)| StageTransition {
            from: pet.stage,
            to: candidate,
        });
    let stage = transition.map_or(pet.stage, |t| t.to);

    Ok(InteractionResult {
        pet: Pet { stats, stage, ..pet },
        transition,
    })
}

fn validate_pet(pet: &Pet) -> Result<(), LifecycleError> {
    if let Some((name, value)) = pet.stats.out_of_range() {
        return Err(LifecycleError::InvalidState {
            pet_id: pet.id,
            reason: format!("{name} = {value} is outside [0, {STAT_MAX}]"),
        });
    }
    if pet.generation == 0 {
        return Err(LifecycleError::InvalidState {
            pet_id: pet.id,
            reason: "generation must be positive".to_string(),
        });
    }
    Ok(())
}
