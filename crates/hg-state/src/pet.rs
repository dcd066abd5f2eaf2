//! # Pet
//!
//! A pet is exclusively owned by its player's inventory. The engine
//! receives a `Pet` by value and returns a new one; it never retains a
//! reference across calls.

use serde::{Deserialize, Serialize};

use hg_core::{PetId, Species, Timestamp};

use crate::interaction::InteractionKind;
use crate::stage::LifeStage;
use crate::stats::PetStats;

/// Population credit for a confirmed mint.
pub const MINT_POPULATION_CREDIT: u64 = 1;

/// A revived animal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub species: Species,
    pub name: String,
    pub stage: LifeStage,
    pub stats: PetStats,
    pub birth_date: Timestamp,
    /// Positive; assigned at creation and never changed by the engine.
    pub generation: u32,
}

impl Pet {
    /// A freshly minted first-generation `Infant` with zeroed stats, named
    /// after its species and its position in the owner's inventory
    /// (`"Dodo #1"` for sequence index 0).
    pub fn minted(id: PetId, species: Species, sequence_index: usize, birth_date: Timestamp) -> Self {
        Self {
            id,
            species,
            name: format!("{} #{}", species.as_str(), sequence_index + 1),
            stage: LifeStage::Infant,
            stats: PetStats::ZERO,
            birth_date,
            generation: 1,
        }
    }
}

/// A stage advance produced by one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTransition {
    pub from: LifeStage,
    pub to: LifeStage,
}

impl StageTransition {
    /// Population credit this transition is worth: 2 on entry into
    /// `Breeding` or `Matriarch`, otherwise 0.
    pub fn population_delta(&self) -> u64 {
        self.to.population_credit()
    }

    /// Whether the caller owes the ledger an evolution record.
    pub fn is_breeding_milestone(&self) -> bool {
        self.population_delta() > 0
    }
}

/// Audit record of a stage transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageTransitionRecord {
    pub from_stage: LifeStage,
    pub to_stage: LifeStage,
    /// Interaction that crossed the threshold.
    pub trigger: InteractionKind,
    pub timestamp: Timestamp,
}

impl StageTransitionRecord {
    pub fn new(transition: StageTransition, trigger: InteractionKind) -> Self {
        Self {
            from_stage: transition.from,
            to_stage: transition.to,
            trigger,
            timestamp: Timestamp::now(),
        }
    }
}
