//! # Life Stages
//!
//! ```text
//! Infant ──▶ Adult ──▶ Breeding ──▶ Matriarch (terminal)
//! ```
//!
//! The derive order of [`LifeStage`] is the stage order, so `<` and `>=`
//! compare maturity directly.

use serde::{Deserialize, Serialize};

/// Population credit awarded on first entry into a breeding stage.
pub(crate) const BREEDING_POPULATION_CREDIT: u64 = 2;

/// A pet's life-cycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum LifeStage {
    Infant = 0,
    Adult = 1,
    Breeding = 2,
    /// Terminal stage ("re-breeding").
    Matriarch = 3,
}

impl LifeStage {
    /// Every stage, in order.
    pub const ALL: [LifeStage; 4] = [
        LifeStage::Infant,
        LifeStage::Adult,
        LifeStage::Breeding,
        LifeStage::Matriarch,
    ];

    /// The candidate next stage, if any. `None` only for `Matriarch`.
    pub fn next(&self) -> Option<LifeStage> {
        match self {
            Self::Infant => Some(Self::Adult),
            Self::Adult => Some(Self::Breeding),
            Self::Breeding => Some(Self::Matriarch),
            Self::Matriarch => None,
        }
    }

    /// Whether this stage is terminal.
    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }

    /// Population credit for entering this stage.
    pub fn population_credit(&self) -> u64 {
        match self {
            Self::Infant | Self::Adult => 0,
            Self::Breeding | Self::Matriarch => BREEDING_POPULATION_CREDIT,
        }
    }

    /// Ordinal in `0..4`.
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for LifeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Infant => "INFANT",
            Self::Adult => "ADULT",
            Self::Breeding => "BREEDING",
            Self::Matriarch => "MATRIARCH",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_strictly_ordered() {
        assert!(LifeStage::Infant < LifeStage::Adult);
        assert!(LifeStage::Adult < LifeStage::Breeding);
        assert!(LifeStage::Breeding < LifeStage::Matriarch);
    }

    #[test]
    fn next_walks_the_sequence_and_ends() {
        let mut stage = LifeStage::Infant;
        let mut visited = vec![stage];
        while let Some(next) = stage.next() {
            assert!(next > stage);
            stage = next;
            visited.push(stage);
        }
        assert_eq!(visited, LifeStage::ALL.to_vec());
        assert!(LifeStage::Matriarch.is_terminal());
    }

    #[test]
    fn only_breeding_stages_award_credit() {
        assert_eq!(LifeStage::Infant.population_credit(), 0);
        assert_eq!(LifeStage::Adult.population_credit(), 0);
        assert_eq!(LifeStage::Breeding.population_credit(), 2);
        assert_eq!(LifeStage::Matriarch.population_credit(), 2);
    }

    #[test]
    fn serde_and_display() {
        assert_eq!(serde_json::to_string(&LifeStage::Breeding).unwrap(), "\"Breeding\"");
        assert!(serde_json::from_str::<LifeStage>("\"Elder\"").is_err());
        assert_eq!(LifeStage::Matriarch.to_string(), "MATRIARCH");
    }
}
