//! # Pet Stats
//!
//! Three bounded counters in `[0, STAT_MAX]`. Increases saturate at the
//! ceiling; the engine rejects (never clamps) values that arrive already
//! out of range.

use serde::{Deserialize, Serialize};

use crate::config::StatThreshold;
use crate::interaction::InteractionKind;

/// Upper bound of every stat.
pub const STAT_MAX: u16 = 200;

/// A pet's three counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PetStats {
    pub hunger: u16,
    pub intimacy: u16,
    pub health: u16,
}

impl PetStats {
    /// All counters at zero, as minted.
    pub const ZERO: PetStats = PetStats {
        hunger: 0,
        intimacy: 0,
        health: 0,
    };

    pub fn new(hunger: u16, intimacy: u16, health: u16) -> Self {
        Self {
            hunger,
            intimacy,
            health,
        }
    }

    /// The first counter above `STAT_MAX`, as `(name, value)`.
    pub fn out_of_range(&self) -> Option<(&'static str, u16)> {
        [
            ("hunger", self.hunger),
            ("intimacy", self.intimacy),
            ("health", self.health),
        ]
        .into_iter()
        .find(|(_, v)| *v > STAT_MAX)
    }

    /// Value of the counter an interaction raises.
    pub fn get(&self, kind: InteractionKind) -> u16 {
        match kind {
            InteractionKind::Feed => self.hunger,
            InteractionKind::Pet => self.intimacy,
            InteractionKind::Clean => self.health,
        }
    }

    /// Copy with `gain` added to the counter `kind` raises, saturating at
    /// `STAT_MAX`. The other two counters are untouched.
    pub fn with_gain(self, kind: InteractionKind, gain: u16) -> Self {
        let bump = |v: u16| v.saturating_add(gain).min(STAT_MAX);
        let mut next = self;
        match kind {
            InteractionKind::Feed => next.hunger = bump(self.hunger),
            InteractionKind::Pet => next.intimacy = bump(self.intimacy),
            InteractionKind::Clean => next.health = bump(self.health),
        }
        next
    }

    /// Whether every counter meets (`>=`) its threshold component.
    pub fn meets(&self, threshold: &StatThreshold) -> bool {
        self.hunger >= threshold.hunger
            && self.intimacy >= threshold.intimacy
            && self.health >= threshold.health
    }

    /// Number of lit segments out of `chunks` for each counter, rounded up,
    /// in `(hunger, intimacy, health)` order.
    pub fn filled_chunks(&self, chunks: u16) -> (u16, u16, u16) {
        let fill = |v: u16| -> u16 {
            let v = u32::from(v.min(STAT_MAX));
            let scaled = (v * u32::from(chunks)).div_ceil(u32::from(STAT_MAX));
            scaled as u16
        };
        (fill(self.hunger), fill(self.intimacy), fill(self.health))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_saturates_at_ceiling() {
        let stats = PetStats::new(195, 0, 0).with_gain(InteractionKind::Feed, 10);
        assert_eq!(stats.hunger, 200);
    }

    #[test]
    fn gain_touches_one_axis() {
        let before = PetStats::new(10, 20, 30);
        let after = before.with_gain(InteractionKind::Pet, 10);
        assert_eq!(after, PetStats::new(10, 30, 30));
    }

    #[test]
    fn out_of_range_reports_first_offender() {
        assert_eq!(PetStats::new(200, 200, 200).out_of_range(), None);
        assert_eq!(PetStats::new(0, 201, 999).out_of_range(), Some(("intimacy", 201)));
    }

    #[test]
    fn meets_requires_every_component() {
        let t = StatThreshold::uniform(30);
        assert!(PetStats::new(30, 30, 30).meets(&t));
        assert!(!PetStats::new(30, 30, 29).meets(&t));
    }

    #[test]
    fn filled_chunks_rounds_up() {
        assert_eq!(PetStats::ZERO.filled_chunks(10), (0, 0, 0));
        assert_eq!(PetStats::new(1, 20, 200).filled_chunks(10), (1, 1, 10));
        assert_eq!(PetStats::new(21, 100, 199).filled_chunks(10), (2, 5, 10));
    }
}
