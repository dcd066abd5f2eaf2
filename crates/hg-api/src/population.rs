//! # Population Counters
//!
//! One lock-free counter per species. Credits from different pets may land
//! concurrently and sum exactly without a global lock. Counts saturate at
//! `u64::MAX`; they never wrap or decrease.
//!
//! After every change a snapshot is appended to a bounded history (most
//! recent [`HISTORY_LIMIT`] entries) so clients can chart the revival.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::Serialize;

use hg_core::{Species, Timestamp, SPECIES_COUNT};

/// Number of snapshots retained in the history.
pub const HISTORY_LIMIT: usize = 256;

/// Count for one species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpeciesPopulation {
    pub species: Species,
    pub count: u64,
}

/// Counts for every species at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulationSnapshot {
    pub taken_at: Timestamp,
    pub counts: Vec<SpeciesPopulation>,
    pub total: u64,
}

impl PopulationSnapshot {
    pub fn count(&self, species: Species) -> u64 {
        self.counts
            .iter()
            .find(|c| c.species == species)
            .map_or(0, |c| c.count)
    }
}

/// Per-species population counters.
#[derive(Debug)]
pub struct PopulationCounters {
    counts: [AtomicU64; SPECIES_COUNT],
    history: Mutex<VecDeque<PopulationSnapshot>>,
}

impl Default for PopulationCounters {
    fn default() -> Self {
        Self::seeded([0; SPECIES_COUNT])
    }
}

impl PopulationCounters {
    /// Counters starting from `seed`, indexed by [`Species::index`].
    pub fn seeded(seed: [u64; SPECIES_COUNT]) -> Self {
        let counters = Self {
            counts: seed.map(AtomicU64::new),
            history: Mutex::new(VecDeque::with_capacity(HISTORY_LIMIT)),
        };
        counters.record_snapshot();
        counters
    }

    pub fn get(&self, species: Species) -> u64 {
        self.counts[species.index()].load(Ordering::SeqCst)
    }

    /// Add `delta` to `species`, returning the new count.
    pub fn credit(&self, species: Species, delta: u64) -> u64 {
        let previous = self.counts[species.index()]
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                Some(n.saturating_add(delta))
            })
            .unwrap_or_else(|n| n);
        if previous.checked_add(delta).is_none() {
            tracing::warn!(%species, "population counter saturated");
        }
        self.record_snapshot();
        previous.saturating_add(delta)
    }

    /// Current counts for every species.
    pub fn snapshot(&self) -> PopulationSnapshot {
        let counts: Vec<SpeciesPopulation> = Species::ALL
            .into_iter()
            .map(|species| SpeciesPopulation {
                species,
                count: self.get(species),
            })
            .collect();
        PopulationSnapshot {
            taken_at: Timestamp::now(),
            total: counts.iter().fold(0, |sum, c| sum.saturating_add(c.count)),
            counts,
        }
    }

    /// Retained snapshots, oldest first.
    pub fn history(&self) -> Vec<PopulationSnapshot> {
        self.history.lock().iter().cloned().collect()
    }

    fn record_snapshot(&self) {
        let mut history = self.history.lock();
        // Taken under the history lock so snapshots are appended in order.
        let snapshot = self.snapshot();
        if history.len() == HISTORY_LIMIT {
            history.pop_front();
        }
        history.push_back(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn seed_sets_initial_counts() {
        let mut seed = [0; SPECIES_COUNT];
        seed[Species::Dodo.index()] = 142;
        let counters = PopulationCounters::seeded(seed);
        assert_eq!(counters.get(Species::Dodo), 142);
        assert_eq!(counters.get(Species::Mammoth), 0);
        assert_eq!(counters.snapshot().total, 142);
        assert_eq!(counters.history().len(), 1);
    }

    #[test]
    fn credit_returns_new_count_and_records_history() {
        let counters = PopulationCounters::default();
        assert_eq!(counters.credit(Species::Thylacine, 1), 1);
        assert_eq!(counters.credit(Species::Thylacine, 2), 3);
        let history = counters.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[2].count(Species::Thylacine), 3);
    }

    #[test]
    fn history_is_bounded() {
        let counters = PopulationCounters::default();
        for _ in 0..HISTORY_LIMIT + 10 {
            counters.credit(Species::Dodo, 1);
        }
        let history = counters.history();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(
            history.last().map(|s| s.count(Species::Dodo)),
            Some((HISTORY_LIMIT + 10) as u64)
        );
    }

    #[test]
    fn huge_seed_and_credit_saturate_instead_of_wrapping() {
        let mut seed = [0; SPECIES_COUNT];
        seed[Species::Dodo.index()] = u64::MAX - 1;
        seed[Species::Mammoth.index()] = 1;
        let counters = PopulationCounters::seeded(seed);
        assert_eq!(counters.snapshot().total, u64::MAX);

        assert_eq!(counters.credit(Species::Dodo, 2), u64::MAX);
        assert_eq!(counters.get(Species::Dodo), u64::MAX);
        assert_eq!(counters.credit(Species::Dodo, 1), u64::MAX);
        assert_eq!(counters.get(Species::Mammoth), 1);
    }

    #[test]
    fn concurrent_credits_sum_exactly() {
        let counters = Arc::new(PopulationCounters::default());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counters = Arc::clone(&counters);
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        counters.credit(Species::IrishElk, 2);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(counters.get(Species::IrishElk), 8 * 500 * 2);
    }
}
