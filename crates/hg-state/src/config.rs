//! # Lifecycle Configuration
//!
//! Interaction gains and the evolution threshold table. Defaults match the
//! shipped game balance; every value can be overridden from a YAML file or
//! the environment without code changes.
//!
//! ```yaml
//! gains:
//!   feed: 10
//!   pet: 10
//!   clean: 10
//! thresholds:
//!   adult:     { hunger: 30,  intimacy: 30,  health: 30 }
//!   breeding:  { hunger: 100, intimacy: 100, health: 100 }
//!   matriarch: { hunger: 200, intimacy: 200, health: 200 }
//! ```
//!
//! The candidate-stage → threshold mapping is total: `Infant` is never a
//! candidate, and `Matriarch` has no successor, so
//! [`EvolutionThresholds::for_candidate`] returns `None` for `Infant` only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interaction::InteractionKind;
use crate::stage::LifeStage;
use crate::stats::STAT_MAX;

/// Default per-interaction gain.
pub const DEFAULT_GAIN: u16 = 10;

/// Errors raised while loading or validating lifecycle configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The document could not be parsed.
    #[error("failed to parse lifecycle config: {0}")]
    Parse(String),

    /// A value violates a configuration invariant.
    #[error("invalid lifecycle config: {0}")]
    Invalid(String),
}

/// Minimum stats required to enter a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatThreshold {
    pub hunger: u16,
    pub intimacy: u16,
    pub health: u16,
}

impl StatThreshold {
    /// The same requirement on all three stats.
    pub const fn uniform(value: u16) -> Self {
        Self {
            hunger: value,
            intimacy: value,
            health: value,
        }
    }

    /// Parse a `"hunger,intimacy,health"` triple, e.g. `"30,30,30"`.
    pub fn parse_triple(s: &str) -> Result<Self, ConfigError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [h, i, he] = parts.as_slice() else {
            return Err(ConfigError::Parse(format!(
                "threshold must be \"hunger,intimacy,health\", got {s:?}"
            )));
        };
        let num = |v: &str| {
            v.parse::<u16>()
                .map_err(|e| ConfigError::Parse(format!("threshold component {v:?}: {e}")))
        };
        Ok(Self {
            hunger: num(*h)?,
            intimacy: num(*i)?,
            health: num(*he)?,
        })
    }

    fn components(&self) -> [u16; 3] {
        [self.hunger, self.intimacy, self.health]
    }
}

/// Thresholds keyed by the candidate stage they unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionThresholds {
    pub adult: StatThreshold,
    pub breeding: StatThreshold,
    pub matriarch: StatThreshold,
}

impl Default for EvolutionThresholds {
    fn default() -> Self {
        Self {
            adult: StatThreshold::uniform(30),
            breeding: StatThreshold::uniform(100),
            matriarch: StatThreshold::uniform(STAT_MAX),
        }
    }
}

impl EvolutionThresholds {
    /// Threshold to enter `candidate`. `Infant` is the initial stage and
    /// has no entry threshold.
    pub fn for_candidate(&self, candidate: LifeStage) -> Option<StatThreshold> {
        match candidate {
            LifeStage::Infant => None,
            LifeStage::Adult => Some(self.adult),
            LifeStage::Breeding => Some(self.breeding),
            LifeStage::Matriarch => Some(self.matriarch),
        }
    }

    /// Threshold gating progression out of `current`, or `None` when
    /// `current` is terminal.
    pub fn gating(&self, current: LifeStage) -> Option<(LifeStage, StatThreshold)> {
        let candidate = current.next()?;
        self.for_candidate(candidate).map(|t| (candidate, t))
    }
}

/// Per-kind stat gain applied by one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionGains {
    pub feed: u16,
    pub pet: u16,
    pub clean: u16,
}

impl Default for InteractionGains {
    fn default() -> Self {
        Self {
            feed: DEFAULT_GAIN,
            pet: DEFAULT_GAIN,
            clean: DEFAULT_GAIN,
        }
    }
}

impl InteractionGains {
    pub fn for_kind(&self, kind: InteractionKind) -> u16 {
        match kind {
            InteractionKind::Feed => self.feed,
            InteractionKind::Pet => self.pet,
            InteractionKind::Clean => self.clean,
        }
    }
}

/// Complete lifecycle tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    pub gains: InteractionGains,
    pub thresholds: EvolutionThresholds,
}

impl LifecycleConfig {
    /// Parse and validate a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration invariants:
    ///
    /// - every gain is positive,
    /// - every threshold component is within `[0, STAT_MAX]` (a higher
    ///   value could never be reached),
    /// - thresholds never decrease along the stage order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in InteractionKind::ALL {
            if self.gains.for_kind(kind) == 0 {
                return Err(ConfigError::Invalid(format!("gain for {kind} must be positive")));
            }
        }

        let mut previous: Option<(LifeStage, StatThreshold)> = None;
        for stage in LifeStage::ALL {
            let Some(threshold) = self.thresholds.for_candidate(stage) else {
                continue;
            };
            if let Some(v) = threshold.components().into_iter().find(|v| *v > STAT_MAX) {
                return Err(ConfigError::Invalid(format!(
                    "{stage} threshold component {v} exceeds stat ceiling {STAT_MAX}"
                )));
            }
            if let Some((prev_stage, prev)) = previous {
                let regresses = threshold
                    .components()
                    .into_iter()
                    .zip(prev.components())
                    .any(|(cur, before)| cur < before);
                if regresses {
                    return Err(ConfigError::Invalid(format!(
                        "{stage} threshold is lower than {prev_stage} threshold"
                    )));
                }
            }
            previous = Some((stage, threshold));
        }
        Ok(())
    }
}
