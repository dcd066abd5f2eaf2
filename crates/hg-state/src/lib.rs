//! # hg-state: Pet Lifecycle Engine
//!
//! Owns per-pet stat mutation, evolution-threshold evaluation, and stage
//! transition. Everything in this crate is synchronous and free of side
//! effects: a pet value goes in, a new pet value comes out.
//!
//! ## Lifecycle
//!
//! ```text
//! Infant ──(30/30/30)──▶ Adult ──(100/100/100)──▶ Breeding ──(200/200/200)──▶ Matriarch
//! ```
//!
//! Each interaction raises exactly one stat (`Feed → hunger`,
//! `Pet → intimacy`, `Clean → health`), saturating at 200. A pet advances
//! to the next stage only when **all three** stats meet that stage's
//! threshold. Stages never regress; `Matriarch` is terminal.
//!
//! ## Population Credit
//!
//! The engine never touches population counters. It reports the
//! [`StageTransition`] that occurred, and
//! [`StageTransition::population_delta`] tells the caller how much credit
//! that transition is worth (2 on entry into `Breeding` or `Matriarch`,
//! 0 on `Infant → Adult`).

pub mod config;
pub mod engine;
pub mod interaction;
pub mod pet;
pub mod stage;
pub mod stats;

pub use config::{ConfigError, EvolutionThresholds, InteractionGains, LifecycleConfig, StatThreshold};
pub use engine::{apply_interaction, InteractionResult, LifecycleEngine, LifecycleError};
pub use interaction::{InteractionKind, ReactionEvent};
pub use pet::{Pet, StageTransition, StageTransitionRecord, MINT_POPULATION_CREDIT};
pub use stage::LifeStage;
pub use stats::{PetStats, STAT_MAX};
