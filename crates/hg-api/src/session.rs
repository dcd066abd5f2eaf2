//! # Session Controller
//!
//! Owns every player's inventory and the population counters, and drives
//! the two state-changing flows:
//!
//! **Mint**: resolve a species (random if none is named), quote the cost,
//! ask the ledger to confirm. Only a confirmed mint appends a pet and
//! credits the population. A rejection or timeout leaves nothing behind.
//!
//! **Interact**: run the lifecycle engine on the stored pet under that
//! pet's own lock and commit the result. A transition into `Breeding` or
//! `Matriarch` credits the population and is reported to the ledger once.
//! The narrative service then supplies a reaction line.
//!
//! Notifications run after the pet's new state is committed. Their
//! failures become [`NotificationFailure`] warnings on the outcome and never
//! undo the state change.
//!
//! ## Locking
//!
//! - Per-pet `parking_lot::Mutex`, held only for the synchronous
//!   read-apply-write, never across an await.
//! - Per-owner `tokio::sync::Mutex`, held across the ledger call so one
//!   owner's concurrent mints get distinct sequence indices.
//! - The pet index and inventories sit behind `RwLock`s taken briefly.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;

use hg_client::{fallback_text, LedgerAdapter, MintRejection, MintRequest, NarrativeAdapter};
use hg_core::{EthAmount, OwnerId, PetId, Species};
use hg_state::{
    InteractionKind, LifecycleEngine, LifecycleError, Pet, ReactionEvent, StageTransition,
    StageTransitionRecord, MINT_POPULATION_CREDIT,
};

use crate::config::MintCostSchedule;
use crate::population::PopulationCounters;

/// Errors surfaced by the session controller.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("pet {0} not found")]
    NotFound(PetId),

    #[error(transparent)]
    InvalidState(#[from] LifecycleError),

    #[error("mint failed: {reason}")]
    MintFailed {
        reason: MintRejection,
        detail: String,
    },
}

/// Collaborator whose notification failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collaborator {
    Ledger,
    Narrative,
}

impl Collaborator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ledger => "ledger",
            Self::Narrative => "narrative",
        }
    }
}

/// A failed best-effort notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationFailure {
    pub collaborator: Collaborator,
    pub message: String,
}

/// Stored pet plus its audit trail.
#[derive(Debug, Clone, Serialize)]
pub struct PetRecord {
    pub owner: OwnerId,
    pub pet: Pet,
    pub transitions: Vec<StageTransitionRecord>,
}

/// Result of one interaction.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionOutcome {
    pub pet: Pet,
    pub transitioned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<StageTransition>,
    pub reaction: String,
    pub warnings: Vec<NotificationFailure>,
}

/// Price of an owner's next mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MintQuote {
    pub owner: OwnerId,
    pub sequence_index: usize,
    pub cost: EthAmount,
}

/// Where a lore snippet came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoreSource {
    Narrative,
    Catalog,
}

/// Lore text for one species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lore {
    pub species: Species,
    pub text: String,
    pub source: LoreSource,
}

/// Drives minting and interactions over the in-memory inventories.
pub struct SessionController {
    engine: LifecycleEngine,
    ledger: Arc<dyn LedgerAdapter>,
    narrative: Arc<dyn NarrativeAdapter>,
    population: Arc<PopulationCounters>,
    costs: MintCostSchedule,
    call_timeout: Duration,
    pets: RwLock<HashMap<PetId, Arc<Mutex<PetRecord>>>>,
    inventories: RwLock<HashMap<OwnerId, Vec<PetId>>>,
    mint_locks: Mutex<HashMap<OwnerId, Arc<tokio::sync::Mutex<()>>>>,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("ledger", &self.ledger.adapter_name())
            .field("narrative", &self.narrative.adapter_name())
            .field("pets", &self.pets.read().len())
            .field("call_timeout", &self.call_timeout)
            .finish()
    }
}

impl SessionController {
    pub fn new(
        engine: LifecycleEngine,
        ledger: Arc<dyn LedgerAdapter>,
        narrative: Arc<dyn NarrativeAdapter>,
        population: Arc<PopulationCounters>,
        costs: MintCostSchedule,
        call_timeout: Duration,
    ) -> Self {
        Self {
            engine,
            ledger,
            narrative,
            population,
            costs,
            call_timeout,
            pets: RwLock::new(HashMap::new()),
            inventories: RwLock::new(HashMap::new()),
            mint_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn engine(&self) -> &LifecycleEngine {
        &self.engine
    }

    pub fn population(&self) -> &PopulationCounters {
        &self.population
    }

    /// The owner's pets in creation order.
    pub fn inventory(&self, owner: &OwnerId) -> Vec<Pet> {
        let ids = self.inventories.read().get(owner).cloned().unwrap_or_default();
        let pets = self.pets.read();
        ids.iter()
            .filter_map(|id| pets.get(id).map(|rec| rec.lock().pet.clone()))
            .collect()
    }

    pub fn record(&self, id: PetId) -> Result<PetRecord, SessionError> {
        let record = self.lookup(id)?;
        let snapshot = record.lock().clone();
        Ok(snapshot)
    }

    pub fn quote(&self, owner: &OwnerId) -> MintQuote {
        let sequence_index = self.inventory_len(owner);
        MintQuote {
            owner: owner.clone(),
            sequence_index,
            cost: self.costs.quote(sequence_index),
        }
    }

    /// Mint a new pet for `owner`.
    pub async fn mint(&self, owner: &OwnerId, species: Option<Species>) -> Result<Pet, SessionError> {
        let species = species.unwrap_or_else(|| Species::random(&mut rand::thread_rng()));

        let owner_lock = self.mint_lock(owner);
        let _guard = owner_lock.lock().await;

        let quote = self.quote(owner);
        let request = MintRequest {
            pet_id: PetId::new(),
            owner: owner.clone(),
            species,
            sequence_index: quote.sequence_index,
            cost: quote.cost,
        };

        let pet = match bounded(self.call_timeout, self.ledger.record_mint(&request)).await {
            Some(Ok(pet)) => pet,
            Some(Err(e)) => {
                let reason = e.rejection();
                tracing::warn!(%owner, %species, %reason, error = %e, "mint rejected");
                return Err(SessionError::MintFailed {
                    reason,
                    detail: e.to_string(),
                });
            }
            None => {
                tracing::warn!(%owner, %species, timeout = ?self.call_timeout, "mint timed out");
                return Err(SessionError::MintFailed {
                    reason: MintRejection::Network,
                    detail: format!("ledger did not answer within {:?}", self.call_timeout),
                });
            }
        };

        let record = PetRecord {
            owner: owner.clone(),
            pet: pet.clone(),
            transitions: Vec::new(),
        };
        self.pets.write().insert(pet.id, Arc::new(Mutex::new(record)));
        self.inventories
            .write()
            .entry(owner.clone())
            .or_default()
            .push(pet.id);
        let count = self.population.credit(species, MINT_POPULATION_CREDIT);

        metrics::counter!("hg_mints_total", "species" => species.as_str()).increment(1);
        tracing::info!(
            %owner,
            pet_id = %pet.id,
            %species,
            cost = %quote.cost,
            population = count,
            "pet minted"
        );
        Ok(pet)
    }

    /// Apply one interaction to a stored pet.
    pub async fn interact(
        &self,
        id: PetId,
        kind: InteractionKind,
    ) -> Result<InteractionOutcome, SessionError> {
        let record = self.lookup(id)?;

        let (pet, transition) = {
            let mut record = record.lock();
            let result = self.engine.apply(record.pet.clone(), kind)?;
            record.pet = result.pet;
            if let Some(transition) = result.transition {
                record
                    .transitions
                    .push(StageTransitionRecord::new(transition, kind));
            }
            (record.pet.clone(), result.transition)
        };

        metrics::counter!("hg_interactions_total", "kind" => kind.as_str()).increment(1);
        tracing::debug!(pet_id = %id, %kind, stats = ?pet.stats, "interaction applied");

        let mut warnings = Vec::new();
        if let Some(transition) = transition {
            self.on_transition(&pet, transition, &mut warnings).await;
        }

        let event = ReactionEvent::for_interaction(kind, transition.is_some());
        let reaction = match bounded(self.call_timeout, self.narrative.describe_reaction(&pet, event)).await {
            Some(Ok(text)) => text,
            Some(Err(e)) => {
                if !matches!(e, hg_client::NarrativeError::NotConfigured) {
                    warn_notification(&mut warnings, Collaborator::Narrative, e.to_string());
                }
                fallback_text(&e).to_string()
            }
            None => {
                warn_notification(
                    &mut warnings,
                    Collaborator::Narrative,
                    format!("narrative did not answer within {:?}", self.call_timeout),
                );
                hg_client::FALLBACK_FAILED.to_string()
            }
        };

        Ok(InteractionOutcome {
            transitioned: transition.is_some(),
            pet,
            transition,
            reaction,
            warnings,
        })
    }

    /// Lore for `species` from the narrative service, or the catalog story.
    pub async fn lore(&self, species: Species) -> Lore {
        match bounded(self.call_timeout, self.narrative.describe_species(species)).await {
            Some(Ok(text)) => Lore {
                species,
                text,
                source: LoreSource::Narrative,
            },
            outcome => {
                if let Some(Err(e)) = outcome {
                    tracing::debug!(%species, error = %e, "lore falls back to catalog");
                }
                Lore {
                    species,
                    text: species.data().story.to_string(),
                    source: LoreSource::Catalog,
                }
            }
        }
    }

    async fn on_transition(
        &self,
        pet: &Pet,
        transition: StageTransition,
        warnings: &mut Vec<NotificationFailure>,
    ) {
        let delta = transition.population_delta();
        let population = if delta > 0 {
            self.population.credit(pet.species, delta)
        } else {
            self.population.get(pet.species)
        };
        metrics::counter!("hg_evolutions_total", "stage" => stage_label(transition)).increment(1);
        tracing::info!(
            pet_id = %pet.id,
            species = %pet.species,
            from = %transition.from,
            to = %transition.to,
            population,
            "pet evolved"
        );

        if !transition.is_breeding_milestone() {
            return;
        }
        match bounded(self.call_timeout, self.ledger.record_evolution(pet)).await {
            Some(Ok(true)) => {}
            Some(Ok(false)) => {
                tracing::debug!(pet_id = %pet.id, "ledger already held this milestone");
            }
            Some(Err(e)) => warn_notification(warnings, Collaborator::Ledger, e.to_string()),
            None => warn_notification(
                warnings,
                Collaborator::Ledger,
                format!("ledger did not answer within {:?}", self.call_timeout),
            ),
        }
    }

    fn lookup(&self, id: PetId) -> Result<Arc<Mutex<PetRecord>>, SessionError> {
        self.pets
            .read()
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound(id))
    }

    fn inventory_len(&self, owner: &OwnerId) -> usize {
        self.inventories.read().get(owner).map_or(0, Vec::len)
    }

    fn mint_lock(&self, owner: &OwnerId) -> Arc<tokio::sync::Mutex<()>> {
        Arc::clone(self.mint_locks.lock().entry(owner.clone()).or_default())
    }
}

/// `None` on timeout.
async fn bounded<T>(limit: Duration, call: impl Future<Output = T>) -> Option<T> {
    tokio::time::timeout(limit, call).await.ok()
}

fn warn_notification(warnings: &mut Vec<NotificationFailure>, collaborator: Collaborator, message: String) {
    metrics::counter!("hg_notification_failures_total", "collaborator" => collaborator.as_str())
        .increment(1);
    tracing::warn!(collaborator = collaborator.as_str(), %message, "notification failed");
    warnings.push(NotificationFailure {
        collaborator,
        message,
    });
}

fn stage_label(transition: StageTransition) -> &'static str {
    match transition.to {
        hg_state::LifeStage::Infant => "infant",
        hg_state::LifeStage::Adult => "adult",
        hg_state::LifeStage::Breeding => "breeding",
        hg_state::LifeStage::Matriarch => "matriarch",
    }
}
