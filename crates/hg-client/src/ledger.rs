//! Ledger collaborator: records mints and breeding milestones.
//!
//! ## Gateway Paths
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/v1/mints` | Confirm a mint, returns the confirmation time |
//! | POST   | `/v1/evolutions` | Record a `Breeding`/`Matriarch` milestone |
//!
//! The gateway owns wallet signing and block confirmation. Every mint carries
//! the pre-allocated pet id so a retried request is recognised as the same
//! mint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use hg_core::{EthAmount, OwnerId, PetId, Species, Timestamp};
use hg_state::{LifeStage, Pet};

use crate::error::{LedgerError, MintRejection};

const API_PREFIX: &str = "v1";

/// A mint the session controller wants confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    pub pet_id: PetId,
    pub owner: OwnerId,
    pub species: Species,
    /// Position of the new pet in the owner's inventory.
    pub sequence_index: usize,
    pub cost: EthAmount,
}

impl MintRequest {
    /// The pet this mint produces once confirmed at `birth_date`.
    pub fn into_pet(self, birth_date: Timestamp) -> Pet {
        Pet::minted(self.pet_id, self.species, self.sequence_index, birth_date)
    }
}

/// Records mints and evolution milestones.
#[async_trait]
pub trait LedgerAdapter: Send + Sync {
    /// Confirm a mint and return the newly created pet.
    async fn record_mint(&self, request: &MintRequest) -> Result<Pet, LedgerError>;

    /// Record a breeding milestone. `Ok(false)` means the gateway already
    /// held this milestone.
    async fn record_evolution(&self, pet: &Pet) -> Result<bool, LedgerError>;

    /// Short name for logs and health output.
    fn adapter_name(&self) -> &str;
}

// -- Wire types ---------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MintResponse {
    #[serde(default)]
    tx_hash: Option<String>,
    #[serde(default)]
    confirmed_at: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
struct RejectionBody {
    reason: MintRejection,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EvolutionRequest<'a> {
    pet_id: PetId,
    species: Species,
    stage: LifeStage,
    generation: u32,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct EvolutionResponse {
    #[serde(default = "default_recorded")]
    recorded: bool,
}

fn default_recorded() -> bool {
    true
}

// -- HTTP adapter -------------------------------------------------------------

/// Ledger adapter backed by the HTTP ledger gateway.
#[derive(Debug, Clone)]
pub struct HttpLedgerAdapter {
    http: reqwest::Client,
    base_url: url::Url,
    token: Option<String>,
}

impl HttpLedgerAdapter {
    pub fn new(http: reqwest::Client, base_url: url::Url, token: Option<String>) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        let builder = self.http.post(url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait]
impl LedgerAdapter for HttpLedgerAdapter {
    async fn record_mint(&self, request: &MintRequest) -> Result<Pet, LedgerError> {
        let endpoint = "POST /v1/mints";
        let url = format!("{}{}/mints", self.base_url, API_PREFIX);

        let resp = crate::retry::retry_send(|| self.post(&url).json(request).send())
            .await
            .map_err(|e| LedgerError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        let status = resp.status();
        if status.is_client_error() {
            let body = resp.text().await.unwrap_or_default();
            if let Ok(rejection) = serde_json::from_str::<RejectionBody>(&body) {
                return Err(LedgerError::Rejected {
                    reason: rejection.reason,
                });
            }
            return Err(LedgerError::ApiError {
                endpoint: endpoint.into(),
                status: status.as_u16(),
                body,
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LedgerError::ApiError {
                endpoint: endpoint.into(),
                status: status.as_u16(),
                body,
            });
        }

        let confirmed: MintResponse =
            resp.json().await.map_err(|e| LedgerError::Deserialization {
                endpoint: endpoint.into(),
                source: e,
            })?;

        tracing::debug!(
            pet_id = %request.pet_id,
            tx_hash = confirmed.tx_hash.as_deref().unwrap_or("-"),
            "ledger confirmed mint"
        );
        Ok(request
            .clone()
            .into_pet(confirmed.confirmed_at.unwrap_or_else(Timestamp::now)))
    }

    async fn record_evolution(&self, pet: &Pet) -> Result<bool, LedgerError> {
        let endpoint = "POST /v1/evolutions";
        let url = format!("{}{}/evolutions", self.base_url, API_PREFIX);
        let body = EvolutionRequest {
            pet_id: pet.id,
            species: pet.species,
            stage: pet.stage,
            generation: pet.generation,
            name: &pet.name,
        };

        let resp = crate::retry::retry_send(|| self.post(&url).json(&body).send())
            .await
            .map_err(|e| LedgerError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(LedgerError::ApiError {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let ack: EvolutionResponse =
            resp.json().await.map_err(|e| LedgerError::Deserialization {
                endpoint: endpoint.into(),
                source: e,
            })?;
        Ok(ack.recorded)
    }

    fn adapter_name(&self) -> &str {
        "http-ledger"
    }
}

// -- Mock adapter -------------------------------------------------------------

/// In-process ledger that confirms every mint immediately unless told
/// otherwise. Records every call for inspection.
#[derive(Debug, Default)]
pub struct MockLedgerAdapter {
    mint_rejection: Mutex<Option<MintRejection>>,
    fail_evolutions: Mutex<bool>,
    delay: Mutex<Option<Duration>>,
    mint_calls: AtomicUsize,
    evolutions: Mutex<Vec<(PetId, LifeStage)>>,
}

impl MockLedgerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that rejects every mint with `reason`.
    pub fn rejecting(reason: MintRejection) -> Self {
        let mock = Self::default();
        *mock.mint_rejection.lock() = Some(reason);
        mock
    }

    /// Delay every call by `delay` before answering.
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock() = Some(delay);
        self
    }

    /// Make every evolution record fail with a gateway error.
    pub fn fail_evolutions(&self, fail: bool) {
        *self.fail_evolutions.lock() = fail;
    }

    pub fn mint_calls(&self) -> usize {
        self.mint_calls.load(Ordering::SeqCst)
    }

    /// Every evolution recorded so far, in call order.
    pub fn evolutions(&self) -> Vec<(PetId, LifeStage)> {
        self.evolutions.lock().clone()
    }

    async fn pause(&self) {
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl LedgerAdapter for MockLedgerAdapter {
    async fn record_mint(&self, request: &MintRequest) -> Result<Pet, LedgerError> {
        self.mint_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        let rejection = *self.mint_rejection.lock();
        match rejection {
            Some(reason) => Err(LedgerError::Rejected { reason }),
            None => Ok(request.clone().into_pet(Timestamp::now())),
        }
    }

    async fn record_evolution(&self, pet: &Pet) -> Result<bool, LedgerError> {
        self.pause().await;
        if *self.fail_evolutions.lock() {
            return Err(LedgerError::ApiError {
                endpoint: "mock /v1/evolutions".into(),
                status: 503,
                body: "unavailable".into(),
            });
        }
        let mut evolutions = self.evolutions.lock();
        let entry = (pet.id, pet.stage);
        if evolutions.contains(&entry) {
            return Ok(false);
        }
        evolutions.push(entry);
        Ok(true)
    }

    fn adapter_name(&self) -> &str {
        "mock-ledger"
    }
}
