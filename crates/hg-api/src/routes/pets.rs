//! # Inventories & Interactions
//!
//! ## Endpoints
//!
//! - `GET /v1/owners/{owner}/pets`: the owner's pets in creation order
//! - `POST /v1/owners/{owner}/pets`: mint a pet (`{"species": "Dodo"}`, or
//!   `{}` for a random species)
//! - `GET /v1/owners/{owner}/mint-quote`: cost of the owner's next mint
//! - `GET /v1/pets/{id}`: one pet with its transition log
//! - `POST /v1/pets/{id}/interactions`: `{"kind": "feed" | "pet" | "clean"}`

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use hg_core::{OwnerId, PetId, Species};
use hg_state::{InteractionKind, Pet, StageTransitionRecord};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::session::{InteractionOutcome, MintQuote};
use crate::state::AppState;

/// Segments per stat bar in [`PetDetail::progress`].
const PROGRESS_CHUNKS: u16 = 10;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Request to mint a pet.
#[derive(Debug, Default, Deserialize)]
pub struct MintPetRequest {
    /// Species name or slug. Omitted means random.
    #[serde(default)]
    pub species: Option<String>,
}

impl MintPetRequest {
    fn species(&self) -> Result<Option<Species>, String> {
        self.species
            .as_deref()
            .map(|s| s.parse::<Species>().map_err(|e| e.to_string()))
            .transpose()
    }
}

impl Validate for MintPetRequest {
    fn validate(&self) -> Result<(), String> {
        self.species().map(|_| ())
    }
}

/// Request to interact with a pet.
#[derive(Debug, Deserialize)]
pub struct InteractionRequest {
    pub kind: String,
}

impl Validate for InteractionRequest {
    fn validate(&self) -> Result<(), String> {
        self.kind.parse::<InteractionKind>().map(|_| ())
    }
}

/// Lit segments per stat bar.
#[derive(Debug, Serialize)]
pub struct StatProgress {
    pub chunks: u16,
    pub hunger: u16,
    pub intimacy: u16,
    pub health: u16,
}

/// A pet with its owner and audit trail.
#[derive(Debug, Serialize)]
pub struct PetDetail {
    pub owner: OwnerId,
    pub pet: Pet,
    pub progress: StatProgress,
    pub transitions: Vec<StageTransitionRecord>,
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/owners/{owner}/pets", get(list_pets).post(mint_pet))
        .route("/v1/owners/{owner}/mint-quote", get(mint_quote))
        .route("/v1/pets/{id}", get(get_pet))
        .route("/v1/pets/{id}/interactions", axum::routing::post(interact))
}

// ── Handlers ────────────────────────────────────────────────────────

fn parse_pet_id(raw: &str) -> Result<PetId, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("pet {raw:?} not found")))
}

async fn list_pets(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> Result<Json<Vec<Pet>>, AppError> {
    let owner = OwnerId::new(owner)?;
    Ok(Json(state.session.inventory(&owner)))
}

async fn mint_pet(
    State(state): State<AppState>,
    Path(owner): Path<String>,
    body: Result<Json<MintPetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Pet>), AppError> {
    let owner = OwnerId::new(owner)?;
    let req = extract_validated_json(body)?;
    let species = req.species().map_err(AppError::Validation)?;
    let pet = state.session.mint(&owner, species).await?;
    Ok((StatusCode::CREATED, Json(pet)))
}

async fn mint_quote(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> Result<Json<MintQuote>, AppError> {
    let owner = OwnerId::new(owner)?;
    Ok(Json(state.session.quote(&owner)))
}

async fn get_pet(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<PetDetail>, AppError> {
    let record = state.session.record(parse_pet_id(&raw)?)?;
    let (hunger, intimacy, health) = record.pet.stats.filled_chunks(PROGRESS_CHUNKS);
    Ok(Json(PetDetail {
        owner: record.owner,
        pet: record.pet,
        progress: StatProgress {
            chunks: PROGRESS_CHUNKS,
            hunger,
            intimacy,
            health,
        },
        transitions: record.transitions,
    }))
}

async fn interact(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    body: Result<Json<InteractionRequest>, JsonRejection>,
) -> Result<Json<InteractionOutcome>, AppError> {
    let id = parse_pet_id(&raw)?;
    let req = extract_validated_json(body)?;
    let kind: InteractionKind = req.kind.parse().map_err(AppError::Validation)?;
    let outcome = state.session.interact(id, kind).await?;
    Ok(Json(outcome))
}
