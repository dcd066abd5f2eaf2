//! # Species Catalog
//!
//! - `GET /v1/species`: the four revivable species
//! - `GET /v1/species/{species}`: one species
//! - `GET /v1/species/{species}/lore`: narrative lore, catalog story fallback

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use hg_core::{Species, SpeciesData};

use crate::error::AppError;
use crate::session::Lore;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/species", get(list_species))
        .route("/v1/species/{species}", get(get_species))
        .route("/v1/species/{species}/lore", get(get_lore))
}

/// Accepts the display name, slug, or variant name, in any case.
fn parse_species(raw: &str) -> Result<Species, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("species {raw:?} not found")))
}

async fn list_species() -> Json<Vec<&'static SpeciesData>> {
    Json(Species::ALL.iter().map(Species::data).collect())
}

async fn get_species(Path(raw): Path<String>) -> Result<Json<&'static SpeciesData>, AppError> {
    parse_species(&raw).map(|s| Json(s.data()))
}

async fn get_lore(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Lore>, AppError> {
    let species = parse_species(&raw)?;
    Ok(Json(state.session.lore(species).await))
}
