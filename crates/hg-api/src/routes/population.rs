//! # Population
//!
//! - `GET /v1/population`: current per-species counts
//! - `GET /v1/population/history`: recent snapshots, oldest first

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::population::PopulationSnapshot;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/population", get(current))
        .route("/v1/population/history", get(history))
}

async fn current(State(state): State<AppState>) -> Json<PopulationSnapshot> {
    Json(state.session.population().snapshot())
}

async fn history(State(state): State<AppState>) -> Json<Vec<PopulationSnapshot>> {
    Json(state.session.population().history())
}
