//! `GET /v1/lifecycle/config`: the active gains and evolution thresholds.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use hg_state::LifecycleConfig;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/lifecycle/config", get(get_config))
}

async fn get_config(State(state): State<AppState>) -> Json<LifecycleConfig> {
    Json(*state.session.engine().config())
}
