//! # hg-api: HerGenesis Service
//!
//! Axum service around the session controller: players mint revived
//! animals, care for them, and watch the per-species population grow.
//!
//! ## API Surface
//!
//! | Prefix | Module | Domain |
//! |--------|--------|--------|
//! | `/v1/species/*` | [`routes::species`] | Species catalog and lore |
//! | `/v1/population/*` | [`routes::population`] | Population counters |
//! | `/v1/owners/*`, `/v1/pets/*` | [`routes::pets`] | Inventories, minting, interactions |
//! | `/v1/lifecycle/*` | [`routes::lifecycle`] | Active lifecycle table |
//! | `/metrics` | this module | Prometheus text |
//! | `/health/*` | this module | Probes |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! ## Crate Policy
//!
//! - No game rules in route handlers; they delegate to [`session`].
//! - All errors map to structured HTTP responses via [`AppError`].

pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod population;
pub mod routes;
pub mod session;
pub mod state;

use axum::extract::State;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;

pub use config::AppConfig;
pub use error::AppError;
pub use state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes are mounted outside the metrics layer.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();

    let api = Router::new()
        .merge(routes::species::router())
        .merge(routes::population::router())
        .merge(routes::pets::router())
        .merge(routes::lifecycle::router())
        .route("/metrics", get(render_metrics))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(metrics))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: the service holds all state in memory, so it is
/// ready as soon as it is listening.
async fn readiness() -> &'static str {
    "ready"
}

/// Prometheus recorder output (when installed) plus the request counters.
async fn render_metrics(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
) -> String {
    let mut body = state
        .prometheus
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();
    body.push_str(&metrics.render());
    body
}
