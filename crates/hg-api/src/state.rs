//! # Application State
//!
//! Shared state handed to every route handler through the `State`
//! extractor. Cloning is cheap; everything inside is behind an `Arc`.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use hg_client::{Collaborators, MockLedgerAdapter, UnconfiguredNarrative};
use hg_state::LifecycleEngine;

use crate::config::{AppConfig, ConfigError};
use crate::population::PopulationCounters;
use crate::session::SessionController;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub session: Arc<SessionController>,
    /// Installed Prometheus recorder, when the binary set one up.
    pub prometheus: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("prometheus", &self.prometheus.is_some())
            .finish()
    }
}

impl AppState {
    /// Default configuration, mock ledger, no narrative credential.
    pub fn new() -> Self {
        let collaborators = Collaborators {
            ledger: Arc::new(MockLedgerAdapter::new()),
            narrative: Arc::new(UnconfiguredNarrative),
        };
        // The default lifecycle table always validates.
        Self::with_engine(AppConfig::default(), LifecycleEngine::default(), collaborators)
    }

    /// Build state from configuration and collaborators, validating the
    /// lifecycle table.
    pub fn with_config(config: AppConfig, collaborators: Collaborators) -> Result<Self, ConfigError> {
        let engine = LifecycleEngine::new(config.lifecycle)?;
        Ok(Self::with_engine(config, engine, collaborators))
    }

    /// Attach the Prometheus recorder handle used by `/metrics`.
    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }

    fn with_engine(config: AppConfig, engine: LifecycleEngine, collaborators: Collaborators) -> Self {
        let population = Arc::new(PopulationCounters::seeded(config.population_seed));
        let session = SessionController::new(
            engine,
            collaborators.ledger,
            collaborators.narrative,
            population,
            config.mint_costs,
            config.call_timeout,
        );
        Self {
            config: Arc::new(config),
            session: Arc::new(session),
            prometheus: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
