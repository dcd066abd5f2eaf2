//! # hg-client: Outbound Collaborators
//!
//! Typed access to the two external systems the game leans on:
//!
//! - **Ledger** ([`ledger::LedgerAdapter`]): records mints and evolutions.
//!   The HTTP implementation talks to a ledger gateway that owns wallet
//!   signing and block confirmation; this crate never speaks a chain
//!   protocol itself.
//! - **Narrative** ([`narrative::NarrativeAdapter`]): short in-character
//!   reaction lines and species lore from a generative-text service.
//!
//! Both are object-safe traits so the session controller can hold
//! `Arc<dyn …>` and tests can swap in the mock implementations.
//!
//! ## Failure Policy
//!
//! Mint failures are hard errors ([`LedgerError`]). Evolution records and
//! narrative text are best-effort: callers degrade to
//! [`narrative::fallback_text`] and keep the local state change.

pub mod config;
pub mod error;
pub mod ledger;
pub mod narrative;
pub(crate) mod prompt;
pub(crate) mod retry;

use std::sync::Arc;
use std::time::Duration;

pub use config::{ClientConfig, ConfigError};
pub use error::{LedgerError, MintRejection, NarrativeError};
pub use ledger::{HttpLedgerAdapter, LedgerAdapter, MintRequest, MockLedgerAdapter};
pub use narrative::{
    fallback_text, HttpNarrativeAdapter, MockNarrativeAdapter, NarrativeAdapter,
    UnconfiguredNarrative, FALLBACK_FAILED, FALLBACK_UNCONFIGURED,
};

/// Build the shared HTTP client used by every adapter.
pub(crate) fn build_http(timeout_secs: u64) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Adapters selected from configuration.
#[derive(Clone)]
pub struct Collaborators {
    pub ledger: Arc<dyn LedgerAdapter>,
    pub narrative: Arc<dyn NarrativeAdapter>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("ledger", &self.ledger.adapter_name())
            .field("narrative", &self.narrative.adapter_name())
            .finish()
    }
}

impl Collaborators {
    /// Wire adapters from configuration.
    ///
    /// Without `HG_LEDGER_URL` the in-process mock ledger is used, which
    /// confirms every mint. Without a narrative credential every reaction
    /// degrades to [`FALLBACK_UNCONFIGURED`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let http = build_http(config.timeout_secs)
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let ledger: Arc<dyn LedgerAdapter> = match &config.ledger_url {
            Some(url) => Arc::new(HttpLedgerAdapter::new(
                http.clone(),
                url.clone(),
                config.ledger_token.clone(),
            )),
            None => {
                tracing::warn!("HG_LEDGER_URL not set; using in-process mock ledger");
                Arc::new(MockLedgerAdapter::new())
            }
        };

        let narrative: Arc<dyn NarrativeAdapter> = match &config.narrative_api_key {
            Some(key) => Arc::new(HttpNarrativeAdapter::new(
                http,
                config.narrative_url.clone(),
                config.narrative_model.clone(),
                key.clone(),
            )),
            None => {
                tracing::warn!("HG_NARRATIVE_API_KEY not set; reactions use fallback text");
                Arc::new(UnconfiguredNarrative)
            }
        };

        Ok(Self { ledger, narrative })
    }
}
