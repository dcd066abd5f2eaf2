//! Collaborator configuration.
//!
//! Everything is environment-supplied so deployments can repoint the
//! ledger gateway or rotate the narrative credential without a rebuild.

use url::Url;

/// Default generative-text endpoint.
pub const DEFAULT_NARRATIVE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default generative-text model.
pub const DEFAULT_NARRATIVE_MODEL: &str = "gemini-2.5-flash";

/// Configuration for the ledger and narrative collaborators.
///
/// Custom `Debug` implementation redacts the credentials.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the ledger gateway. `None` selects the mock ledger.
    pub ledger_url: Option<Url>,
    /// Bearer token presented to the ledger gateway.
    pub ledger_token: Option<String>,
    /// Base URL of the generative-text service.
    pub narrative_url: Url,
    /// Model name used for reaction and lore prompts.
    pub narrative_model: String,
    /// Narrative credential. `None` selects fallback text.
    pub narrative_api_key: Option<String>,
    /// Per-request HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("ClientConfig")
            .field("ledger_url", &self.ledger_url)
            .field("ledger_token", &redact(&self.ledger_token))
            .field("narrative_url", &self.narrative_url)
            .field("narrative_model", &self.narrative_model)
            .field("narrative_api_key", &redact(&self.narrative_api_key))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `HG_LEDGER_URL` (optional; absent → mock ledger)
    /// - `HG_LEDGER_TOKEN` (optional)
    /// - `HG_NARRATIVE_URL` (default: `https://generativelanguage.googleapis.com`)
    /// - `HG_NARRATIVE_MODEL` (default: `gemini-2.5-flash`)
    /// - `HG_NARRATIVE_API_KEY` (optional; absent → fallback text)
    /// - `HG_CLIENT_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let ledger_url = match non_empty_var("HG_LEDGER_URL") {
            Some(raw) => Some(parse_url("HG_LEDGER_URL", &raw)?),
            None => None,
        };
        let narrative_url = parse_url(
            "HG_NARRATIVE_URL",
            &non_empty_var("HG_NARRATIVE_URL").unwrap_or_else(|| DEFAULT_NARRATIVE_URL.to_string()),
        )?;
        let timeout_secs = match non_empty_var("HG_CLIENT_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("HG_CLIENT_TIMEOUT_SECS".into(), raw))?,
            None => 30,
        };

        Ok(Self {
            ledger_url,
            ledger_token: non_empty_var("HG_LEDGER_TOKEN"),
            narrative_url,
            narrative_model: non_empty_var("HG_NARRATIVE_MODEL")
                .unwrap_or_else(|| DEFAULT_NARRATIVE_MODEL.to_string()),
            narrative_api_key: non_empty_var("HG_NARRATIVE_API_KEY"),
            timeout_secs,
        })
    }

    /// Configuration pointing both collaborators at a local mock server.
    pub fn local_mock(base: &str, narrative_key: Option<&str>) -> Result<Self, ConfigError> {
        let url = parse_url("local_mock", base)?;
        Ok(Self {
            ledger_url: Some(url.clone()),
            ledger_token: Some("test-token".to_string()),
            narrative_url: url,
            narrative_model: DEFAULT_NARRATIVE_MODEL.to_string(),
            narrative_api_key: narrative_key.map(str::to_string),
            timeout_secs: 5,
        })
    }

    /// Mock ledger and no narrative credential; nothing leaves the process.
    pub fn offline() -> Result<Self, ConfigError> {
        Ok(Self {
            ledger_url: None,
            ledger_token: None,
            narrative_url: parse_url("offline", DEFAULT_NARRATIVE_URL)?,
            narrative_model: DEFAULT_NARRATIVE_MODEL.to_string(),
            narrative_api_key: None,
            timeout_secs: 30,
        })
    }
}

fn non_empty_var(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn parse_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid number for {0}: {1:?}")]
    InvalidNumber(String, String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
