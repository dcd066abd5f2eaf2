//! Narrative collaborator: reaction lines and species lore.
//!
//! The narrative service is decoration. Callers map any
//! [`NarrativeError`] to display text with [`fallback_text`] and carry on.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use hg_core::Species;
use hg_state::{Pet, ReactionEvent};

use crate::error::NarrativeError;

/// Shown when no narrative credential is configured.
pub const FALLBACK_UNCONFIGURED: &str = "ERROR: CONNECTION LOST...";

/// Shown when the narrative call fails or times out.
pub const FALLBACK_FAILED: &str = "...";

/// Display text for a failed reaction request.
pub fn fallback_text(err: &NarrativeError) -> &'static str {
    match err {
        NarrativeError::NotConfigured => FALLBACK_UNCONFIGURED,
        _ => FALLBACK_FAILED,
    }
}

/// Produces short in-character text.
#[async_trait]
pub trait NarrativeAdapter: Send + Sync {
    /// One reaction line for `pet` responding to `event`.
    async fn describe_reaction(&self, pet: &Pet, event: ReactionEvent)
        -> Result<String, NarrativeError>;

    /// A one-sentence lore snippet for `species`.
    async fn describe_species(&self, species: Species) -> Result<String, NarrativeError>;

    fn adapter_name(&self) -> &str;
}

// -- Wire types ---------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, trimmed. `None` when empty.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

// -- HTTP adapter -------------------------------------------------------------

/// Narrative adapter backed by a `generateContent` endpoint.
#[derive(Clone)]
pub struct HttpNarrativeAdapter {
    http: reqwest::Client,
    base_url: url::Url,
    model: String,
    api_key: String,
}

impl std::fmt::Debug for HttpNarrativeAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpNarrativeAdapter")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpNarrativeAdapter {
    pub fn new(http: reqwest::Client, base_url: url::Url, model: String, api_key: String) -> Self {
        Self {
            http,
            base_url,
            model,
            api_key,
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, NarrativeError> {
        let endpoint = format!("POST /v1beta/models/{}:generateContent", self.model);
        let url = format!(
            "{}v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let resp = crate::retry::retry_send(|| {
            self.http
                .post(&url)
                .query(&[("key", self.api_key.as_str())])
                .json(&body)
                .send()
        })
        .await
        .map_err(|e| NarrativeError::Http {
            endpoint: endpoint.clone(),
            source: e,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(NarrativeError::ApiError {
                endpoint,
                status,
                body,
            });
        }

        let parsed: GenerateResponse =
            resp.json()
                .await
                .map_err(|e| NarrativeError::Deserialization {
                    endpoint: endpoint.clone(),
                    source: e,
                })?;
        parsed.into_text().ok_or(NarrativeError::EmptyResponse)
    }
}

#[async_trait]
impl NarrativeAdapter for HttpNarrativeAdapter {
    async fn describe_reaction(
        &self,
        pet: &Pet,
        event: ReactionEvent,
    ) -> Result<String, NarrativeError> {
        self.generate(&crate::prompt::reaction(pet, event)).await
    }

    async fn describe_species(&self, species: Species) -> Result<String, NarrativeError> {
        self.generate(&crate::prompt::lore(species)).await
    }

    fn adapter_name(&self) -> &str {
        "http-narrative"
    }
}

/// Narrative adapter used when no credential is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredNarrative;

#[async_trait]
impl NarrativeAdapter for UnconfiguredNarrative {
    async fn describe_reaction(&self, _: &Pet, _: ReactionEvent) -> Result<String, NarrativeError> {
        Err(NarrativeError::NotConfigured)
    }

    async fn describe_species(&self, _: Species) -> Result<String, NarrativeError> {
        Err(NarrativeError::NotConfigured)
    }

    fn adapter_name(&self) -> &str {
        "unconfigured"
    }
}

// -- Mock adapter -------------------------------------------------------------

/// Scripted narrative adapter for tests.
#[derive(Debug, Default)]
pub struct MockNarrativeAdapter {
    reply: Option<String>,
    delay: Option<Duration>,
    events: Mutex<Vec<ReactionEvent>>,
}

impl MockNarrativeAdapter {
    /// Answers every request with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            ..Self::default()
        }
    }

    /// Fails every request with an empty response.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Reaction events requested so far.
    pub fn events(&self) -> Vec<ReactionEvent> {
        self.events.lock().clone()
    }

    async fn answer(&self) -> Result<String, NarrativeError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply.clone().ok_or(NarrativeError::EmptyResponse)
    }
}

#[async_trait]
impl NarrativeAdapter for MockNarrativeAdapter {
    async fn describe_reaction(&self, _: &Pet, event: ReactionEvent) -> Result<String, NarrativeError> {
        self.events.lock().push(event);
        self.answer().await
    }

    async fn describe_species(&self, _: Species) -> Result<String, NarrativeError> {
        self.answer().await
    }

    fn adapter_name(&self) -> &str {
        "mock-narrative"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_core::{PetId, Timestamp};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pet() -> Pet {
        Pet::minted(PetId::new(), Species::Mammoth, 0, Timestamp::now())
    }

    fn adapter(server: &MockServer) -> HttpNarrativeAdapter {
        HttpNarrativeAdapter::new(
            reqwest::Client::new(),
            server.uri().parse().unwrap(),
            "gemini-2.5-flash".into(),
            "sk-test".into(),
        )
    }

    #[tokio::test]
    async fn reaction_reads_first_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(query_param("key", "sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [
                    {"content": {"parts": [{"text": "  YUM! HP RESTORED!\n"}]}}
                ]
            })))
            .mount(&server)
            .await;

        let text = adapter(&server)
            .describe_reaction(&pet(), ReactionEvent::Feed)
            .await
            .unwrap();
        assert_eq!(text, "YUM! HP RESTORED!");
    }

    #[tokio::test]
    async fn empty_candidates_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": []
            })))
            .mount(&server)
            .await;

        let err = adapter(&server)
            .describe_species(Species::Dodo)
            .await
            .unwrap_err();
        assert!(matches!(err, NarrativeError::EmptyResponse));
        assert_eq!(fallback_text(&err), FALLBACK_FAILED);
    }

    #[tokio::test]
    async fn server_error_falls_back_to_ellipsis() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota"))
            .mount(&server)
            .await;

        let err = adapter(&server)
            .describe_reaction(&pet(), ReactionEvent::Pet)
            .await
            .unwrap_err();
        assert!(matches!(err, NarrativeError::ApiError { status: 429, .. }));
        assert_eq!(fallback_text(&err), "...");
    }

    #[tokio::test]
    async fn unconfigured_reports_connection_lost() {
        let err = UnconfiguredNarrative
            .describe_reaction(&pet(), ReactionEvent::Clean)
            .await
            .unwrap_err();
        assert_eq!(fallback_text(&err), "ERROR: CONNECTION LOST...");
    }

    #[test]
    fn debug_redacts_api_key() {
        let adapter = HttpNarrativeAdapter::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1".parse().unwrap(),
            "m".into(),
            "sk-secret".into(),
        );
        assert!(!format!("{adapter:?}").contains("sk-secret"));
    }

    #[tokio::test]
    async fn mock_records_events() {
        let mock = MockNarrativeAdapter::replying("HEARTS INCREASING!");
        let text = mock.describe_reaction(&pet(), ReactionEvent::Evolve).await.unwrap();
        assert_eq!(text, "HEARTS INCREASING!");
        assert_eq!(mock.events(), vec![ReactionEvent::Evolve]);
    }
}
