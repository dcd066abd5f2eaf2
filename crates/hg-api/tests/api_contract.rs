//! # HTTP Contract Tests for hg-api
//!
//! Drives the full router with `tower::ServiceExt::oneshot` against the
//! in-process mock ledger and the unconfigured narrative adapter.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use hg_api::{AppConfig, AppState};
use hg_client::{Collaborators, MintRejection, MockLedgerAdapter, MockNarrativeAdapter, UnconfiguredNarrative};

const OWNER: &str = "0xA11CE";

/// Helper: state with the mock ledger and no narrative credential.
fn test_state() -> AppState {
    AppState::new()
}

fn state_with(ledger: MockLedgerAdapter, narrative: MockNarrativeAdapter) -> AppState {
    let collaborators = Collaborators {
        ledger: Arc::new(ledger),
        narrative: Arc::new(narrative),
    };
    let config = AppConfig {
        call_timeout: Duration::from_secs(2),
        ..AppConfig::default()
    };
    AppState::with_config(config, collaborators).unwrap()
}

async fn send(state: &AppState, request: Request<Body>) -> axum::http::Response<Body> {
    hg_api::app(state.clone()).oneshot(request).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Mint through the API and return the pet id.
async fn mint(state: &AppState, species: &str) -> String {
    let response = send(
        state,
        post_json(
            &format!("/v1/owners/{OWNER}/pets"),
            serde_json::json!({ "species": species }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

async fn interact(state: &AppState, id: &str, kind: &str) -> axum::http::Response<Body> {
    send(
        state,
        post_json(
            &format!("/v1/pets/{id}/interactions"),
            serde_json::json!({ "kind": kind }),
        ),
    )
    .await
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn liveness_and_readiness() {
    let state = test_state();
    let response = send(&state, get("/health/liveness")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");

    let response = send(&state, get("/health/readiness")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- Species ------------------------------------------------------------------

#[tokio::test]
async fn species_catalog_lists_four() {
    let response = send(&test_state(), get("/v1/species")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Dodo", "Woolly Mammoth", "Thylacine", "Irish Elk"]);
}

#[tokio::test]
async fn species_lookup_by_slug_and_unknown() {
    let state = test_state();
    let response = send(&state, get("/v1/species/irish-elk")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["scientific_name"], "Megaloceros giganteus");

    let response = send(&state, get("/v1/species/moa")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn lore_without_credential_uses_catalog_story() {
    let response = send(&test_state(), get("/v1/species/dodo/lore")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["source"], "catalog");
    assert!(json["text"].as_str().unwrap().contains("Dodo"));
}

// -- Minting ------------------------------------------------------------------

#[tokio::test]
async fn mint_creates_infant_and_credits_population() {
    let state = test_state();
    let response = send(
        &state,
        post_json(&format!("/v1/owners/{OWNER}/pets"), serde_json::json!({ "species": "Dodo" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let pet = body_json(response).await;
    assert_eq!(pet["name"], "Dodo #1");
    assert_eq!(pet["stage"], "Infant");
    assert_eq!(pet["stats"]["hunger"], 0);
    assert_eq!(pet["generation"], 1);

    let inventory = body_json(send(&state, get(&format!("/v1/owners/{OWNER}/pets"))).await).await;
    assert_eq!(inventory.as_array().unwrap().len(), 1);

    let population = body_json(send(&state, get("/v1/population")).await).await;
    assert_eq!(population["total"], 1);
}

#[tokio::test]
async fn mint_with_empty_body_picks_random_species() {
    let state = test_state();
    let response = send(
        &state,
        post_json(&format!("/v1/owners/{OWNER}/pets"), serde_json::json!({})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(body_json(response).await["species"].is_string());
}

#[tokio::test]
async fn mint_unknown_species_is_422() {
    let response = send(
        &test_state(),
        post_json(&format!("/v1/owners/{OWNER}/pets"), serde_json::json!({ "species": "Moa" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn mint_malformed_json_is_400() {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/v1/owners/{OWNER}/pets"))
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = send(&test_state(), request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_owner_is_422() {
    let response = send(&test_state(), get("/v1/owners/bad%20owner/pets")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn rejected_mint_is_502_and_changes_nothing() {
    let state = state_with(
        MockLedgerAdapter::rejecting(MintRejection::InsufficientFunds),
        MockNarrativeAdapter::failing(),
    );
    let response = send(
        &state,
        post_json(&format!("/v1/owners/{OWNER}/pets"), serde_json::json!({ "species": "Dodo" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "MINT_FAILED");
    assert_eq!(json["error"]["details"]["reason"], "INSUFFICIENT_FUNDS");

    let inventory = body_json(send(&state, get(&format!("/v1/owners/{OWNER}/pets"))).await).await;
    assert!(inventory.as_array().unwrap().is_empty());
    let population = body_json(send(&state, get("/v1/population")).await).await;
    assert_eq!(population["total"], 0);
}

#[tokio::test]
async fn mint_quote_follows_schedule() {
    let state = test_state();
    let quote = body_json(send(&state, get(&format!("/v1/owners/{OWNER}/mint-quote"))).await).await;
    assert_eq!(quote["cost"], "0.0001");
    assert_eq!(quote["sequence_index"], 0);

    mint(&state, "Mammoth").await;
    let quote = body_json(send(&state, get(&format!("/v1/owners/{OWNER}/mint-quote"))).await).await;
    assert_eq!(quote["cost"], "0.001");
    assert_eq!(quote["sequence_index"], 1);
}

// -- Interactions -------------------------------------------------------------

#[tokio::test]
async fn feed_raises_hunger_with_fallback_reaction() {
    let state = test_state();
    let id = mint(&state, "Thylacine").await;

    let response = interact(&state, &id, "feed").await;
    assert_eq!(response.status(), StatusCode::OK);
    let outcome = body_json(response).await;
    assert_eq!(outcome["pet"]["stats"]["hunger"], 10);
    assert_eq!(outcome["pet"]["stats"]["intimacy"], 0);
    assert_eq!(outcome["transitioned"], false);
    assert_eq!(outcome["reaction"], "ERROR: CONNECTION LOST...");
    assert!(outcome["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn reaction_comes_from_narrative_when_configured() {
    let state = state_with(MockLedgerAdapter::new(), MockNarrativeAdapter::replying("YUM! HP RESTORED!"));
    let id = mint(&state, "Dodo").await;
    let outcome = body_json(interact(&state, &id, "feed").await).await;
    assert_eq!(outcome["reaction"], "YUM! HP RESTORED!");
}

#[tokio::test]
async fn narrative_failure_is_a_warning_not_an_error() {
    let state = state_with(MockLedgerAdapter::new(), MockNarrativeAdapter::failing());
    let id = mint(&state, "Dodo").await;
    let response = interact(&state, &id, "clean").await;
    assert_eq!(response.status(), StatusCode::OK);
    let outcome = body_json(response).await;
    assert_eq!(outcome["reaction"], "...");
    assert_eq!(outcome["warnings"][0]["collaborator"], "narrative");
    assert_eq!(outcome["pet"]["stats"]["health"], 10);
}

#[tokio::test]
async fn three_interactions_per_axis_evolve_to_adult() {
    let state = test_state();
    let id = mint(&state, "Dodo").await;
    for kind in ["feed", "pet", "clean"] {
        for _ in 0..2 {
            interact(&state, &id, kind).await;
        }
    }
    interact(&state, &id, "feed").await;
    interact(&state, &id, "pet").await;
    let outcome = body_json(interact(&state, &id, "clean").await).await;
    assert_eq!(outcome["transitioned"], true);
    assert_eq!(outcome["transition"]["from"], "Infant");
    assert_eq!(outcome["transition"]["to"], "Adult");
    assert_eq!(outcome["pet"]["stage"], "Adult");

    let detail = body_json(send(&state, get(&format!("/v1/pets/{id}"))).await).await;
    assert_eq!(detail["transitions"].as_array().unwrap().len(), 1);
    assert_eq!(detail["transitions"][0]["trigger"], "clean");
    assert_eq!(detail["progress"]["hunger"], 2);
    assert_eq!(detail["owner"], "0xa11ce");

    let population = body_json(send(&state, get("/v1/population")).await).await;
    assert_eq!(population["total"], 1);
}

#[tokio::test]
async fn unknown_pet_is_404() {
    let response = interact(&test_state(), "3f2b8a6e-8d4c-4c5e-9a7b-2f1e0d9c8b7a", "feed").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = send(&test_state(), get("/v1/pets/not-a-uuid")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_interaction_kind_is_422() {
    let state = test_state();
    let id = mint(&state, "Dodo").await;
    let response = interact(&state, &id, "groom").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// -- Population & Config ------------------------------------------------------

#[tokio::test]
async fn population_history_grows_with_mints() {
    let state = test_state();
    mint(&state, "Dodo").await;
    mint(&state, "Dodo").await;
    let history = body_json(send(&state, get("/v1/population/history")).await).await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[2]["total"], 2);
}

#[tokio::test]
async fn lifecycle_config_exposes_thresholds() {
    let json = body_json(send(&test_state(), get("/v1/lifecycle/config")).await).await;
    assert_eq!(json["gains"]["feed"], 10);
    assert_eq!(json["thresholds"]["breeding"]["hunger"], 100);
    assert_eq!(json["thresholds"]["matriarch"]["health"], 200);
}

#[tokio::test]
async fn metrics_endpoint_reports_request_counters() {
    let response = send(&test_state(), get("/metrics")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("hg_http_requests_total"));
}

#[tokio::test]
async fn unconfigured_narrative_state_builds() {
    let collaborators = Collaborators {
        ledger: Arc::new(MockLedgerAdapter::new()),
        narrative: Arc::new(UnconfiguredNarrative),
    };
    assert!(AppState::with_config(AppConfig::default(), collaborators).is_ok());
}
