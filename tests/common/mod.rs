// SPDX-License-Identifier: MIT
// Copyright 2026 The pulse-games Authors

use pulse_games::config::{Config, GoogleEndpoints};
use pulse_games::db::SessionDb;
use pulse_games::models::Game;
use pulse_games::routes::create_router;
use pulse_games::services::GoogleService;
use pulse_games::AppState;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const ACCESS_TOKEN: &str = "ya29.test-access-token";
#[allow(dead_code)]
pub const GOOGLE_SUB: &str = "109876543210987654321";
#[allow(dead_code)]
pub const HR_SOURCE: &str =
    "derived:com.google.heart_rate.summary:com.google.android.gms:aggregated";
#[allow(dead_code)]
pub const BP_SOURCE: &str =
    "derived:com.google.blood_pressure.summary:com.google.android.gms:aggregated";

/// Config whose Google endpoints all point at `server`.
#[allow(dead_code)]
pub fn test_config(server: &MockServer) -> Config {
    let base = server.uri();
    Config {
        google_endpoints: GoogleEndpoints {
            auth_url: format!("{}/o/oauth2/v2/auth", base),
            token_url: format!("{}/token", base),
            userinfo_url: format!("{}/oauth2/v3/userinfo", base),
            fitness_url: format!("{}/fitness/v1", base),
        },
        ..Config::test_default()
    }
}

/// Games available in the in-memory store.
#[allow(dead_code)]
pub fn test_games() -> Vec<Game> {
    vec![
        Game {
            id: 1,
            name: "Labirinto".to_string(),
            phrases: Some("Mantenha a calma".to_string()),
        },
        Game {
            id: 2,
            name: "Corrida".to_string(),
            phrases: None,
        },
    ]
}

/// Create a test app backed by an in-memory store and a mock Google server.
/// Returns the router, the shared state, and the mock server.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>, MockServer) {
    let server = MockServer::start().await;
    let config = test_config(&server);
    let google_service = GoogleService::new(&config).expect("Failed to build Google service");

    let state = Arc::new(AppState {
        config,
        db: SessionDb::new_mock_with_games(test_games()),
        google_service,
    });

    (create_router(state.clone()), state, server)
}

/// Token endpoint accepts any code.
#[allow(dead_code)]
pub async fn mock_token_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "refresh_token": "1//refresh",
            "expires_in": 3599,
            "scope": "openid https://www.googleapis.com/auth/fitness.heart_rate.read",
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
}

/// Userinfo endpoint returns `GOOGLE_SUB` for `ACCESS_TOKEN`.
#[allow(dead_code)]
pub async fn mock_userinfo_success(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/oauth2/v3/userinfo"))
        .and(header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sub": GOOGLE_SUB,
            "email": "player@example.com"
        })))
        .mount(server)
        .await;
}

/// Aggregate endpoint returns `body`.
#[allow(dead_code)]
pub async fn mock_aggregate(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/fitness/v1/users/me/dataset:aggregate"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Number of requests `server` received on `request_path`.
#[allow(dead_code)]
pub async fn request_count(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == request_path)
        .count()
}
