// SPDX-License-Identifier: MIT
// Copyright 2026 The pulse-games Authors

//! Google OAuth authentication routes.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::vitals::format_metric;
use crate::services::CallbackOutcome;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/google", get(auth_start))
        .route("/callback", get(auth_callback))
}

/// Start OAuth flow - redirect to the Google consent screen.
async fn auth_start(State(state): State<Arc<AppState>>) -> Response {
    let auth_url = state.google_service.authorization_url();

    tracing::info!(
        client_id = %state.config.google_client_id,
        "Starting OAuth flow, redirecting to Google"
    );

    found(&auth_url)
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - exchange code, summarize vitals, redirect to the client.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Result<Response> {
    if let Some(error) = &params.error {
        tracing::warn!(error = %error, "OAuth error from Google");
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Authorization code not provided".to_string()))?;

    tracing::info!("Exchanging authorization code for tokens");

    let outcome = state.google_service.handle_oauth_callback(&code).await?;

    Ok(found(&client_redirect_url(&state.config.frontend_url, &outcome)))
}

/// Client callback URL carrying the token and the summarized vitals.
///
/// Missing values are sent as the literal `null`; the client relies on it.
pub fn client_redirect_url(frontend_url: &str, outcome: &CallbackOutcome) -> String {
    let gid = outcome
        .identity
        .as_ref()
        .map(|id| id.as_str())
        .unwrap_or("null");

    format!(
        "{}/callback?token={}&hr={}&bp_systolic={}&bp_diastolic={}&gid={}",
        frontend_url.trim_end_matches('/'),
        urlencoding::encode(&outcome.tokens.access_token),
        format_metric(outcome.vitals.heart_rate),
        format_metric(outcome.vitals.systolic),
        format_metric(outcome.vitals.diastolic),
        urlencoding::encode(gid),
    )
}

/// `302 Found` to `location`.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
