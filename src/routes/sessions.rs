// SPDX-License-Identifier: MIT
// Copyright 2026 The pulse-games Authors

//! Game catalog and session history routes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::session::optional_game_id;
use crate::models::{Game, NewSession, SessionRecord};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/jogos", get(list_games))
        .route("/dados-historicos", get(session_history))
        .route("/save-game", post(save_session))
}

/// List the game catalog.
async fn list_games(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Game>>> {
    let games = state.db.list_games().await?;
    Ok(Json(games))
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(rename = "googleId")]
    google_id: String,
    #[serde(rename = "jogo", default, deserialize_with = "optional_game_id")]
    game_id: Option<i32>,
}

/// Recent session records for a player, oldest first.
async fn session_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<SessionRecord>>> {
    tracing::debug!(
        google_id = %params.google_id,
        game_id = ?params.game_id,
        "Loading session history"
    );

    let records = state
        .db
        .recent_sessions(&params.google_id, params.game_id)
        .await?;
    Ok(Json(records))
}

#[derive(Debug, Serialize)]
pub struct SaveSessionResponse {
    pub id: i32,
}

/// Store a session record for the owner of the supplied Google token.
async fn save_session(
    State(state): State<Arc<AppState>>,
    Json(session): Json<NewSession>,
) -> Result<(StatusCode, Json<SaveSessionResponse>)> {
    let google_id = state
        .google_service
        .resolve_identity(&session.token)
        .await
        .ok_or_else(|| AppError::BadRequest("Invalid token".to_string()))?;

    let id = state
        .db
        .insert_session(google_id.as_str(), &session, chrono::Utc::now())
        .await?;

    tracing::info!(id, game_id = session.game_id, "Session saved");

    Ok((StatusCode::CREATED, Json(SaveSessionResponse { id })))
}
