// SPDX-License-Identifier: MIT
// Copyright 2026 The pulse-games Authors

//! Postgres client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Games (read-only catalog)
//! - Sessions (health metrics recorded after each game)

use crate::db::HISTORY_LIMIT;
use crate::error::AppError;
use crate::models::{Game, NewSession, SessionRecord};
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Session store handle. Cheap to clone.
#[derive(Clone)]
pub struct SessionDb {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Postgres(PgPool),
    Memory(Arc<RwLock<MemoryTables>>),
}

/// In-memory tables backing the mock store.
#[derive(Default)]
struct MemoryTables {
    games: Vec<Game>,
    sessions: Vec<StoredSession>,
    next_session_id: i32,
}

struct StoredSession {
    id: i32,
    access_token: String,
    google_id: String,
    game_id: i32,
    heart_rate: Option<f64>,
    systolic: Option<f64>,
    diastolic: Option<f64>,
    recorded_at: DateTime<Utc>,
}

impl SessionDb {
    /// Connect to Postgres.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Postgres: {}", e)))?;

        tracing::info!(max_connections, "Connected to Postgres");

        Ok(Self {
            backend: Backend::Postgres(pool),
        })
    }

    /// Create an in-memory store for testing (offline mode).
    pub fn new_mock() -> Self {
        Self::new_mock_with_games(Vec::new())
    }

    /// Create an in-memory store pre-populated with a game catalog.
    pub fn new_mock_with_games(games: Vec<Game>) -> Self {
        let tables = MemoryTables {
            games,
            sessions: Vec::new(),
            next_session_id: 1,
        };
        Self {
            backend: Backend::Memory(Arc::new(RwLock::new(tables))),
        }
    }

    // ─── Game Operations ─────────────────────────────────────────

    /// List the game catalog ordered by name.
    pub async fn list_games(&self) -> Result<Vec<Game>, AppError> {
        match &self.backend {
            Backend::Postgres(pool) => {
                let rows = sqlx::query("SELECT id, nome, frases FROM jogos ORDER BY nome")
                    .fetch_all(pool)
                    .await
                    .map_err(|e| AppError::Database(format!("Failed to list games: {e}")))?;

                rows.iter().map(row_to_game).collect()
            }
            Backend::Memory(tables) => {
                let mut games = tables.read().await.games.clone();
                games.sort_by(|a, b| a.name.cmp(&b.name));
                Ok(games)
            }
        }
    }

    // ─── Session Operations ──────────────────────────────────────

    /// Store a session record for `google_id`. Returns the new record ID.
    pub async fn insert_session(
        &self,
        google_id: &str,
        session: &NewSession,
        recorded_at: DateTime<Utc>,
    ) -> Result<i32, AppError> {
        match &self.backend {
            Backend::Postgres(pool) => {
                let row = sqlx::query(
                    r"
                    INSERT INTO dados_usuario (
                        access_token, google_id, jogo_id, frequencia_cardiaca,
                        pressao_sistolica, pressao_diastolica, data
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                    RETURNING id
                    ",
                )
                .bind(&session.token)
                .bind(google_id)
                .bind(session.game_id)
                .bind(session.heart_rate)
                .bind(session.systolic)
                .bind(session.diastolic)
                .bind(recorded_at)
                .fetch_one(pool)
                .await
                .map_err(|e| AppError::Database(format!("Failed to save session: {e}")))?;

                Ok(row.try_get("id")?)
            }
            Backend::Memory(tables) => {
                let mut tables = tables.write().await;
                let id = tables.next_session_id;
                tables.next_session_id += 1;
                tables.sessions.push(StoredSession {
                    id,
                    access_token: session.token.clone(),
                    google_id: google_id.to_string(),
                    game_id: session.game_id,
                    heart_rate: session.heart_rate,
                    systolic: session.systolic,
                    diastolic: session.diastolic,
                    recorded_at,
                });
                Ok(id)
            }
        }
    }

    /// Most recent sessions for a user, optionally limited to one game.
    ///
    /// Returns at most `HISTORY_LIMIT` records, oldest first.
    pub async fn recent_sessions(
        &self,
        google_id: &str,
        game_id: Option<i32>,
    ) -> Result<Vec<SessionRecord>, AppError> {
        let mut records = match &self.backend {
            Backend::Postgres(pool) => {
                let rows = sqlx::query(
                    r"
                    SELECT d.id, d.access_token, d.google_id, d.jogo_id,
                           d.frequencia_cardiaca, d.pressao_sistolica,
                           d.pressao_diastolica, d.data, j.nome AS nome_jogo
                    FROM dados_usuario d
                    JOIN jogos j ON d.jogo_id = j.id
                    WHERE d.google_id = $1
                      AND ($2::INTEGER IS NULL OR d.jogo_id = $2)
                    ORDER BY d.data DESC
                    LIMIT $3
                    ",
                )
                .bind(google_id)
                .bind(game_id)
                .bind(HISTORY_LIMIT as i64)
                .fetch_all(pool)
                .await
                .map_err(|e| AppError::Database(format!("Failed to load history: {e}")))?;

                rows.iter()
                    .map(row_to_session)
                    .collect::<Result<Vec<_>, _>>()?
            }
            Backend::Memory(tables) => {
                let tables = tables.read().await;
                let mut records: Vec<SessionRecord> = tables
                    .sessions
                    .iter()
                    .filter(|s| s.google_id == google_id)
                    .filter(|s| game_id.map_or(true, |g| s.game_id == g))
                    .filter_map(|s| {
                        // Inner join: sessions for unknown games are dropped.
                        let game = tables.games.iter().find(|g| g.id == s.game_id)?;
                        Some(SessionRecord {
                            id: s.id,
                            access_token: s.access_token.clone(),
                            google_id: s.google_id.clone(),
                            game_id: s.game_id,
                            heart_rate: s.heart_rate,
                            systolic: s.systolic,
                            diastolic: s.diastolic,
                            recorded_at: s.recorded_at,
                            game_name: game.name.clone(),
                        })
                    })
                    .collect();
                records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
                records.truncate(HISTORY_LIMIT);
                records
            }
        };

        // Newest-first from the query; clients want oldest-first.
        records.reverse();
        Ok(records)
    }
}

fn row_to_game(row: &PgRow) -> Result<Game, AppError> {
    Ok(Game {
        id: row.try_get("id")?,
        name: row.try_get("nome")?,
        phrases: row.try_get("frases")?,
    })
}

fn row_to_session(row: &PgRow) -> Result<SessionRecord, AppError> {
    Ok(SessionRecord {
        id: row.try_get("id")?,
        access_token: row.try_get("access_token")?,
        google_id: row.try_get("google_id")?,
        game_id: row.try_get("jogo_id")?,
        heart_rate: row.try_get("frequencia_cardiaca")?,
        systolic: row.try_get("pressao_sistolica")?,
        diastolic: row.try_get("pressao_diastolica")?,
        recorded_at: row.try_get("data")?,
        game_name: row.try_get("nome_jogo")?,
    })
}
