// SPDX-License-Identifier: MIT
// Copyright 2026 The pulse-games Authors

//! Integration tests for the Postgres session store.
//!
//! These tests require a scratch Postgres database.
//! Run with: DATABASE_URL=postgres://... cargo test --test postgres_store_tests

use chrono::{DateTime, Duration, Utc};
use pulse_games::db::{SessionDb, HISTORY_LIMIT};
use pulse_games::models::NewSession;
use sqlx::postgres::PgPool;
use tokio::sync::OnceCell;

/// Check if a database is available via environment variable.
fn database_url() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

/// Skip test with message if no database is configured.
macro_rules! require_database {
    () => {
        match database_url() {
            Some(url) => url,
            None => {
                eprintln!("⚠️  Skipping: DATABASE_URL not set");
                eprintln!("   Run with: DATABASE_URL=postgres://... cargo test");
                return;
            }
        }
    };
}

static SCHEMA: OnceCell<()> = OnceCell::const_new();

/// Create the tables once per test run.
async fn ensure_schema(url: &str) {
    SCHEMA
        .get_or_init(|| async {
            let pool = PgPool::connect(url).await.unwrap();
            sqlx::query(
                r"
                CREATE TABLE IF NOT EXISTS jogos (
                    id SERIAL PRIMARY KEY,
                    nome TEXT NOT NULL,
                    frases TEXT
                )
                ",
            )
            .execute(&pool)
            .await
            .unwrap();
            sqlx::query(
                r"
                CREATE TABLE IF NOT EXISTS dados_usuario (
                    id SERIAL PRIMARY KEY,
                    access_token TEXT NOT NULL,
                    google_id TEXT NOT NULL,
                    jogo_id INTEGER NOT NULL REFERENCES jogos(id),
                    frequencia_cardiaca DOUBLE PRECISION,
                    pressao_sistolica DOUBLE PRECISION,
                    pressao_diastolica DOUBLE PRECISION,
                    data TIMESTAMPTZ NOT NULL
                )
                ",
            )
            .execute(&pool)
            .await
            .unwrap();
            pool.close().await;
        })
        .await;
}

/// Create a test database connection with the schema in place.
async fn test_db(url: &str) -> SessionDb {
    ensure_schema(url).await;
    SessionDb::connect(url, 2).await.unwrap()
}

/// Generate a unique suffix for test isolation.
fn unique_suffix() -> u128 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

/// Insert a game and return its ID.
async fn seed_game(url: &str, name: &str, phrases: Option<&str>) -> i32 {
    let pool = PgPool::connect(url).await.unwrap();
    let id: i32 =
        sqlx::query_scalar("INSERT INTO jogos (nome, frases) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(phrases)
            .fetch_one(&pool)
            .await
            .unwrap();
    pool.close().await;
    id
}

fn session(game_id: i32, heart_rate: Option<f64>) -> NewSession {
    NewSession {
        token: "ya29.stored-token".to_string(),
        game_id,
        heart_rate,
        systolic: Some(120.0),
        diastolic: None,
    }
}

/// Postgres keeps microseconds; start from a whole second so values compare equal.
fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(Utc::now().timestamp(), 0).unwrap()
}

#[tokio::test]
async fn test_list_games_decodes_rows() {
    let url = require_database!();
    let db = test_db(&url).await;
    let suffix = unique_suffix();
    let with_phrases = format!("Labirinto {}", suffix);
    let without_phrases = format!("Corrida {}", suffix);

    let first = seed_game(&url, &with_phrases, Some("Respire fundo")).await;
    let second = seed_game(&url, &without_phrases, None).await;

    let games = db.list_games().await.unwrap();

    let labirinto = games.iter().find(|g| g.id == first).unwrap();
    assert_eq!(labirinto.name, with_phrases);
    assert_eq!(labirinto.phrases.as_deref(), Some("Respire fundo"));

    let corrida = games.iter().find(|g| g.id == second).unwrap();
    assert_eq!(corrida.phrases, None);

    // Ordered by name.
    let position = |id: i32| games.iter().position(|g| g.id == id).unwrap();
    assert!(position(second) < position(first));
}

#[tokio::test]
async fn test_history_keeps_latest_seven_oldest_first() {
    let url = require_database!();
    let db = test_db(&url).await;
    let google_id = format!("sub-{}", unique_suffix());
    let game = seed_game(&url, &format!("Memória {}", unique_suffix()), None).await;
    let base = base_time();

    let mut ids = Vec::new();
    for i in 0..9 {
        let id = db
            .insert_session(
                &google_id,
                &session(game, Some(60.0 + i as f64)),
                base + Duration::minutes(i),
            )
            .await
            .unwrap();
        ids.push(id);
    }
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    let records = db.recent_sessions(&google_id, None).await.unwrap();

    assert_eq!(records.len(), HISTORY_LIMIT);
    let returned: Vec<_> = records.iter().map(|r| r.id).collect();
    assert_eq!(returned, ids[2..].to_vec());
    assert_eq!(records[0].recorded_at, base + Duration::minutes(2));
    assert_eq!(records[6].recorded_at, base + Duration::minutes(8));
    assert_eq!(records[0].heart_rate, Some(62.0));
    assert_eq!(records[0].systolic, Some(120.0));
    assert_eq!(records[0].diastolic, None);
    assert_eq!(records[0].access_token, "ya29.stored-token");
    assert_eq!(records[0].google_id, google_id);
    assert!(records[0].game_name.starts_with("Memória"));
}

#[tokio::test]
async fn test_history_filters_by_game() {
    let url = require_database!();
    let db = test_db(&url).await;
    let google_id = format!("sub-{}", unique_suffix());
    let maze = seed_game(&url, &format!("Labirinto {}", unique_suffix()), None).await;
    let race = seed_game(&url, &format!("Corrida {}", unique_suffix()), None).await;
    let base = base_time();

    db.insert_session(&google_id, &session(maze, Some(70.0)), base)
        .await
        .unwrap();
    db.insert_session(&google_id, &session(race, None), base + Duration::minutes(1))
        .await
        .unwrap();
    db.insert_session("someone-else", &session(race, Some(90.0)), base)
        .await
        .unwrap();

    let all = db.recent_sessions(&google_id, None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].game_id, maze);
    assert_eq!(all[1].game_id, race);

    let races = db.recent_sessions(&google_id, Some(race)).await.unwrap();
    assert_eq!(races.len(), 1);
    assert_eq!(races[0].game_id, race);
    assert_eq!(races[0].heart_rate, None);

    let unknown = db.recent_sessions(&google_id, Some(-1)).await.unwrap();
    assert!(unknown.is_empty());
}
