// SPDX-License-Identifier: MIT
// Copyright 2026 The pulse-games Authors

//! Pulse Games API Server
//!
//! Signs players in with Google, hands their recent vitals to the game
//! client, and stores per-game session records.

use pulse_games::{config::Config, db::SessionDb, services::GoogleService, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Pulse Games API");

    // Connect to Postgres
    let db = SessionDb::connect(&config.database_url, config.db_max_connections).await?;

    let google_service = GoogleService::new(&config)?;
    tracing::info!(
        window_hours = config.fitness_window_hours,
        "Google service initialized"
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        google_service,
    });

    // Build router
    let app = pulse_games::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::from_default_env()
        .add_directive("pulse_games=debug".parse()?)
        .add_directive("info".parse()?);

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
    Ok(())
}
