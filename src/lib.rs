// SPDX-License-Identifier: MIT
// Copyright 2026 The pulse-games Authors

//! Pulse Games: heart-rate and blood-pressure readings for game sessions.
//!
//! This crate provides the backend API that signs players in with Google,
//! summarizes their recent vitals from Google Fit, and stores per-game
//! session records.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::SessionDb;
use services::GoogleService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: SessionDb,
    pub google_service: GoogleService,
}
