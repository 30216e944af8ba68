//! Database layer (Postgres).
//!
//! Tables:
//! - `jogos (id, nome, frases)`: game catalog
//! - `dados_usuario (id, access_token, google_id, jogo_id, frequencia_cardiaca,
//!   pressao_sistolica, pressao_diastolica, data)`: per-session health records

pub mod postgres;

pub use postgres::SessionDb;

/// How many records the history endpoint returns.
pub const HISTORY_LIMIT: usize = 7;
