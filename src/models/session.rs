//! Game catalog and per-session health records.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Game from the `jogos` catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    /// Phrases shown by the client while the game runs
    #[serde(rename = "frases")]
    pub phrases: Option<String>,
}

/// Stored session row joined with its game name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRecord {
    pub id: i32,
    /// Stored for auditing; never sent back to clients.
    #[serde(skip_serializing)]
    pub access_token: String,
    pub google_id: String,
    #[serde(rename = "jogo_id")]
    pub game_id: i32,
    #[serde(rename = "frequencia_cardiaca")]
    pub heart_rate: Option<f64>,
    #[serde(rename = "pressao_sistolica")]
    pub systolic: Option<f64>,
    #[serde(rename = "pressao_diastolica")]
    pub diastolic: Option<f64>,
    #[serde(rename = "data")]
    pub recorded_at: DateTime<Utc>,
    #[serde(rename = "nome_jogo")]
    pub game_name: String,
}

/// Body of `POST /save-game`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSession {
    pub token: String,
    #[serde(rename = "jogoSelecionado", deserialize_with = "game_id")]
    pub game_id: i32,
    #[serde(rename = "frequencia_cardiaca", default, deserialize_with = "metric")]
    pub heart_rate: Option<f64>,
    #[serde(rename = "pressao_sistolica", default, deserialize_with = "metric")]
    pub systolic: Option<f64>,
    #[serde(rename = "pressao_diastolica", default, deserialize_with = "metric")]
    pub diastolic: Option<f64>,
}

/// Accept a metric as a number, a numeric string, `null`, or the string `"null"`.
///
/// The client echoes values straight from the callback redirect, where a
/// missing average is spelled `null`.
fn metric<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(v)) => Ok(Some(v)),
        Some(Raw::Text(s)) => {
            let s = s.trim();
            if s.is_empty() || s == "null" {
                Ok(None)
            } else {
                s.parse()
                    .map(Some)
                    .map_err(|_| de::Error::custom(format!("invalid metric value: {s:?}")))
            }
        }
    }
}

/// Accept a game id as a number or a numeric string.
fn game_id<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(v) => i32::try_from(v)
            .map_err(|_| de::Error::custom(format!("game id out of range: {v}"))),
        Raw::Text(s) => parse_game_id(&s).map_err(de::Error::custom),
    }
}

/// Optional game filter from a query string; an empty value means no filter.
pub fn optional_game_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.trim().is_empty() => parse_game_id(&s).map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

fn parse_game_id(s: &str) -> Result<i32, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("invalid game id: {s:?}"))
}
