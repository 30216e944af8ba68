//! Application configuration loaded from environment variables.
//!
//! Configuration is read once at startup and handed to the services that
//! need it; nothing here is mutated afterwards.

use std::env;

const DEFAULT_SCOPES: &str = "openid email profile \
     https://www.googleapis.com/auth/fitness.heart_rate.read \
     https://www.googleapis.com/auth/fitness.blood_pressure.read";

/// Google endpoints used by the OAuth flow and the Fitness aggregation.
///
/// Overridable so tests can point the service at a mock server.
#[derive(Debug, Clone)]
pub struct GoogleEndpoints {
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    /// Base URL of the Fitness REST API (`.../fitness/v1`)
    pub fitness_url: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            userinfo_url: "https://www.googleapis.com/oauth2/v3/userinfo".to_string(),
            fitness_url: "https://www.googleapis.com/fitness/v1".to_string(),
        }
    }
}

impl GoogleEndpoints {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            auth_url: env::var("GOOGLE_AUTH_URL").unwrap_or(defaults.auth_url),
            token_url: env::var("GOOGLE_TOKEN_URL").unwrap_or(defaults.token_url),
            userinfo_url: env::var("GOOGLE_USERINFO_URL").unwrap_or(defaults.userinfo_url),
            fitness_url: env::var("GOOGLE_FITNESS_URL").unwrap_or(defaults.fitness_url),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Google OAuth client ---
    /// OAuth client ID
    pub google_client_id: String,
    /// OAuth client secret
    pub google_client_secret: String,
    /// Redirect URI registered with Google (points at our `/callback`)
    pub google_redirect_uri: String,
    /// Requested scopes, space-delimited
    pub google_scopes: String,
    pub google_endpoints: GoogleEndpoints,

    // --- Client application ---
    /// Frontend origin that receives the callback redirect
    pub frontend_url: String,

    // --- Storage ---
    /// Postgres connection string
    pub database_url: String,
    pub db_max_connections: u32,

    /// Server port
    pub port: u16,
    /// Length of the trailing window used for the vitals aggregate
    pub fitness_window_hours: i64,
}

impl Config {
    /// Deterministic configuration for tests.
    pub fn test_default() -> Self {
        Self {
            google_client_id: "test_client_id".to_string(),
            google_client_secret: "test_secret".to_string(),
            google_redirect_uri: "http://localhost:8000/callback".to_string(),
            google_scopes: DEFAULT_SCOPES.to_string(),
            google_endpoints: GoogleEndpoints::default(),
            frontend_url: "http://localhost:5173".to_string(),
            database_url: "postgres://localhost/pulse_games_test".to_string(),
            db_max_connections: 1,
            port: 8000,
            fitness_window_hours: 24,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            google_client_id: required("GOOGLE_CLIENT_ID")?,
            google_client_secret: required("GOOGLE_CLIENT_SECRET")?,
            google_redirect_uri: required("GOOGLE_REDIRECT_URI")?,
            google_scopes: env::var("GOOGLE_SCOPE")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| DEFAULT_SCOPES.to_string()),
            google_endpoints: GoogleEndpoints::from_env(),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            database_url: database_url_from_env()?,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 5)?,
            port: port_from_env()?,
            fitness_window_hours: window_hours_from_env()?,
        })
    }

    /// Scopes as a list, in the order configured.
    pub fn scope_list(&self) -> Vec<&str> {
        self.google_scopes.split_whitespace().collect()
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .map_err(|_| ConfigError::Missing(name))
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(name, v)),
        Err(_) => Ok(default),
    }
}

/// `PORT`, falling back to `NODE_PORT`, then 8000.
fn port_from_env() -> Result<u16, ConfigError> {
    match env::var("PORT").or_else(|_| env::var("NODE_PORT")) {
        Ok(v) => v.trim().parse().map_err(|_| ConfigError::Invalid("PORT", v)),
        Err(_) => Ok(8000),
    }
}

/// Window length in hours; must be positive.
fn window_hours_from_env() -> Result<i64, ConfigError> {
    let hours: i64 = parse_or("FITNESS_WINDOW_HOURS", 24)?;
    if hours <= 0 {
        return Err(ConfigError::Invalid("FITNESS_WINDOW_HOURS", hours.to_string()));
    }
    Ok(hours)
}

/// `DATABASE_URL` wins; otherwise the URL is assembled from the `DB_*` parts.
fn database_url_from_env() -> Result<String, ConfigError> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return Ok(url);
    }

    let host = required("DB_HOST")?;
    let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
    let user = required("DB_USER")?;
    let password = env::var("DB_PASSWORD").unwrap_or_default();
    let name = required("DB_NAME")?;

    Ok(format!(
        "postgres://{}:{}@{}:{}/{}",
        urlencoding::encode(&user),
        urlencoding::encode(&password),
        host,
        port,
        name
    ))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
