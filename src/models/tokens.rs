//! OAuth token and identity models.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::fmt;

/// Tokens obtained from one authorization-code exchange.
///
/// Held only for the duration of a callback; never persisted by the OAuth flow.
#[derive(Debug, Clone)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

/// Token endpoint response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl TokenResponse {
    /// Convert into a `TokenSet`, anchoring the expiry at `now`.
    pub fn into_token_set(self, now: DateTime<Utc>) -> TokenSet {
        // Google access tokens live an hour when no lifetime is reported.
        let lifetime = Duration::seconds(self.expires_in.unwrap_or(3600));
        TokenSet {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: now + lifetime,
        }
    }
}

/// Stable Google account identifier (the userinfo `sub` claim).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySubject(pub String);

impl IdentitySubject {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentitySubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Userinfo endpoint response body.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_expiry() {
        let body = r#"{"access_token":"ya29.a","expires_in":1800,"token_type":"Bearer"}"#;
        let response: TokenResponse = serde_json::from_str(body).unwrap();
        let now = Utc::now();
        let tokens = response.into_token_set(now);

        assert_eq!(tokens.access_token, "ya29.a");
        assert!(tokens.refresh_token.is_none());
        assert_eq!(tokens.expires_at, now + Duration::seconds(1800));
    }

    #[test]
    fn test_token_response_without_lifetime() {
        let body = r#"{"access_token":"ya29.b","refresh_token":"1//r"}"#;
        let response: TokenResponse = serde_json::from_str(body).unwrap();
        let now = Utc::now();
        let tokens = response.into_token_set(now);

        assert_eq!(tokens.refresh_token.as_deref(), Some("1//r"));
        assert_eq!(tokens.expires_at, now + Duration::hours(1));
    }
}
