// SPDX-License-Identifier: MIT
// Copyright 2026 The pulse-games Authors

//! Google OAuth and Fitness API client.
//!
//! Handles:
//! - Authorization-code exchange
//! - Bucketed heart-rate and blood-pressure aggregates
//! - Identity lookup via the userinfo endpoint

use crate::config::{Config, GoogleEndpoints};
use crate::error::AppError;
use crate::models::vitals::{BLOOD_PRESSURE_DATA_TYPE, HEART_RATE_DATA_TYPE};
use crate::models::{
    AggregateResponse, FitnessWindow, IdentitySubject, TokenResponse, TokenSet, UserInfo,
    VitalsSummary,
};
use crate::services::vitals;
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::time::Duration as StdDuration;

const HTTP_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// Low-level Google API client.
#[derive(Clone)]
pub struct GoogleClient {
    http: reqwest::Client,
    endpoints: GoogleEndpoints,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl GoogleClient {
    /// Create a new Google client with OAuth credentials.
    pub fn new(
        endpoints: GoogleEndpoints,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            endpoints,
            client_id,
            client_secret,
            redirect_uri,
        })
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(&self.endpoints.token_url)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::GoogleApi(format!("Token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Google token exchange failed");
            return Err(AppError::GoogleApi(format!(
                "Token exchange failed with status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::GoogleApi(format!("Failed to parse token response: {}", e)))
    }

    /// Request a bucketed heart-rate and blood-pressure aggregate.
    ///
    /// The whole window is a single bucket.
    pub async fn aggregate_dataset(
        &self,
        access_token: &str,
        window: FitnessWindow,
    ) -> Result<AggregateResponse, AppError> {
        let url = format!("{}/users/me/dataset:aggregate", self.endpoints.fitness_url);

        let body = serde_json::json!({
            "aggregateBy": [
                { "dataTypeName": HEART_RATE_DATA_TYPE },
                { "dataTypeName": BLOOD_PRESSURE_DATA_TYPE }
            ],
            "bucketByTime": { "durationMillis": window.duration_millis() },
            "startTimeMillis": window.start_millis(),
            "endTimeMillis": window.end_millis()
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::GoogleApi(format!("Fitness aggregate request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Fetch the profile of the token's owner.
    pub async fn userinfo(&self, access_token: &str) -> Result<UserInfo, AppError> {
        let response = self
            .http
            .get(&self.endpoints.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::GoogleApi(format!("Userinfo request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::GoogleApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::GoogleApi(format!("JSON parse error: {}", e)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GoogleService - OAuth callback flow on top of the client
// ─────────────────────────────────────────────────────────────────────────────

/// High-level Google service used by the routes.
#[derive(Clone)]
pub struct GoogleService {
    client: GoogleClient,
    auth_url: String,
    client_id: String,
    redirect_uri: String,
    scopes: String,
    window_length: Duration,
}

impl GoogleService {
    /// Build the service from application config.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = GoogleClient::new(
            config.google_endpoints.clone(),
            config.google_client_id.clone(),
            config.google_client_secret.clone(),
            config.google_redirect_uri.clone(),
        )?;

        let window_length = Duration::try_hours(config.fitness_window_hours)
            .filter(|length| *length > Duration::zero())
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "invalid fitness window: {} hours",
                    config.fitness_window_hours
                ))
            })?;

        Ok(Self {
            client,
            auth_url: config.google_endpoints.auth_url.clone(),
            client_id: config.google_client_id.clone(),
            redirect_uri: config.google_redirect_uri.clone(),
            scopes: config.scope_list().join(" "),
            window_length,
        })
    }

    /// Consent-screen URL that starts the authorization-code flow.
    ///
    /// Requests offline access so Google issues a refresh token.
    pub fn authorization_url(&self) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&access_type=offline&scope={}",
            self.auth_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&self.scopes),
        )
    }

    /// Exchange an authorization code for a `TokenSet`.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenSet, AppError> {
        let response = self.client.exchange_code(code).await?;
        Ok(response.into_token_set(Utc::now()))
    }

    /// Fetch and reduce vitals for `window`.
    pub async fn aggregate_vitals(
        &self,
        tokens: &TokenSet,
        window: FitnessWindow,
    ) -> Result<VitalsSummary, AppError> {
        let response = self
            .client
            .aggregate_dataset(&tokens.access_token, window)
            .await?;
        Ok(vitals::summarize(&response))
    }

    /// Resolve who owns `access_token`.
    ///
    /// Every failure collapses to `None`; the reason is only logged.
    pub async fn resolve_identity(&self, access_token: &str) -> Option<IdentitySubject> {
        match self.client.userinfo(access_token).await {
            Ok(info) => Some(IdentitySubject(info.sub)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to resolve Google identity");
                None
            }
        }
    }

    // ─── OAuth Callback Handling ─────────────────────────────────────────────

    /// Handle the OAuth callback: exchange the code, then aggregate vitals and
    /// resolve the identity concurrently.
    ///
    /// An aggregate failure fails the callback; an identity failure does not.
    pub async fn handle_oauth_callback(&self, code: &str) -> Result<CallbackOutcome, AppError> {
        let tokens = self.exchange_code(code).await?;

        let window = FitnessWindow::trailing(Utc::now(), self.window_length);
        let (vitals, identity) = tokio::join!(
            self.aggregate_vitals(&tokens, window),
            self.resolve_identity(&tokens.access_token),
        );
        let vitals = vitals?;

        tracing::info!(
            identified = identity.is_some(),
            has_heart_rate = vitals.heart_rate.is_some(),
            has_blood_pressure = vitals.systolic.is_some(),
            "OAuth callback handled"
        );

        Ok(CallbackOutcome {
            tokens,
            vitals,
            identity,
        })
    }
}

/// Everything the callback redirect carries.
#[derive(Debug, Clone)]
pub struct CallbackOutcome {
    pub tokens: TokenSet,
    pub vitals: VitalsSummary,
    pub identity: Option<IdentitySubject>,
}
