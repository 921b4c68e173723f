use crate::config::Config;
use crate::error::{credential_error, google_calendar_error, BotResult};
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Manages the OAuth token backing calendar reads
///
/// The token lives in a JSON file on disk (generated by the one-time OAuth
/// flow) and is refreshed through Google's token endpoint when expired; the
/// refreshed token is written back to the same file.
#[derive(Clone)]
pub struct TokenManager {
    config: Arc<RwLock<Config>>,
    client: Client,
}

impl TokenManager {
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Get an OAuth token, refreshing it first if it has expired
    pub async fn get_token(&self) -> BotResult<Value> {
        let token_file = {
            let config_read = self.config.read().await;
            config_read.google_token_file.clone()
        };

        let raw = tokio::fs::read_to_string(&token_file).await.map_err(|_| {
            credential_error(&format!(
                "Calendar token file '{}' not found. Complete the OAuth flow to generate it.",
                token_file
            ))
        })?;

        let token: Value = serde_json::from_str(&raw)
            .map_err(|e| credential_error(&format!("Failed to parse token file: {}", e)))?;

        if let Some(expiry) = token.get("expires_at").and_then(|v| v.as_i64()) {
            if expiry > Utc::now().timestamp() {
                return Ok(token);
            }
            // Token is expired, refresh it
            return self.refresh_token(&token, &token_file).await;
        }

        // No expiry recorded; refresh if we can, otherwise use it as-is
        if token.get("refresh_token").is_some() {
            return self.refresh_token(&token, &token_file).await;
        }
        Ok(token)
    }

    /// Refresh an expired token and persist the result
    async fn refresh_token(&self, token: &Value, token_file: &str) -> BotResult<Value> {
        let refresh_token = token
            .get("refresh_token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| credential_error("No refresh token in token data"))?;

        let (client_id, client_secret) = {
            let config_read = self.config.read().await;
            (
                config_read.google_client_id.clone(),
                config_read.google_client_secret.clone(),
            )
        };

        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token.to_string()),
            ("grant_type", "refresh_token".to_string()),
        ];

        let response = self
            .client
            .post("https://oauth2.googleapis.com/token")
            .form(&params)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to refresh token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(credential_error(&format!(
                "Failed to refresh token: HTTP {} - {}",
                status, error_body
            )));
        }

        let new_token: Value = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse token response: {}", e)))?;

        let access_token = new_token
            .get("access_token")
            .cloned()
            .ok_or_else(|| credential_error("Token response missing 'access_token' field"))?;

        // Combine the new access token with the existing refresh token
        let mut token_data = serde_json::Map::new();
        token_data.insert("access_token".to_string(), access_token);
        token_data.insert("refresh_token".to_string(), json!(refresh_token));

        // Calculate expiry
        let expires_in = new_token
            .get("expires_in")
            .and_then(|v| v.as_i64())
            .unwrap_or(3600);
        let expires_at = Utc::now().timestamp() + expires_in;
        token_data.insert("expires_at".to_string(), json!(expires_at));

        let token_json = json!(token_data);
        tokio::fs::write(token_file, token_json.to_string()).await?;
        info!("Refreshed calendar token, expires at {}", expires_at);

        Ok(token_json)
    }
}
