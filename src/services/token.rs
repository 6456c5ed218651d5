use crate::constants::sso;
use crate::services::logger::Logger;
use crate::services::settings::Settings;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to encode refresh request: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
    #[error("token endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("token endpoint rejected the refresh (status {status})")]
    Status { status: u16 },
    #[error("token endpoint returned non-JSON body (status {status})")]
    Decode { status: u16 },
    #[error("token endpoint response has no access_token (status {status})")]
    MissingAccessToken { status: u16 },
}

/// Resolves the bearer token for one invocation.
///
/// A configured access token wins outright. Otherwise an offline token is
/// exchanged once at the SSO endpoint. Nothing is cached between calls and
/// every refresh failure degrades to "no token".
#[derive(Clone)]
pub struct TokenProvider {
    http: Client,
    logger: Logger,
}

impl TokenProvider {
    pub fn new(http: Client, logger: &Logger) -> Self {
        Self {
            http,
            logger: logger.child("token"),
        }
    }

    pub async fn resolve_token(&self, settings: &Settings) -> Option<String> {
        if let Some(token) = settings.access_token.as_deref().filter(|t| !t.is_empty()) {
            self.logger.debug("using access token from settings", None);
            return Some(token.to_string());
        }
        let offline = settings.offline_token.as_deref().filter(|t| !t.is_empty())?;
        match self.refresh(&settings.sso_url, offline).await {
            Ok(token) => {
                self.logger.debug("exchanged offline token", None);
                Some(token)
            }
            Err(err) => {
                self.logger.warn(
                    "offline token exchange failed",
                    Some(&serde_json::json!({ "error": err.to_string() })),
                );
                None
            }
        }
    }

    async fn refresh(&self, token_url: &str, offline_token: &str) -> Result<String, TokenError> {
        let form = refresh_form(offline_token)?;
        let response = self
            .http
            .post(token_url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(ACCEPT, "application/json")
            .body(form)
            .send()
            .await?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(TokenError::Status { status });
        }
        let text = response.text().await?;
        let payload: Value =
            serde_json::from_str(&text).map_err(|_| TokenError::Decode { status })?;
        payload
            .get("access_token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(TokenError::MissingAccessToken { status })
    }
}

pub(crate) fn refresh_form(offline_token: &str) -> Result<String, TokenError> {
    Ok(serde_urlencoded::to_string([
        ("grant_type", sso::GRANT_TYPE),
        ("client_id", sso::CLIENT_ID),
        ("refresh_token", offline_token),
    ])?)
}
