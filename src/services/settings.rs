use crate::constants::{api, env, protocols::ALLOWED_HTTP, sso};
use crate::services::logger::LogLevel;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{name} is not a valid URL: {value}")]
    InvalidUrl { name: String, value: String },
    #[error("{name} must use http or https: {value}")]
    UnsupportedScheme { name: String, value: String },
    #[error("{name} must be a positive integer (milliseconds): {value}")]
    InvalidTimeout { name: String, value: String },
}

/// Everything a module invocation reads from its surroundings.
///
/// Built once by the binary from the process environment; tests construct
/// it directly so nothing depends on global state.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub sso_url: String,
    pub access_token: Option<String>,
    pub offline_token: Option<String>,
    pub pull_secret: Option<String>,
    pub timeout: Option<Duration>,
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: api::BASE_URL.to_string(),
            sso_url: sso::TOKEN_URL.to_string(),
            access_token: None,
            offline_token: None,
            pull_secret: None,
            timeout: None,
            log_level: LogLevel::Info,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut settings = Settings {
            access_token: read(env::API_TOKEN),
            offline_token: read(env::OFFLINE_TOKEN),
            pull_secret: read(env::PULL_SECRET),
            log_level: read(env::LOG_LEVEL)
                .map(|raw| LogLevel::parse(&raw))
                .unwrap_or(LogLevel::Info),
            ..Settings::default()
        };
        if let Some(url) = read(env::API_URL) {
            settings.api_url = validate_url(env::API_URL, &url)?;
        }
        if let Some(url) = read(env::SSO_URL) {
            settings.sso_url = validate_url(env::SSO_URL, &url)?;
        }
        if let Some(raw) = read(env::TIMEOUT_MS) {
            let ms = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| SettingsError::InvalidTimeout {
                    name: env::TIMEOUT_MS.to_string(),
                    value: raw.clone(),
                })?;
            settings.timeout = Some(Duration::from_millis(ms));
        }
        Ok(settings)
    }

    pub fn with_api_url(mut self, url: &str) -> Result<Self, SettingsError> {
        self.api_url = validate_url("api_url", url)?;
        Ok(self)
    }

    pub fn with_sso_url(mut self, url: &str) -> Result<Self, SettingsError> {
        self.sso_url = validate_url("sso_url", url)?;
        Ok(self)
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_offline_token(mut self, token: impl Into<String>) -> Self {
        self.offline_token = Some(token.into());
        self
    }

    pub fn with_pull_secret(mut self, secret: impl Into<String>) -> Self {
        self.pull_secret = Some(secret.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

fn validate_url(name: &str, raw: &str) -> Result<String, SettingsError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|_| SettingsError::InvalidUrl {
        name: name.to_string(),
        value: raw.to_string(),
    })?;
    let scheme = format!("{}:", parsed.scheme());
    if !ALLOWED_HTTP.contains(&scheme.as_str()) {
        return Err(SettingsError::UnsupportedScheme {
            name: name.to_string(),
            value: raw.to_string(),
        });
    }
    Ok(trimmed.to_string())
}
