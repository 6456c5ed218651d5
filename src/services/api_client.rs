use crate::errors::ModuleError;
use crate::services::logger::Logger;
use crate::services::settings::Settings;
use crate::services::token::TokenProvider;
use crate::utils::redact::redact_text;
use crate::constants::limits::LOG_BODY_LENGTH;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// One call against the versioned Assisted Installer collection.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(segments: &[&str]) -> Self {
        Self::new(Method::GET, segments)
    }

    pub fn post(segments: &[&str], body: Value) -> Self {
        let mut request = Self::new(Method::POST, segments);
        request.body = Some(body);
        request
    }

    pub fn delete(segments: &[&str]) -> Self {
        Self::new(Method::DELETE, segments)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub text: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decoded JSON body. An empty body or anything that is not JSON comes
    /// back as the raw text.
    pub fn payload(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or_else(|_| Value::String(self.text.clone()))
    }

    pub fn raw(&self) -> Value {
        Value::String(self.text.clone())
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    settings: Arc<Settings>,
    tokens: TokenProvider,
    logger: Logger,
}

impl ApiClient {
    pub fn new(settings: Arc<Settings>, logger: &Logger) -> Result<Self, ModuleError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|err| {
            ModuleError::internal(format!("Failed to build HTTP client: {}", err))
        })?;
        let logger = logger.child("api");
        Ok(Self {
            tokens: TokenProvider::new(http.clone(), &logger),
            http,
            settings,
            logger,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn build_url(&self, request: &ApiRequest) -> Result<Url, ModuleError> {
        let mut url = Url::parse(&self.settings.api_url).map_err(|_| {
            ModuleError::internal(format!("Invalid API base URL: {}", self.settings.api_url))
        })?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ModuleError::internal(format!(
                    "API base URL cannot carry a path: {}",
                    self.settings.api_url
                ))
            })?;
            path.pop_if_empty();
            path.extend(request.segments.iter());
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }

    /// Sends `request` once. Transport failures become module failures
    /// carrying `failure` as their message.
    pub async fn execute(
        &self,
        request: ApiRequest,
        failure: &str,
    ) -> Result<ApiResponse, ModuleError> {
        let url = self.build_url(&request)?;
        let token = self.tokens.resolve_token(&self.settings).await;
        if token.is_none() {
            self.logger.warn(
                "no API token resolved; sending request without Authorization",
                None,
            );
        }

        let mut builder = self
            .http
            .request(request.method.clone(), url.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token.as_deref() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body.as_ref() {
            builder = builder.json(body);
        }

        self.logger.debug(
            "request",
            Some(&serde_json::json!({
                "method": request.method.as_str(),
                "url": url.as_str(),
            })),
        );
        let started = Instant::now();
        let response = builder.send().await.map_err(|err| {
            self.logger.error(
                "request failed",
                Some(&serde_json::json!({ "url": url.as_str(), "error": err.to_string() })),
            );
            transport_error(failure, err)
        })?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|err| transport_error(failure, err))?;

        let meta = serde_json::json!({
            "method": request.method.as_str(),
            "path": url.path(),
            "status": status,
            "duration_ms": started.elapsed().as_millis() as u64,
        });
        let response = ApiResponse { status, text };
        if response.is_success() {
            self.logger.info("response", Some(&meta));
        } else {
            self.logger.warn(
                "non-success response",
                Some(&serde_json::json!({
                    "request": meta,
                    "body": redact_text(&response.text, LOG_BODY_LENGTH, None),
                })),
            );
        }
        Ok(response)
    }
}

fn transport_error(failure: &str, err: reqwest::Error) -> ModuleError {
    if err.is_timeout() {
        return ModuleError::transport(failure, "HTTP request timed out");
    }
    ModuleError::transport(failure, err.to_string())
}
