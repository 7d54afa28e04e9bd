//! HTTP transport layer for calling the UptimeRobot API

use crate::config::Config;
use crate::errors::{ApiError, Result};
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Decoded JSON object returned by an API call
pub type ApiResponse = serde_json::Map<String, Value>;

/// Performs a single API operation.
///
/// `body` is an already encoded form. Implementations add authentication and
/// decide where the request goes.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait ApiCaller: Send + Sync {
    async fn make_call(&self, method: &str, body: &str) -> Result<ApiResponse>;
}

/// reqwest-backed transport for the v2 API
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    api_url: String,
    api_key: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(api_url: String, api_key: String, http_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(http_timeout)
            .user_agent(format!("uptimerobot_api/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: http_timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate().map_err(ApiError::Config)?;
        Self::new(
            config.api_url.clone(),
            config.api_key.clone(),
            config.http_timeout,
        )
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn payload(&self, body: &str) -> String {
        let mut payload = format!("api_key={}&format=json", urlencoding::encode(&self.api_key));
        if !body.is_empty() {
            payload.push('&');
            payload.push_str(body);
        }
        payload
    }

    /// Handle the HTTP response from the API
    async fn handle_response(&self, response: Response, method: &str) -> Result<ApiResponse> {
        let status = response.status();
        debug!("{} answered with status {}", method, status);

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            let error_message = match status.as_u16() {
                400 => format!("Bad request for {}: {}", method, error_body),
                401 => format!("Unauthorized for {}: {}", method, error_body),
                403 => format!("Forbidden for {}: {}", method, error_body),
                404 => format!("Endpoint not found for {}: {}", method, error_body),
                429 => format!("Rate limited for {}: {}", method, error_body),
                500..=599 => format!("API server error for {}: {}", method, error_body),
                _ => format!("Unexpected response {} for {}: {}", status, method, error_body),
            };

            return Err(ApiError::Transport(error_message));
        }

        let text = response.text().await.map_err(ApiError::Http)?;
        let body = match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => map,
            other => return Err(ApiError::malformed("expected a JSON object", &other)),
        };

        if body.get("stat").and_then(Value::as_str) != Some("ok") {
            return Err(ApiError::Api(Value::Object(body).to_string()));
        }

        Ok(body)
    }
}

#[async_trait]
impl ApiCaller for HttpTransport {
    async fn make_call(&self, method: &str, body: &str) -> Result<ApiResponse> {
        let url = format!("{}/{}", self.api_url, method);
        debug!("Calling {}", url);

        let response = timeout(
            self.timeout,
            self.client
                .post(&url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(CACHE_CONTROL, "no-cache")
                .body(self.payload(body))
                .send(),
        )
        .await
        .map_err(|_| ApiError::Transport(format!("Request timeout for {}", method)))?
        .map_err(ApiError::Http)?;

        self.handle_response(response, method).await
    }
}
