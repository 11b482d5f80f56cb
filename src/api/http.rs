//! [`Transport`] over HTTP with `reqwest`.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use scholaris_config::ApiConfig;
use scholaris_core::{ClientError, ClientResult};
use tracing::{debug, error, warn};

use super::transport::{ApiRequest, ApiResponse, RequestBody, Transport};

const UNREACHABLE_MESSAGE: &str = "Unable to reach the server. Check your connection and try again.";

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Fails when the TLS backend cannot be initialised.
    pub fn new(config: ApiConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let ApiRequest {
            method,
            path,
            query,
            body,
            bearer,
        } = request;

        let mut builder = self
            .client
            .request(method.clone(), self.config.url_for(&path))
            .query(&query);
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(file) => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)
                    .map_err(|e| ClientError::validation(format!("Unsupported file type: {e}")))?;
                builder.multipart(Form::new().part(file.field, part))
            }
        };

        let start = Instant::now();
        let response = builder.send().await.map_err(|e| {
            error!(method = %method, path = %path, error = %e, "Request failed to complete");
            ClientError::network(UNREACHABLE_MESSAGE)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            error!(method = %method, path = %path, status, error = %e, "Failed to read response body");
            ClientError::network(UNREACHABLE_MESSAGE)
        })?;
        let latency_ms = start.elapsed().as_millis();

        match status {
            400..=499 => warn!(method = %method, path = %path, status, latency_ms = %latency_ms, "Client error"),
            500..=599 => error!(method = %method, path = %path, status, latency_ms = %latency_ms, "Server error"),
            _ => debug!(method = %method, path = %path, status, latency_ms = %latency_ms, "Request completed"),
        }

        Ok(ApiResponse { status, body })
    }
}
