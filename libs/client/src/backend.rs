use std::{future::Future, time::Duration};

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub static DEFAULT_BACKEND_URL: &str =
    "https://newsletter-backend-162421115459.us-central1.run.app";

pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
/// Generation is slow; the service applies no timeout of its own.
pub const GENERATE_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Error: {message}")]
    Backend { status: StatusCode, message: String },

    #[error("Failed to connect to backend service: {source}")]
    Connection { source: reqwest::Error },
}

pub trait Backend {
    /// `true` only when the service answers its health check with 200.
    fn check_health(&self) -> impl Future<Output = bool> + Send;

    fn generate(
        &self,
        topic: &str,
        personal_message: &str,
    ) -> impl Future<Output = Result<String, ClientError>> + Send;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    topic: &'a str,
    personal_message: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    result: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

#[derive(Clone, Debug)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Backend for HttpBackend {
    async fn check_health(&self) -> bool {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await;

        match response {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                debug!(task = "health check", error = e.to_string());
                false
            }
        }
    }

    async fn generate(
        &self,
        topic: &str,
        personal_message: &str,
    ) -> Result<String, ClientError> {
        let response = self
            .client
            .post(format!("{}/generate", self.base_url))
            .json(&GenerateRequest {
                topic,
                personal_message,
            })
            .timeout(GENERATE_TIMEOUT)
            .send()
            .await
            .map_err(|source| ClientError::Connection { source })?;

        let status = response.status();
        if status == StatusCode::OK {
            let body = response
                .json::<GenerateResponse>()
                .await
                .map_err(|source| ClientError::Connection { source })?;

            return Ok(body.result.unwrap_or_default());
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| "Unknown error occurred".to_string());

        warn!(
            task = "generate",
            status = status.as_u16(),
            error = message.as_str()
        );
        Err(ClientError::Backend { status, message })
    }
}
