use anyhow::{ensure, Context};
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Body, Client,
};

pub mod text_generation;

pub static DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

#[derive(Debug, Clone)]
pub struct Models {
    base_url: String,
    client: Client,
}

impl Models {
    pub fn new(
        base_url: &str,
        account_id: &str,
        token: &str,
    ) -> anyhow::Result<Self> {
        let base_url = format!(
            "{}/accounts/{}/ai/run",
            base_url.trim_end_matches('/'),
            account_id
        );
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("*/*"));
        headers.insert(
            "Authorization",
            HeaderValue::from_str(format!("Bearer {}", token).as_str())
                .context("invalid cloudflare token")?,
        );

        // Generation runs as long as the model needs, so no timeout is set.
        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()
            .context("failed to build http client")?;

        Ok(Self { base_url, client })
    }

    async fn string_response<R: Into<Body>>(
        &self,
        request: R,
        model: &str,
    ) -> anyhow::Result<String> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, model))
            .header("Content-Type", "application/json")
            .body(request)
            .send()
            .await
            .context("failed to send request to workers ai")?;

        let status_code = response.status();
        let text = response.text().await;

        ensure!(
            status_code.is_success(),
            "status code: {}, response: {:?}",
            status_code,
            text
        );

        Ok(text?)
    }
}
