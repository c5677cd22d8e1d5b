use anyhow::Context;
use reqwest::Body;
use tracing::debug;

use crate::models::Models;

use super::{TextGeneration, TextGenerationRequest, TextGenerationResponse};

impl TextGeneration for Models {
    async fn generate(
        &self,
        model: &str,
        request: TextGenerationRequest,
    ) -> anyhow::Result<TextGenerationResponse> {
        let body =
            Body::try_from(request).context("failed to serialize request")?;

        debug!(task = "text generation", model = model);
        let text = self.string_response(body, model).await?;

        let response =
            serde_json::from_str(&text).context("failed to parse response")?;

        Ok(response)
    }
}
