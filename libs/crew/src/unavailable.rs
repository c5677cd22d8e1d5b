use anyhow::anyhow;
use futures_util::future::BoxFuture;
use tracing::warn;

use crate::{NewsletterInputs, Synthesizer};

/// Fails every synthesis with `reason`, e.g. when the Workers AI
/// credentials are missing. Lets the service keep answering `/health`.
#[derive(Debug, Clone)]
pub struct Unavailable {
    reason: String,
}

impl Unavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Synthesizer for Unavailable {
    fn synthesize(
        &self,
        inputs: NewsletterInputs,
    ) -> BoxFuture<'_, anyhow::Result<String>> {
        warn!(
            task = "crew unavailable",
            topic = inputs.topic.as_str(),
            reason = self.reason.as_str()
        );
        Box::pin(async move { Err::<String, _>(anyhow!("{}", self.reason)) })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_synthesize_reports_reason() {
        // Arrange
        let crew = Unavailable::new("CLOUDFLARE_TOKEN was not found");
        let inputs = NewsletterInputs {
            topic: "Rust".to_string(),
            personal_message: "Hi".to_string(),
            html_template: "<html/>".to_string(),
        };

        // Act
        let result = crew.synthesize(inputs).await;

        // Assert
        assert_eq!(
            result.unwrap_err().to_string(),
            "CLOUDFLARE_TOKEN was not found"
        );
    }
}
