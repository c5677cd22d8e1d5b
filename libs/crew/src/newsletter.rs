use anyhow::{bail, Context};
use cloudflare::models::text_generation::{
    Message, Role, TextGeneration, TextGenerationRequest, LLAMA_3_8B_INSTRUCT,
};
use futures_util::future::BoxFuture;
use tracing::info;

use crate::{NewsletterInputs, Synthesizer};

static EDITOR_ROLE: &str = "You are the editor of an email newsletter. \
You research the requested topic, write concise and accurate sections about \
its latest developments, and lay them out in the HTML template you are given. \
Reply with the complete HTML document only.";

#[derive(Debug, Clone)]
pub struct NewsletterCrew<M> {
    model: M,
    model_name: String,
    max_tokens: Option<i32>,
}

impl<M: TextGeneration> NewsletterCrew<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            model_name: LLAMA_3_8B_INSTRUCT.to_string(),
            max_tokens: None,
        }
    }

    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: i32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub async fn kickoff(
        &self,
        inputs: NewsletterInputs,
    ) -> anyhow::Result<String> {
        info!(task = "crew kickoff", topic = inputs.topic.as_str());

        let request = TextGenerationRequest {
            messages: vec![
                Message::new(Role::System, EDITOR_ROLE),
                Message::new(Role::User, brief(&inputs)),
            ],
            max_tokens: self.max_tokens,
        };

        let response = self
            .model
            .generate(&self.model_name, request)
            .await
            .context("text generation failed")?;

        let Some(html) = extract_html(&response.result.response) else {
            bail!("the crew returned an empty newsletter");
        };

        info!(task = "crew finished", bytes = html.len());
        Ok(html)
    }
}

impl<M> Synthesizer for NewsletterCrew<M>
where
    M: TextGeneration + Send + Sync,
{
    fn synthesize(
        &self,
        inputs: NewsletterInputs,
    ) -> BoxFuture<'_, anyhow::Result<String>> {
        Box::pin(self.kickoff(inputs))
    }
}

fn brief(inputs: &NewsletterInputs) -> String {
    format!(
        "Topic: {}\n\n\
         Personal message to place at the top of the newsletter:\n{}\n\n\
         HTML template:\n{}",
        inputs.topic, inputs.personal_message, inputs.html_template
    )
}

/// Pulls the HTML document out of a model reply, dropping markdown fences
/// and any chatter around `<html>...</html>`.
pub fn extract_html(reply: &str) -> Option<String> {
    let mut text = reply.trim();

    if let Some(start) = text.find("```") {
        let fenced = &text[start + 3..];
        // skip the info string, e.g. ```html
        let body = fenced.split_once('\n').map_or(fenced, |(_, body)| body);
        text = body.rsplit_once("```").map_or(body, |(body, _)| body).trim();
    }

    let lower = text.to_ascii_lowercase();
    let start = lower.find("<!doctype").or_else(|| lower.find("<html"));
    if let Some(start) = start {
        let end = lower
            .rfind("</html>")
            .map(|end| end + "</html>".len())
            .filter(|end| *end > start)
            .unwrap_or(text.len());
        text = &text[start..end];
    }

    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
