pub mod implementation;

use std::future::Future;

use reqwest::Body;
use serde::{Deserialize, Serialize};

pub static LLAMA_3_8B_INSTRUCT: &str = "@cf/meta/llama-3-8b-instruct";

pub trait TextGeneration {
    fn generate(
        &self,
        model: &str,
        request: TextGenerationRequest,
    ) -> impl Future<Output = anyhow::Result<TextGenerationResponse>> + Send;
}

/// Chat-style request; Workers AI text models take the whole conversation.
#[derive(Debug, Serialize)]
pub struct TextGenerationRequest {
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TextGenerationResponse {
    pub result: TextGenerationJsonResult,
}

#[derive(Debug, Deserialize)]
pub struct TextGenerationJsonResult {
    #[serde(default)]
    pub response: String,
}

impl TryFrom<TextGenerationRequest> for Body {
    type Error = serde_json::Error;

    fn try_from(val: TextGenerationRequest) -> Result<Self, Self::Error> {
        let body = serde_json::to_string(&val)?;
        Ok(Body::from(body))
    }
}
