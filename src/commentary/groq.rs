use super::types::{ChatMessage, ChatRequest, ChatResponse};
use super::CompletionApi;
use crate::config::CommentaryConfig;
use crate::error::CommentaryError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Groq's OpenAI-compatible chat-completions endpoint.
pub struct GroqClient {
    client: Client,
    api_key: Option<String>,
    api_url: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl GroqClient {
    pub fn new(config: &CommentaryConfig, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            api_key,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionApi for GroqClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CommentaryError> {
        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        // A missing key still sends the request; the API answers 401.
        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(self.api_key.as_deref().unwrap_or_default())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body.chars().take(200).collect::<String>(), "completion API rejected request");
            return Err(CommentaryError::Status(status));
        }

        let text = resp.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| CommentaryError::Malformed(e.to_string()))?;
        parsed
            .into_first_content()
            .ok_or_else(|| CommentaryError::Malformed("no choices[0].message.content".to_string()))
    }
}
