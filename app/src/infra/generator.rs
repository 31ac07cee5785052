//! Configuration generator backed by the Hugging Face router's
//! chat-completions endpoint.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ports::ConfigGenerator;
use crate::domain::config::AppConfig;
use crate::domain::prompt::SYSTEM_INSTRUCTION;
use crate::domain::{GeneratedConfig, GenerationError, Prompt};
use crate::infra::http::{build_client, failure_detail, transport_detail};

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize, Default)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Default)]
struct ChatChoice {
    #[serde(default)]
    message: ChatReply,
}

#[derive(Deserialize, Default)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

// ── Generator ────────────────────────────────────────────────────────────────

/// Hugging Face chat-completions generator.
pub struct HfGenerator {
    client: Client,
    api_url: String,
    model: String,
    token: Option<String>,
}

impl HfGenerator {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> reqwest::Result<Self> {
        Ok(Self {
            client: build_client(config.timeouts.generation, HeaderMap::new())?,
            api_url: config.hf_api_url.clone(),
            model: config.hf_model.clone(),
            token: config.hf_token.clone(),
        })
    }
}

#[async_trait]
impl ConfigGenerator for HfGenerator {
    async fn generate(&self, prompt: &Prompt) -> Result<GeneratedConfig, GenerationError> {
        let Some(token) = self.token.as_deref() else {
            return Err(GenerationError::Backend("HF_TOKEN not configured".to_string()));
        };

        let user_message = prompt.user_message();
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: &user_message,
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Backend(transport_detail(&e)))?;

        if !response.status().is_success() {
            return Err(GenerationError::Backend(failure_detail(response).await));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Backend(format!("invalid response body: {e}")))?;

        let generated = GeneratedConfig::new(
            body.choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .map(|text| text.trim().to_string())
                .unwrap_or_default(),
        );
        if generated.is_empty() {
            return Err(GenerationError::EmptyOutput);
        }

        debug!(len = generated.len(), "configuration generated");
        Ok(generated)
    }
}
