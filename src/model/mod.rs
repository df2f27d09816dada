pub mod error;
pub mod fallback;

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::persona::{normalize, prompt};
use crate::web::models::Message;

pub use error::{ErrorKind, ProviderError};
pub use fallback::ModelManager;

const TEMPERATURE: f32 = 0.35;
const TOP_P: f32 = 0.9;
const MAX_TOKENS: u32 = 260;
const PRESENCE_PENALTY: f32 = 0.1;
const FREQUENCY_PENALTY: f32 = 0.4;
const STOP: &str = "\n\n\n";

/// Upstream error bodies that are not JSON are cut to this many characters.
const ERROR_BODY_LIMIT: usize = 300;

/// One chat completion against one model.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn send(
        &self,
        model: &str,
        user_message: &str,
        history: &[Message],
    ) -> Result<String, ProviderError>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    presence_penalty: f32,
    frequency_penalty: f32,
    stop: [&'static str; 1],
}

/// Client for Groq's OpenAI-compatible chat completions API.
pub struct GroqClient {
    api_url: String,
    api_key: Option<String>,
    client: Client,
}

impl GroqClient {
    pub fn new(config: &Config) -> Result<Self> {
        info!("Using chat completions endpoint at: {}", config.api_url);

        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            client,
        })
    }
}

#[async_trait]
impl ChatProvider for GroqClient {
    async fn send(
        &self,
        model: &str,
        user_message: &str,
        history: &[Message],
    ) -> Result<String, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::MissingCredential);
        };

        let payload = CompletionRequest {
            model,
            messages: prompt::build_messages(user_message, history),
            temperature: TEMPERATURE,
            top_p: TOP_P,
            max_tokens: MAX_TOKENS,
            presence_penalty: PRESENCE_PENALTY,
            frequency_penalty: FREQUENCY_PENALTY,
            stop: [STOP],
        };

        info!(
            "Sending request to {} ({} messages)",
            model,
            payload.messages.len()
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let body = match serde_json::from_str::<Value>(&body) {
                Ok(parsed) => parsed.to_string(),
                Err(_) => body.chars().take(ERROR_BODY_LIMIT).collect(),
            };
            return Err(ProviderError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let response_json: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
        debug!("Response JSON: {}", response_json);

        // A success without the expected field counts as an empty reply.
        let content = response_json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .unwrap_or_default();

        info!("Response length: {} characters", content.chars().count());
        Ok(normalize(content))
    }
}
