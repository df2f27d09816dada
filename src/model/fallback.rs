//! Walks the configured models in order, retrying each with linear backoff.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

use super::{ChatProvider, ProviderError};
use crate::config::Config;
use crate::web::models::Message;

pub const SERVICE_TROUBLE_REPLY: &str = "صار شي بالخدمة يا وليدي. تأكد من المفتاح والإنترنت.";

pub struct ModelManager {
    provider: Arc<dyn ChatProvider>,
    models: Vec<String>,
    retries: u32,
    backoff: Duration,
}

impl ModelManager {
    pub fn new(provider: Arc<dyn ChatProvider>, config: &Config) -> Self {
        Self {
            provider,
            models: config.models.clone(),
            retries: config.retries,
            backoff: config.backoff,
        }
    }

    pub fn with_policy(
        provider: Arc<dyn ChatProvider>,
        models: Vec<String>,
        retries: u32,
        backoff: Duration,
    ) -> Self {
        Self {
            provider,
            models,
            retries,
            backoff,
        }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Returns the first successful reply, or the last failure rendered
    /// as reply text. Never fails.
    pub async fn resolve(&self, user_message: &str, history: &[Message]) -> String {
        let mut last_error: Option<ProviderError> = None;
        let attempts = self.retries + 1;

        for (model_index, model) in self.models.iter().enumerate() {
            let last_model = model_index + 1 == self.models.len();

            for attempt in 0..attempts {
                match self.provider.send(model, user_message, history).await {
                    Ok(reply) => {
                        info!("Model {} answered on attempt {}", model, attempt + 1);
                        return reply;
                    }
                    Err(e) => {
                        warn!(
                            "Model {} attempt {}/{} failed ({}): {}",
                            model,
                            attempt + 1,
                            attempts,
                            e.kind().as_str(),
                            e
                        );
                        last_error = Some(e);
                    }
                }

                if last_model && attempt + 1 == attempts {
                    break;
                }
                tokio::time::sleep(self.backoff * (attempt + 1)).await;
            }
        }

        match last_error {
            Some(e) => e.to_string(),
            None => SERVICE_TROUBLE_REPLY.to_string(),
        }
    }
}
