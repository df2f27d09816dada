//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use yaddoo_chat::config::Config;
use yaddoo_chat::model::{GroqClient, ModelManager};
use yaddoo_chat::AppState;

pub const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

/// Config pointing at `server_uri`, optionally with an API key.
pub fn test_config(server_uri: &str, api_key: Option<&str>, models: &str) -> Config {
    let mut vars = HashMap::new();
    vars.insert(
        "GROQ_API_URL".to_string(),
        format!("{}{}", server_uri, COMPLETIONS_PATH),
    );
    vars.insert("GROQ_MODELS".to_string(), models.to_string());
    if let Some(key) = api_key {
        vars.insert("GROQ_API_KEY".to_string(), key.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned())
}

/// App state backed by the real client, with no backoff between attempts.
pub fn test_state(config: Config) -> AppState {
    let client = GroqClient::new(&config).expect("client builds");
    let model = ModelManager::with_policy(
        Arc::new(client),
        config.models.clone(),
        config.retries,
        Duration::ZERO,
    );
    AppState { config, model }
}

pub fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
}
