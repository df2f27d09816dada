use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODELS: &str = "mixtral-8x7b-32768,llama-3.1-8b-instant";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);
pub const RETRIES: u32 = 2;
pub const BACKOFF: Duration = Duration::from_secs(1);

/// Process-wide settings, read once at startup and never mutated.
#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub models: Vec<String>,
    pub api_url: String,
    pub timeout: Duration,
    pub retries: u32,
    pub backoff: Duration,
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Set-but-blank variables count as unset.
        let lookup = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = lookup("GROQ_API_KEY");

        let mut models = parse_models(&lookup("GROQ_MODELS").unwrap_or_default());
        if models.is_empty() {
            models = parse_models(DEFAULT_MODELS);
        }

        let port = lookup("PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        Self {
            api_key,
            models,
            api_url: lookup("GROQ_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout: REQUEST_TIMEOUT,
            retries: RETRIES,
            backoff: BACKOFF,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./static")),
        }
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }
}

// Keeps the key out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("models", &self.models)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .field("backoff", &self.backoff)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

/// Splits a comma-separated model list, dropping blank entries.
pub fn parse_models(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}
