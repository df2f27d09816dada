//! Failures of a single provider attempt.

use thiserror::Error;

/// What went wrong, without the detail text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingCredential,
    Network,
    UpstreamStatus,
    MalformedResponse,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingCredential => "missing_credential",
            ErrorKind::Network => "network",
            ErrorKind::UpstreamStatus => "upstream_status",
            ErrorKind::MalformedResponse => "malformed_response",
        }
    }
}

/// The `Display` text is what the user finally sees when every
/// attempt fails, so it is written in the persona's language.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("مفقود GROQ_API_KEY في .env")]
    MissingCredential,

    #[error("شبكة/اتصال: {0}")]
    Network(String),

    #[error("خطأ Groq {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("رد Groq مب مفهوم: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::MissingCredential => ErrorKind::MissingCredential,
            ProviderError::Network(_) => ErrorKind::Network,
            ProviderError::UpstreamStatus { .. } => ErrorKind::UpstreamStatus,
            ProviderError::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Network(err.to_string())
    }
}
