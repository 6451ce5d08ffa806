use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the content-platform client.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transient permission denial (HTTP 403 or `login_required`).
    /// Recoverable with one re-authentication.
    #[error("forbidden by platform at {endpoint}")]
    Forbidden { endpoint: String },

    #[error("not found: {what}")]
    NotFound { what: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The platform answered `"status": "fail"` with a message.
    #[error("platform API error: {0}")]
    Api(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("session cache error at {}: {source}", path.display())]
    SessionCache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProviderError {
    /// `true` for the one condition that warrants a relogin-and-retry.
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, ProviderError::Forbidden { .. })
    }
}
