//! Error types for the tether-provider crate.

/// Errors that can occur while talking to the agent service.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error: HTTP {status}: {body}")]
    ApiError { status: u16, body: String },

    /// Stream transport error
    #[error("Stream error: {0}")]
    StreamError(String),

    /// A record from the service did not match the expected schema
    #[error("Decode error: {0}")]
    Decode(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client settings
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

impl ProviderError {
    /// HTTP status carried by the error, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::ApiError { status, .. } => Some(*status),
            ProviderError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<reqwest_eventsource::Error> for ProviderError {
    fn from(err: reqwest_eventsource::Error) -> Self {
        match err {
            reqwest_eventsource::Error::Transport(err) => ProviderError::Http(err),
            reqwest_eventsource::Error::InvalidStatusCode(status, _) => ProviderError::ApiError {
                status: status.as_u16(),
                body: status.canonical_reason().unwrap_or_default().to_string(),
            },
            other => ProviderError::StreamError(other.to_string()),
        }
    }
}
