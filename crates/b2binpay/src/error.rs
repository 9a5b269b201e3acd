use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by B2BinPay gateway operations.
#[derive(Debug, Error)]
pub enum B2BinPayError {
    /// The transport failed before a response was read (DNS, TCP, TLS, timeout).
    #[error("connection error: {0}")]
    Connection(#[source] TransportError),

    /// The body was empty, not JSON, or decoded to a falsy value.
    #[error("empty response from {url}")]
    EmptyResponse { url: String },

    /// The gateway reported an expired bearer token. Refresh it and retry.
    #[error("access token expired, update required")]
    UpdateTokenRequired,

    #[error("server api error (code {code}, http {status}): {message}")]
    ServerApi {
        message: String,
        code: String,
        status: u16,
    },

    #[error("response from {url} has no `{field}` field")]
    MissingField { url: String, field: &'static str },

    #[error("invalid http method: {0}")]
    InvalidMethod(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("deserialization error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl B2BinPayError {
    /// HTTP status of a [`B2BinPayError::ServerApi`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerApi { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the caller should refresh its token and retry.
    pub fn is_token_expired(&self) -> bool {
        matches!(self, Self::UpdateTokenRequired)
    }
}
