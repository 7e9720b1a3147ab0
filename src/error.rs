//! Error types for the PIX gateway client

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, PixError>;

/// Message returned for every failure that is not a remote rejection
pub const CONNECTION_ERROR_MESSAGE: &str = "connection error with API";

/// Main error type for gateway operations
#[derive(Error, Debug)]
pub enum PixError {
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The gateway answered with a non-success HTTP status
    #[error("Remote rejection ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    RemoteRejection {
        status: u16,
        message: Option<String>,
        error: Option<String>,
    },

    /// A reply was received but reported failure or carried no payload
    #[error("Gateway reported failure: {message}")]
    Rejected {
        message: String,
        error: Option<String>,
    },

    /// Network-level failure that reqwest does not describe
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The caller cancelled the request before a reply arrived
    #[error("request cancelled")]
    Cancelled,

    /// Webhook body could not be decoded
    #[error("Invalid webhook payload: {message}")]
    InvalidWebhook { message: String },
}

impl PixError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create an invalid webhook error
    pub fn invalid_webhook(message: impl Into<String>) -> Self {
        Self::InvalidWebhook {
            message: message.into(),
        }
    }

    /// Whether the gateway itself rejected the request or reported failure
    pub fn is_remote_rejection(&self) -> bool {
        matches!(self, Self::RemoteRejection { .. } | Self::Rejected { .. })
    }

    /// Split the error into the `(message, error)` pair carried by a failed response.
    ///
    /// Remote rejections pass the gateway's own fields through, using `default_message`
    /// when the gateway sent none. Everything else is reported as a connection error
    /// with the error text in the `error` field.
    pub fn into_failure_parts(self, default_message: &str) -> (String, Option<String>) {
        match self {
            Self::RemoteRejection { message, error, .. } => (
                message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| default_message.to_string()),
                error,
            ),
            Self::Rejected { message, error } if !message.is_empty() => (message, error),
            Self::Rejected { error, .. } => (default_message.to_string(), error),
            other => (CONNECTION_ERROR_MESSAGE.to_string(), Some(other.to_string())),
        }
    }
}
