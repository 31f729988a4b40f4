use thiserror::Error;

use crate::constants::notices::RATE_LIMIT_MARKERS;

#[derive(Error, Debug)]
pub enum ForgeError {
    /// The chat-completion call failed. `status` is `None` when the request
    /// never produced an HTTP response.
    #[error("API Request Failed: {} - {body}", .status.map_or_else(|| "transport".to_string(), |s| s.to_string()))]
    Request { status: Option<u16>, body: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No active conversation")]
    NoActiveConversation,

    #[error("A generation request is already in flight")]
    Busy,

    #[error("Unknown icon style: {0}")]
    UnknownStyle(String),

    #[error("{0}")]
    Other(String),
}

impl ForgeError {
    pub fn request(status: Option<u16>, body: impl Into<String>) -> Self {
        Self::Request {
            status,
            body: body.into(),
        }
    }

    /// HTTP status of a failed request, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether the error text carries one of the known rate-limit markers.
    pub fn is_rate_limited(&self) -> bool {
        let text = self.to_string();
        RATE_LIMIT_MARKERS.iter().any(|marker| text.contains(marker))
    }
}

impl From<reqwest::Error> for ForgeError {
    fn from(e: reqwest::Error) -> Self {
        Self::Request {
            status: e.status().map(|s| s.as_u16()),
            body: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ForgeError>;
