use crate::error::ForgeError;
use serde::{Deserialize, Serialize};

/// Role names on the chat-completion wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// The LLM client trait. One call sends the whole context and returns the
/// assistant text.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Send `system` followed by `messages` and return the generated text.
    async fn chat(&self, system: &str, messages: &[Message]) -> Result<String, ForgeError>;

    /// Model identifier, for status output.
    fn model(&self) -> &str;
}
