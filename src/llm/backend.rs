//! Backend-neutral chat types.
//!
//! Any backend that accepts role-tagged messages and yields ordered content
//! fragments can stand in for Ollama.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// One streaming chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Ordered sequence of content fragments from a streaming response.
#[async_trait]
pub trait ChatStream: Send {
    /// Next fragment, or `None` once the stream has completed.
    async fn next_fragment(&mut self) -> Result<Option<String>, BackendError>;
}

/// A chat backend that answers with a fragment stream.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat_stream(&self, request: ChatRequest) -> Result<Box<dyn ChatStream>, BackendError>;
}
