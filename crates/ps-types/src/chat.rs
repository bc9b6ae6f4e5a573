//! Hansard chat messages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A transcript segment cited by an answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatSource {
    pub id: i64,
    pub speaker: String,
    pub preview: String,
}

/// One entry in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<ChatSource>>,
}

impl ChatMessage {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            sources: None,
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            sources: None,
        }
    }

    #[must_use]
    pub fn with_sources(mut self, sources: Vec<ChatSource>) -> Self {
        self.sources = Some(sources);
        self
    }
}

/// Body of `POST /chat/hansard`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub query: String,
}

/// Response of `POST /chat/hansard`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatAnswer {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<ChatSource>,
}

impl From<ChatAnswer> for ChatMessage {
    fn from(answer: ChatAnswer) -> Self {
        Self::assistant(answer.answer).with_sources(answer.sources)
    }
}
