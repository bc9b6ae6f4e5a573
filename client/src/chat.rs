//! Hansard chat conversation.

use ps_types::ChatMessage;

use crate::api::{ApiError, ParliaScopeApi, NETWORK_ERROR_MESSAGE};

/// Shown when the backend rejects a question without saying why.
const CHAT_FAILURE_FALLBACK: &str = "Failed to get answer";

/// An in-memory conversation with the Hansard assistant.
///
/// Every accepted question appends exactly two messages: the user's
/// question, then one assistant reply. Failures become assistant messages;
/// they never escape [`ChatSession::send`].
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Ask a question. Blank input is ignored and returns `None`; otherwise
    /// the assistant's reply is returned.
    pub async fn send<A>(&mut self, api: &A, query: &str) -> Option<&ChatMessage>
    where
        A: ParliaScopeApi + ?Sized,
    {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(query));

        let reply = match api.chat(query).await {
            Ok(answer) => ChatMessage::from(answer),
            Err(err) => {
                tracing::warn!(error = %err, "chat request failed");
                ChatMessage::assistant(failure_text(&err))
            }
        };

        self.messages.push(reply);
        self.messages.last()
    }
}

fn failure_text(err: &ApiError) -> String {
    match err {
        ApiError::Http { detail, .. } => format!(
            "Error: {}",
            detail.as_deref().unwrap_or(CHAT_FAILURE_FALLBACK)
        ),
        ApiError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockParliaScopeClient;
    use ps_types::ChatRole;
    use serde_json::json;

    #[tokio::test]
    async fn answer_is_appended_with_sources() {
        let api = MockParliaScopeClient::new();
        api.push_json(
            "chat",
            json!({
                "answer": "The Finance Committee tabled its report on the budget.",
                "sources": [{"id": 88, "speaker": "Hon. Kimani Ichung'wah", "preview": "Mr. Speaker, the report..."}]
            }),
        );
        let mut chat = ChatSession::new();

        let reply = chat.send(&api, "  What was discussed about the budget?  ").await.unwrap();
        assert_eq!(reply.role, ChatRole::Assistant);
        assert_eq!(reply.sources.as_ref().unwrap()[0].id, 88);

        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[0], ChatMessage::user("What was discussed about the budget?"));
        assert_eq!(api.calls()[0].args, json!({"query": "What was discussed about the budget?"}));
    }

    #[tokio::test]
    async fn network_failure_appends_one_fixed_message() {
        let api = MockParliaScopeClient::new();
        api.push_error("chat", ApiError::Network("connection reset".into()));
        let mut chat = ChatSession::new();

        let reply = chat.send(&api, "Who spoke on housing?").await.unwrap();
        assert_eq!(reply.content, NETWORK_ERROR_MESSAGE);

        let assistant: Vec<_> = chat
            .messages()
            .iter()
            .filter(|m| m.role == ChatRole::Assistant)
            .collect();
        assert_eq!(assistant.len(), 1);
        assert!(assistant[0].sources.is_none());
    }

    #[tokio::test]
    async fn http_failure_shows_detail() {
        let api = MockParliaScopeClient::new();
        api.push_error(
            "chat",
            ApiError::Http {
                status: 500,
                detail: Some("Ollama is not running".into()),
            },
        );
        api.push_error(
            "chat",
            ApiError::Http {
                status: 502,
                detail: None,
            },
        );
        let mut chat = ChatSession::new();

        let first = chat.send(&api, "q1").await.unwrap().content.clone();
        let second = chat.send(&api, "q2").await.unwrap().content.clone();

        assert_eq!(first, "Error: Ollama is not running");
        assert_eq!(second, "Error: Failed to get answer");
        assert_eq!(chat.messages().len(), 4);
    }

    #[tokio::test]
    async fn blank_question_is_ignored() {
        let api = MockParliaScopeClient::new();
        let mut chat = ChatSession::new();

        assert!(chat.send(&api, "   ").await.is_none());
        assert!(chat.messages().is_empty());
        assert!(api.calls().is_empty());
    }
}
