//! Chat model abstraction the dispatcher calls into.
//!
//! The crate assembles conversations; it never talks to a backend itself.
//! Applications implement [`ChatModel`] over whatever transport they use and
//! hand it to the dispatcher. [`StaticChatModel`], [`FnChatModel`], and
//! [`RecordingChatModel`] cover configuration defaults and tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use thiserror::Error;

use crate::message::Conversation;

/// Errors surfaced by a model backend.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The backend reported a failure while producing a reply.
    #[error("model backend error: {message}")]
    Backend { message: String },

    /// The invocation was cancelled before a reply was produced.
    #[error("model invocation cancelled")]
    Cancelled,
}

impl ModelError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Raw text reply returned by a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelReply {
    pub text: String,
}

impl ModelReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<String> for ModelReply {
    fn from(text: String) -> Self {
        Self { text }
    }
}

impl From<&str> for ModelReply {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Backend seam: turns an assembled conversation into a reply.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn chat(&self, conversation: &Conversation) -> Result<ModelReply, ModelError>;
}

/// Model that answers every conversation with the same text.
pub struct StaticChatModel {
    reply: String,
}

impl StaticChatModel {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl ChatModel for StaticChatModel {
    async fn chat(&self, _conversation: &Conversation) -> Result<ModelReply, ModelError> {
        Ok(ModelReply::new(self.reply.clone()))
    }
}

/// Model backed by a synchronous closure, handy for tests and demos.
pub struct FnChatModel<F> {
    handler: F,
}

impl<F> FnChatModel<F>
where
    F: Fn(&Conversation) -> Result<ModelReply, ModelError> + Send + Sync,
{
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl<F> ChatModel for FnChatModel<F>
where
    F: Fn(&Conversation) -> Result<ModelReply, ModelError> + Send + Sync,
{
    async fn chat(&self, conversation: &Conversation) -> Result<ModelReply, ModelError> {
        (self.handler)(conversation)
    }
}

/// In-memory model for testing.
///
/// Records every conversation it receives and answers with a fixed reply,
/// so tests can assert on exactly what the dispatcher assembled.
pub struct RecordingChatModel {
    conversations: Arc<RwLock<Vec<Conversation>>>,
    reply: String,
}

impl RecordingChatModel {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            conversations: Arc::new(RwLock::new(Vec::new())),
            reply: reply.into(),
        }
    }

    pub fn conversations(&self) -> Vec<Conversation> {
        self.conversations.read().unwrap().clone()
    }

    pub fn last_conversation(&self) -> Option<Conversation> {
        self.conversations.read().unwrap().last().cloned()
    }

    pub fn clear(&self) {
        self.conversations.write().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.conversations.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ChatModel for RecordingChatModel {
    async fn chat(&self, conversation: &Conversation) -> Result<ModelReply, ModelError> {
        self.conversations.write().unwrap().push(conversation.clone());
        Ok(ModelReply::new(self.reply.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ChatMessage;

    #[tokio::test]
    async fn test_static_model_always_answers() {
        let model = StaticChatModel::new("ok");
        let conversation = Conversation::new(None, ChatMessage::user("hi"));
        let reply = model.chat(&conversation).await.unwrap();
        assert_eq!(reply.text, "ok");
    }

    #[tokio::test]
    async fn test_fn_model_sees_conversation() {
        let model = FnChatModel::new(|conversation: &Conversation| {
            Ok(ModelReply::new(format!(
                "echo: {}",
                conversation.user_message().text
            )))
        });
        let conversation = Conversation::new(None, ChatMessage::user("hi"));
        let reply = model.chat(&conversation).await.unwrap();
        assert_eq!(reply.text, "echo: hi");
    }

    #[tokio::test]
    async fn test_recording_model_keeps_order() {
        let model = RecordingChatModel::new("ok");
        for text in ["first", "second", "third"] {
            let conversation = Conversation::new(None, ChatMessage::user(text));
            model.chat(&conversation).await.unwrap();
        }
        let seen = model.conversations();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].user_message().text, "first");
        assert_eq!(seen[2].user_message().text, "third");
        assert_eq!(
            model.last_conversation().unwrap().user_message().text,
            "third"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ModelError::backend("rate limited").to_string(),
            "model backend error: rate limited"
        );
        assert_eq!(
            ModelError::Cancelled.to_string(),
            "model invocation cancelled"
        );
    }
}
