//! Chat message and conversation types shared across the crate.

use serde::{Deserialize, Serialize};

/// Role a message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

/// A single rendered message ready for model submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    /// Optional speaker tag for user messages in multi-party prompts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            text: text.into(),
            user_name: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            user_name: None,
        }
    }

    pub fn user_named(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            user_name: Some(name.into()),
        }
    }
}

/// Ordered message sequence submitted to a model in a single call.
///
/// Construction is the only way to populate a conversation, which keeps the
/// ordering invariant: the system message, when present, always precedes the
/// user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(system: Option<ChatMessage>, user: ChatMessage) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(system);
        }
        messages.push(user);
        Self { messages }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn system_message(&self) -> Option<&ChatMessage> {
        self.messages
            .iter()
            .find(|m| m.role == ChatRole::System)
    }

    pub fn user_message(&self) -> &ChatMessage {
        // new() always pushes the user message last
        self.messages
            .last()
            .expect("conversation always holds a user message")
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Identifier that scopes a call to one conversational session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self("default".to_string())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_precedes_user() {
        let conversation = Conversation::new(
            Some(ChatMessage::system("be brief")),
            ChatMessage::user("hello"),
        );
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.messages()[0].role, ChatRole::System);
        assert_eq!(conversation.messages()[1].role, ChatRole::User);
    }

    #[test]
    fn test_user_only_conversation() {
        let conversation = Conversation::new(None, ChatMessage::user("hello"));
        assert_eq!(conversation.len(), 1);
        assert!(conversation.system_message().is_none());
        assert_eq!(conversation.user_message().text, "hello");
    }

    #[test]
    fn test_user_named_message() {
        let message = ChatMessage::user_named("klaus", "hi");
        assert_eq!(message.role, ChatRole::User);
        assert_eq!(message.user_name.as_deref(), Some("klaus"));
    }

    #[test]
    fn test_session_id_default() {
        assert_eq!(SessionId::default().as_str(), "default");
        assert_eq!(SessionId::new("abc").to_string(), "abc");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&ChatRole::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), "\"user\"");
    }
}
