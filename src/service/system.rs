//! System message resolution.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::message::{ChatMessage, SessionId};
use crate::template::{MissingVariablePolicy, TemplatePath, TemplateStore, TemplateVariables};
use crate::Result;

/// Per-call context handed to system message providers.
#[derive(Debug, Clone)]
pub struct CallContext {
    pub session_id: SessionId,
    pub invocation_id: Uuid,
}

impl CallContext {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            invocation_id: Uuid::new_v4(),
        }
    }
}

/// Supplies the optional system message for a call.
///
/// Returning `Ok(None)` means the service sends no system message.
#[async_trait]
pub trait SystemMessageProvider: Send + Sync {
    async fn provide(&self, ctx: &CallContext) -> Result<Option<ChatMessage>>;
}

/// Renders a fixed stored template on every call.
///
/// The template path is set at construction and resolved through the store
/// per call; a missing template fails the call with `TemplateError::NotFound`.
/// The render sees `{{session_id}}` plus any fixed variables configured with
/// [`with_variable`](Self::with_variable), so a variable-free template yields
/// the same text on every call.
pub struct TemplateSystemMessageProvider {
    template: TemplatePath,
    store: Arc<TemplateStore>,
    variables: TemplateVariables,
    policy: MissingVariablePolicy,
}

impl TemplateSystemMessageProvider {
    pub fn new(template: impl Into<TemplatePath>, store: Arc<TemplateStore>) -> Self {
        Self {
            template: template.into(),
            store,
            variables: TemplateVariables::new(),
            policy: MissingVariablePolicy::default(),
        }
    }

    /// Fixed variable available to every render.
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name, value);
        self
    }

    pub fn with_policy(mut self, policy: MissingVariablePolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[async_trait]
impl SystemMessageProvider for TemplateSystemMessageProvider {
    async fn provide(&self, ctx: &CallContext) -> Result<Option<ChatMessage>> {
        let compiled = self.store.get(&self.template).await?;
        let mut variables = self.variables.clone();
        variables.insert("session_id", Value::String(ctx.session_id.to_string()));
        let text = compiled.render(&variables, self.policy)?;
        Ok(Some(ChatMessage::system(text)))
    }
}

/// Returns the same system text on every call.
pub struct StaticSystemMessageProvider {
    text: String,
}

impl StaticSystemMessageProvider {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl SystemMessageProvider for StaticSystemMessageProvider {
    async fn provide(&self, _ctx: &CallContext) -> Result<Option<ChatMessage>> {
        Ok(Some(ChatMessage::system(self.text.clone())))
    }
}
