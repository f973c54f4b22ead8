//! Minimal prelude for application code.
//!
//! Goal: reduce import noise without hiding important concepts.

pub use crate::message::{ChatMessage, ChatRole, Conversation, SessionId};
pub use crate::model::{ChatModel, ModelError, ModelReply, StaticChatModel};
pub use crate::service::{
    ContractManifest, MethodSpec, PromptService, PromptServiceBuilder, ResponseFormat,
    ServiceContract, StaticSystemMessageProvider, SystemMessageProvider,
    TemplateSystemMessageProvider,
};
pub use crate::template::{
    FsTemplateSource, InMemoryTemplateSource, MissingVariablePolicy, TemplatePath, TemplateStore,
    TemplateVariables,
};
