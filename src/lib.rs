//! # prompt-services
//!
//! 提示词服务运行时:把声明式服务契约变成对大模型后端的可调用方法。
//!
//! Prompt service runtime - turns declarative service contracts into working
//! calls against a language-model backend.
//!
//! ## Overview
//!
//! A service contract names its methods, the prompt template each method
//! renders, and how call arguments bind template variables. This library
//! validates the contract eagerly, compiles and caches the templates, and
//! dispatches each call: system message, then user message, assembled into a
//! conversation and submitted to an opaque [`ChatModel`] capability. The
//! model backend itself, and any network transport to reach one, live
//! outside the crate.
//!
//! ## Core Philosophy
//!
//! - **Explicit contracts**: methods, bindings, and formats are declared in
//!   plain data (builder or YAML manifest), never inferred from reflection
//! - **Fail at bind time**: unloadable templates, duplicate bindings, and
//!   role conflicts are rejected before the first call
//! - **Backend-agnostic**: the model is a trait; test doubles are bundled
//! - **Deterministic rendering**: a template and its variables always yield
//!   the same text, from any number of concurrent tasks
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use prompt_services::model::StaticChatModel;
//! use prompt_services::service::{MethodSpec, PromptService, ServiceContract};
//! use prompt_services::template::{InMemoryTemplateSource, TemplateStore};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> prompt_services::Result<()> {
//!     let store = Arc::new(TemplateStore::new(Box::new(
//!         InMemoryTemplateSource::new()
//!             .with_template("greet", "Hello {{user_name}}, you said: {{message}}"),
//!     )));
//!
//!     let service = PromptService::builder()
//!         .contract(ServiceContract::new("assistant").method(
//!             MethodSpec::new("greet")
//!                 .user_template("greet")
//!                 .user_name_param("user_name")
//!                 .param("message"),
//!         ))
//!         .template_store(store)
//!         .chat_model(Arc::new(StaticChatModel::new("Nice to meet you!")))
//!         .build()
//!         .await?;
//!
//!     let reply = service
//!         .call("greet", &[json!("My friend"), json!("How are you?")])
//!         .await?;
//!     assert_eq!(reply, "Nice to meet you!");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`template`] | Template resolution, compilation, caching, rendering |
//! | [`service`] | Contract declaration, binding, and per-call dispatch |
//! | [`message`] | Chat messages, conversations, session identity |
//! | [`model`] | The `ChatModel` backend seam and bundled test doubles |
//! | [`decode`] | Mapping raw model replies onto caller types |
//!
//! [`ChatModel`]: crate::model::ChatModel

pub mod decode;
pub mod message;
pub mod model;
pub mod prelude;
pub mod service;
pub mod template;

// Re-export main types for convenience
pub use message::{ChatMessage, ChatRole, Conversation, SessionId};
pub use model::{ChatModel, ModelError, ModelReply};
pub use service::{
    ContractBinder, ContractManifest, MethodSpec, PromptService, PromptServiceBuilder,
    ServiceContract,
};
pub use template::{
    CompiledTemplate, MissingVariablePolicy, TemplatePath, TemplateStore, TemplateVariables,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
