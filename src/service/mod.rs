//! 服务契约模块:声明式契约的校验、绑定与按调用分发。
//!
//! Service contracts: declarative contract validation, eager binding, and
//! per-call dispatch.
//!
//! ## Overview
//!
//! A service is declared once as a [`ServiceContract`] (or as a serde
//! [`ContractManifest`]), bound by the [`ContractBinder`] into immutable
//! [`BindingPlan`]s, and dispatched through a [`PromptService`]: resolve the
//! system message, render the user message from call arguments, assemble the
//! conversation, submit it to the [`ChatModel`](crate::model::ChatModel),
//! and map the reply. Everything a static pass can reject fails at bind
//! time, not on the first call.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ServiceContract`] | Declarative description of callable methods |
//! | [`ContractManifest`] | YAML/JSON spelling of a contract |
//! | [`ContractBinder`] | Eager validation into binding plans |
//! | [`BindingPlan`] | Immutable per-method dispatch record |
//! | [`PromptService`] | Per-call dispatcher |
//! | [`SystemMessageProvider`] | Pluggable system turn |
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use prompt_services::model::StaticChatModel;
//! use prompt_services::service::{MethodSpec, PromptService, ServiceContract};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> prompt_services::Result<()> {
//! let service = PromptService::builder()
//!     .contract(ServiceContract::new("greeter").method(
//!         MethodSpec::new("greet")
//!             .inline_template("Hello {{name}}!")
//!             .param("name"),
//!     ))
//!     .chat_model(Arc::new(StaticChatModel::new("Hi there!")))
//!     .build()
//!     .await?;
//!
//! let reply = service.call("greet", &[json!("Alice")]).await?;
//! assert_eq!(reply, "Hi there!");
//! # Ok(())
//! # }
//! ```

pub mod binder;
pub mod contract;
pub mod dispatcher;
pub mod error;
pub mod manifest;
pub mod plan;
pub mod system;

mod user;

// Re-export commonly used types
pub use binder::ContractBinder;
pub use contract::{
    MethodSpec, ParamRole, ParamSpec, ResponseFormat, ServiceContract, UserMessage,
};
pub use dispatcher::{PromptService, PromptServiceBuilder};
pub use error::ServiceError;
pub use manifest::{ContractManifest, MethodManifest, ParamManifest, ParamRoleManifest};
pub use plan::{BindingPlan, BoundContract, UserTemplate};
pub use system::{
    CallContext, StaticSystemMessageProvider, SystemMessageProvider,
    TemplateSystemMessageProvider,
};
