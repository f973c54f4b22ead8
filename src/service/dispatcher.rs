//! Per-call dispatch through a bound contract.
//!
//! [`PromptService`] is the runtime surface: look up the method's plan,
//! resolve the system message, build the user message, assemble the
//! conversation, and submit it to the configured [`ChatModel`]. Binding
//! already happened in [`PromptServiceBuilder::build`], so a call can only
//! fail for per-call reasons. The service is callable from any task; plans
//! and templates are shared read-only.

use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::decode;
use crate::message::{Conversation, SessionId};
use crate::model::ChatModel;
use crate::template::{value_to_text, MissingVariablePolicy, TemplateStore};
use crate::{Error, Result};

use super::binder::ContractBinder;
use super::contract::{ResponseFormat, ServiceContract};
use super::error::ServiceError;
use super::plan::BoundContract;
use super::system::{CallContext, SystemMessageProvider};
use super::user::build_user_message;

/// A bound service contract wired to a model, ready to dispatch calls.
pub struct PromptService {
    bound: BoundContract,
    system_provider: Option<Arc<dyn SystemMessageProvider>>,
    model: Arc<dyn ChatModel>,
    policy: MissingVariablePolicy,
}

impl std::fmt::Debug for PromptService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptService")
            .field("service", &self.bound.service())
            .field("methods", &self.bound.len())
            .field("has_system_provider", &self.system_provider.is_some())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl PromptService {
    pub fn builder() -> PromptServiceBuilder {
        PromptServiceBuilder::new()
    }

    pub fn contract(&self) -> &BoundContract {
        &self.bound
    }

    /// Invokes `method` with positional arguments and returns the reply text.
    ///
    /// Resolution failures abort the call before the model is invoked.
    pub async fn call(&self, method: &str, args: &[Value]) -> Result<String> {
        let plan = self.bound.plan(method).ok_or_else(|| {
            Error::Service(ServiceError::UnknownMethod {
                method: method.to_string(),
            })
        })?;
        if args.len() != plan.arity() {
            return Err(ServiceError::ArgumentCount {
                method: plan.method().to_string(),
                expected: plan.arity(),
                got: args.len(),
            }
            .into());
        }

        let session_id = plan
            .session_id_index()
            .map(|index| SessionId::new(value_to_text(&args[index])))
            .unwrap_or_default();
        let ctx = CallContext::new(session_id);
        let start = Instant::now();
        debug!(
            service = %self.bound.service(),
            method,
            invocation_id = %ctx.invocation_id,
            session_id = %ctx.session_id,
            "dispatching service call"
        );

        let system = match &self.system_provider {
            Some(provider) => provider.provide(&ctx).await?,
            None => None,
        };
        debug!(
            invocation_id = %ctx.invocation_id,
            has_system = system.is_some(),
            "system message resolved"
        );

        let mut user = build_user_message(plan, args, self.policy)?;
        if plan.response_format() == ResponseFormat::Json {
            user.text.push('\n');
            user.text.push_str(decode::JSON_OUTPUT_INSTRUCTIONS);
        }
        debug!(invocation_id = %ctx.invocation_id, "user message resolved");

        let conversation = Conversation::new(system, user);
        let reply = self
            .model
            .chat(&conversation)
            .await
            .map_err(Error::Model)?;
        info!(
            service = %self.bound.service(),
            method,
            invocation_id = %ctx.invocation_id,
            duration_ms = start.elapsed().as_millis(),
            "service call completed"
        );
        Ok(reply.text)
    }

    /// Invokes `method` and decodes the reply into `T`.
    pub async fn call_as<T: DeserializeOwned>(&self, method: &str, args: &[Value]) -> Result<T> {
        let text = self.call(method, args).await?;
        decode::decode_json(&text).map_err(Error::Decode)
    }
}

/// Builder that binds a contract and wires the call-time collaborators.
#[derive(Default)]
pub struct PromptServiceBuilder {
    contract: Option<ServiceContract>,
    store: Option<Arc<TemplateStore>>,
    system_provider: Option<Arc<dyn SystemMessageProvider>>,
    model: Option<Arc<dyn ChatModel>>,
    policy: MissingVariablePolicy,
}

impl PromptServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contract(mut self, contract: ServiceContract) -> Self {
        self.contract = Some(contract);
        self
    }

    pub fn template_store(mut self, store: Arc<TemplateStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn system_message_provider(mut self, provider: Arc<dyn SystemMessageProvider>) -> Self {
        self.system_provider = Some(provider);
        self
    }

    pub fn chat_model(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn render_policy(mut self, policy: MissingVariablePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Binds the contract and builds the service. All declaration problems
    /// surface here, never at call time.
    pub async fn build(self) -> Result<PromptService> {
        let contract = self
            .contract
            .ok_or_else(|| ServiceError::configuration("no service contract declared"))?;
        let model = self
            .model
            .ok_or_else(|| ServiceError::configuration("no chat model configured"))?;

        let mut binder = ContractBinder::new().with_policy(self.policy);
        if let Some(store) = self.store {
            binder = binder.with_store(store);
        }
        let bound = binder.bind(&contract).await?;

        Ok(PromptService {
            bound,
            system_provider: self.system_provider,
            model,
            policy: self.policy,
        })
    }
}
