//! Eager contract validation and plan construction.
//!
//! Binding happens once, before the first call. Every declaration problem a
//! static pass can catch is raised here: unloadable or unparsable templates,
//! duplicate variable bindings, conflicting parameter roles, and (under the
//! strict render policy) template variables no parameter provides. Calls made
//! through a bound contract can then only fail for per-call reasons.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info};

use crate::template::{
    is_valid_variable_name, CompiledTemplate, MissingVariablePolicy, TemplateStore,
};

use super::contract::{MethodSpec, ParamRole, ServiceContract, UserMessage};
use super::error::ServiceError;
use super::plan::{BindingPlan, BoundContract, UserTemplate};

/// Validates a [`ServiceContract`] and produces one [`BindingPlan`] per method.
#[derive(Default)]
pub struct ContractBinder {
    store: Option<Arc<TemplateStore>>,
    policy: MissingVariablePolicy,
}

impl ContractBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store used to resolve `UserMessage::Template` sources.
    pub fn with_store(mut self, store: Arc<TemplateStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Render policy the bound service will dispatch with. Under
    /// [`MissingVariablePolicy::Fail`] the binder additionally verifies that
    /// every variable a compiled template references has a declared binding.
    pub fn with_policy(mut self, policy: MissingVariablePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub async fn bind(&self, contract: &ServiceContract) -> Result<BoundContract, ServiceError> {
        let mut plans = HashMap::with_capacity(contract.methods.len());
        for method in &contract.methods {
            if plans.contains_key(&method.name) {
                return Err(ServiceError::invalid_contract(
                    &contract.name,
                    &method.name,
                    "duplicate method name",
                ));
            }
            let plan = self.bind_method(&contract.name, method).await?;
            debug!(
                service = %contract.name,
                method = %method.name,
                arity = plan.arity(),
                "method bound"
            );
            plans.insert(method.name.clone(), plan);
        }
        info!(
            service = %contract.name,
            methods = plans.len(),
            "service contract bound"
        );
        Ok(BoundContract {
            service: contract.name.clone(),
            plans,
        })
    }

    async fn bind_method(
        &self,
        service: &str,
        method: &MethodSpec,
    ) -> Result<BindingPlan, ServiceError> {
        let mut bindings = Vec::with_capacity(method.params.len());
        let mut seen: HashSet<&str> = HashSet::with_capacity(method.params.len());
        let mut user_name_index = None;
        let mut session_id_index = None;

        for (index, param) in method.params.iter().enumerate() {
            if !is_valid_variable_name(&param.name) {
                return Err(ServiceError::invalid_contract(
                    service,
                    &method.name,
                    format!("invalid parameter name `{}`", param.name),
                ));
            }
            if !seen.insert(param.name.as_str()) {
                return Err(ServiceError::DuplicateVariableBinding {
                    method: method.name.clone(),
                    variable: param.name.clone(),
                });
            }
            match param.role {
                ParamRole::Variable => {}
                ParamRole::UserName => {
                    if user_name_index.replace(index).is_some() {
                        return Err(ServiceError::invalid_contract(
                            service,
                            &method.name,
                            "more than one user-name parameter",
                        ));
                    }
                }
                ParamRole::SessionId => {
                    if session_id_index.replace(index).is_some() {
                        return Err(ServiceError::invalid_contract(
                            service,
                            &method.name,
                            "more than one session-id parameter",
                        ));
                    }
                }
            }
            bindings.push((index, param.name.clone()));
        }

        let source = method.user_message.as_ref().ok_or_else(|| {
            ServiceError::invalid_contract(service, &method.name, "no user message source declared")
        })?;

        let user_template = match source {
            UserMessage::Template(path) => {
                let store = self.store.as_ref().ok_or_else(|| {
                    ServiceError::invalid_contract(
                        service,
                        &method.name,
                        format!("user template `{path}` requires a template store"),
                    )
                })?;
                let compiled = store.get(path).await.map_err(|err| {
                    ServiceError::InvalidContract {
                        service: service.to_string(),
                        method: method.name.clone(),
                        detail: format!("user template `{path}` failed to load"),
                        source: Some(err),
                    }
                })?;
                UserTemplate::Compiled(compiled)
            }
            UserMessage::Inline(text) => {
                let compiled = CompiledTemplate::compile(text).map_err(|err| {
                    ServiceError::InvalidContract {
                        service: service.to_string(),
                        method: method.name.clone(),
                        detail: "inline user template failed to parse".to_string(),
                        source: Some(err),
                    }
                })?;
                UserTemplate::Compiled(Arc::new(compiled))
            }
            UserMessage::FromArgument(index) => {
                if *index >= method.params.len() {
                    return Err(ServiceError::invalid_contract(
                        service,
                        &method.name,
                        format!(
                            "user message argument index {index} is out of range for {} parameter(s)",
                            method.params.len()
                        ),
                    ));
                }
                UserTemplate::FromArgument(*index)
            }
        };

        // Argument-sourced templates are exempt: their variable set is
        // unknowable until call time.
        if self.policy == MissingVariablePolicy::Fail {
            if let UserTemplate::Compiled(compiled) = &user_template {
                let declared: HashSet<&str> =
                    bindings.iter().map(|(_, name)| name.as_str()).collect();
                for name in compiled.referenced_variables() {
                    if !declared.contains(name.as_str()) {
                        return Err(ServiceError::MissingVariable {
                            method: method.name.clone(),
                            variable: name,
                        });
                    }
                }
            }
        }

        Ok(BindingPlan {
            method: method.name.clone(),
            user_template,
            bindings,
            user_name_index,
            session_id_index,
            response_format: method.response_format,
        })
    }
}
