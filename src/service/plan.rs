//! Immutable per-method dispatch plans produced by the binder.

use std::collections::HashMap;
use std::sync::Arc;

use crate::template::CompiledTemplate;

use super::contract::ResponseFormat;

/// User message template carried by a plan.
#[derive(Debug, Clone)]
pub enum UserTemplate {
    /// Compiled once at bind time (store-resolved or inline source).
    Compiled(Arc<CompiledTemplate>),
    /// Compiled per call from the text of this argument.
    FromArgument(usize),
}

/// Everything the dispatcher needs to serve one method.
///
/// Built once during binding, then shared read-only across calls; no field
/// changes after construction.
#[derive(Debug, Clone)]
pub struct BindingPlan {
    pub(crate) method: String,
    pub(crate) user_template: UserTemplate,
    /// Ordered (argument index, variable name) pairs, one per declared
    /// parameter.
    pub(crate) bindings: Vec<(usize, String)>,
    pub(crate) user_name_index: Option<usize>,
    pub(crate) session_id_index: Option<usize>,
    pub(crate) response_format: ResponseFormat,
}

impl BindingPlan {
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Number of arguments a call to this method must supply.
    pub fn arity(&self) -> usize {
        self.bindings.len()
    }

    pub fn bindings(&self) -> &[(usize, String)] {
        &self.bindings
    }

    pub fn user_name_index(&self) -> Option<usize> {
        self.user_name_index
    }

    pub fn session_id_index(&self) -> Option<usize> {
        self.session_id_index
    }

    pub fn response_format(&self) -> ResponseFormat {
        self.response_format
    }
}

/// Validated contract: one plan per declared method.
#[derive(Debug, Clone)]
pub struct BoundContract {
    pub(crate) service: String,
    pub(crate) plans: HashMap<String, BindingPlan>,
}

impl BoundContract {
    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn plan(&self, method: &str) -> Option<&BindingPlan> {
        self.plans.get(method)
    }

    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.plans.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}
