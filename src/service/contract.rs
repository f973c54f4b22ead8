//! Declarative contract surface for prompt-backed services.
//!
//! A [`ServiceContract`] describes every callable method up front: where its
//! user message comes from, which call arguments bind which template
//! variables, and how the reply maps back to the caller. The binder turns
//! this declaration into immutable plans before the first call.

use serde::{Deserialize, Serialize};

use crate::template::TemplatePath;

/// Where a method's user message text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserMessage {
    /// Resolve a stored template through the template store.
    Template(TemplatePath),
    /// Template literal declared directly in the contract.
    Inline(String),
    /// The named argument's rendered value is itself the template source.
    FromArgument(usize),
}

impl UserMessage {
    pub fn template(path: impl Into<TemplatePath>) -> Self {
        Self::Template(path.into())
    }

    pub fn inline(source: impl Into<String>) -> Self {
        Self::Inline(source.into())
    }

    pub fn from_argument(index: usize) -> Self {
        Self::FromArgument(index)
    }
}

/// How the dispatcher maps a raw model reply to the caller's result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Pass the reply text through unchanged.
    #[default]
    Text,
    /// Append JSON output instructions and decode the reply.
    Json,
}

/// Role a declared parameter plays during message assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRole {
    /// Ordinary template variable.
    Variable,
    /// Tags the user message with the caller's identity; also binds as a
    /// variable under its declared name.
    UserName,
    /// Selects the conversational session; also binds as a variable.
    SessionId,
}

/// One declared method parameter: positional at call time, named in templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub role: ParamRole,
}

impl ParamSpec {
    pub fn variable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: ParamRole::Variable,
        }
    }

    pub fn user_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: ParamRole::UserName,
        }
    }

    pub fn session_id(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: ParamRole::SessionId,
        }
    }
}

/// Declaration of a single callable method.
#[derive(Debug, Clone)]
pub struct MethodSpec {
    pub name: String,
    pub user_message: Option<UserMessage>,
    pub params: Vec<ParamSpec>,
    pub response_format: ResponseFormat,
}

impl MethodSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            user_message: None,
            params: Vec::new(),
            response_format: ResponseFormat::default(),
        }
    }

    pub fn user_message(mut self, source: UserMessage) -> Self {
        self.user_message = Some(source);
        self
    }

    /// Shorthand for a store-resolved user template.
    pub fn user_template(self, path: impl Into<TemplatePath>) -> Self {
        self.user_message(UserMessage::template(path))
    }

    /// Shorthand for an inline user template literal.
    pub fn inline_template(self, source: impl Into<String>) -> Self {
        self.user_message(UserMessage::inline(source))
    }

    /// Shorthand for sourcing the user template from an argument.
    pub fn message_from_argument(self, index: usize) -> Self {
        self.user_message(UserMessage::from_argument(index))
    }

    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamSpec::variable(name));
        self
    }

    pub fn user_name_param(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamSpec::user_name(name));
        self
    }

    pub fn session_id_param(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamSpec::session_id(name));
        self
    }

    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }
}

/// A named collection of method declarations.
#[derive(Debug, Clone)]
pub struct ServiceContract {
    pub name: String,
    pub methods: Vec<MethodSpec>,
}

impl ServiceContract {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }
}
