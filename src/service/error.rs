//! Service contract error types

use thiserror::Error;

use crate::template::TemplateError;

/// Errors raised while validating, binding, or dispatching a service contract.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The contract declaration itself is unusable.
    #[error("invalid contract: {service}.{method}: {detail}")]
    InvalidContract {
        service: String,
        method: String,
        detail: String,
        #[source]
        source: Option<TemplateError>,
    },

    /// Two parameters of one method bind the same template variable.
    #[error("method {method} binds variable `{variable}` more than once")]
    DuplicateVariableBinding { method: String, variable: String },

    /// A template references a variable no parameter provides.
    #[error("method {method} does not bind template variable `{variable}`")]
    MissingVariable { method: String, variable: String },

    /// A call named a method the bound contract does not carry.
    #[error("unknown service method: {method}")]
    UnknownMethod { method: String },

    /// A call supplied the wrong number of arguments.
    #[error("method {method} expects {expected} argument(s), got {got}")]
    ArgumentCount {
        method: String,
        expected: usize,
        got: usize,
    },

    /// A contract manifest could not be parsed or translated.
    #[error("contract manifest error: {detail}")]
    Manifest { detail: String },

    /// The dispatcher builder was missing a required piece.
    #[error("service configuration error: {detail}")]
    Configuration { detail: String },
}

impl ServiceError {
    pub fn invalid_contract(
        service: impl Into<String>,
        method: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::InvalidContract {
            service: service.into(),
            method: method.into(),
            detail: detail.into(),
            source: None,
        }
    }

    pub fn manifest(detail: impl Into<String>) -> Self {
        Self::Manifest {
            detail: detail.into(),
        }
    }

    pub fn configuration(detail: impl Into<String>) -> Self {
        Self::Configuration {
            detail: detail.into(),
        }
    }
}
