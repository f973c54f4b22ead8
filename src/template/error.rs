//! Template error types.

use thiserror::Error;

/// Errors raised while resolving, compiling, or rendering templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template not found: {path}")]
    NotFound { path: String },

    #[error("template syntax error: {detail}")]
    Syntax { detail: String },

    /// Raised under [`MissingVariablePolicy::Fail`](crate::template::MissingVariablePolicy)
    /// when rendering touches a variable that was never supplied. Lists every
    /// unresolved name, in the order the template references them.
    #[error("template references undefined variables: {}", .names.join(", "))]
    UnresolvedVariables { names: Vec<String> },

    #[error("failed to read template {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl TemplateError {
    pub fn not_found(path: impl Into<String>) -> Self {
        TemplateError::NotFound { path: path.into() }
    }

    pub fn syntax(detail: impl Into<String>) -> Self {
        TemplateError::Syntax {
            detail: detail.into(),
        }
    }
}
