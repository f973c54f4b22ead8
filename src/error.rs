use thiserror::Error;

use crate::decode::DecodeError;
use crate::model::ModelError;
use crate::service::ServiceError;
use crate::template::TemplateError;

/// Unified error type for the prompt service runtime.
/// Aggregates the per-area errors so callers can match on the failing area
/// or bubble everything with `?`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Service contract error: {0}")]
    Service(#[from] ServiceError),

    #[error("Model invocation failed: {0}")]
    Model(#[from] ModelError),

    #[error("Output decoding error: {0}")]
    Decode(#[from] DecodeError),
}
