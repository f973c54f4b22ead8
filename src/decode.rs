//! Mapping raw model replies onto caller types.
//!
//! Models wrap JSON in prose and markdown fences more often than not, so the
//! decoder extracts the payload from the common shapes before deserializing:
//! raw JSON, ```json fences, bare fences, then the widest object or array
//! span in the text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised while mapping a model reply onto the caller's type.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed model output: {detail}")]
    MalformedOutput {
        detail: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

/// Instruction block the dispatcher appends to the user message when a method
/// declares the JSON response format.
pub const JSON_OUTPUT_INSTRUCTIONS: &str =
    "You must answer strictly with JSON. Do not include any explanation or markdown formatting.";

static EXTRACTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"```json\s*([\s\S]*?)\s*```",
        r"```\s*([\s\S]*?)\s*```",
        r"\{[\s\S]*\}",
        r"\[[\s\S]*\]",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("extraction patterns are valid"))
    .collect()
});

/// Pulls the first parseable JSON payload out of a model reply.
pub fn extract_json(text: &str) -> Option<serde_json::Value> {
    if let Ok(value) = serde_json::from_str(text.trim()) {
        return Some(value);
    }
    for pattern in EXTRACTION_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            let candidate = match captures.get(1) {
                Some(inner) => inner.as_str(),
                None => captures.get(0).map(|c| c.as_str()).unwrap_or(text),
            };
            if let Ok(value) = serde_json::from_str(candidate.trim()) {
                return Some(value);
            }
        }
    }
    None
}

/// Decodes a model reply into `T`, extracting fenced JSON first.
pub fn decode_json<T: DeserializeOwned>(text: &str) -> Result<T, DecodeError> {
    let payload = extract_json(text).ok_or_else(|| DecodeError::MalformedOutput {
        detail: "no JSON payload found in model output".to_string(),
        source: None,
    })?;
    serde_json::from_value(payload).map_err(|err| DecodeError::MalformedOutput {
        detail: "JSON payload does not match the target type".to_string(),
        source: Some(err),
    })
}

/// Schema-bearing output instructions for `T`, for embedding in templates
/// when the generic [`JSON_OUTPUT_INSTRUCTIONS`] block is not enough.
pub fn format_instructions<T: schemars::JsonSchema>() -> String {
    let schema = schemars::schema_for!(T);
    let rendered = serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string());
    format!("{JSON_OUTPUT_INSTRUCTIONS}\nThe JSON must conform to this schema:\n{rendered}")
}
