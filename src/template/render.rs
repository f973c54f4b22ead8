//! Template rendering: a pure tree-walk over compiled segments.

use std::collections::HashMap;

use serde_json::Value;

use crate::template::ast::Segment;
use crate::template::error::TemplateError;

/// Policy for placeholders and section conditions that reference a variable
/// absent from the supplied [`TemplateVariables`].
///
/// The default is [`Empty`](MissingVariablePolicy::Empty): absent placeholders
/// render as empty text and absent section conditions count as falsy. Services
/// that want contract mismatches surfaced instead opt into
/// [`Fail`](MissingVariablePolicy::Fail), which also moves the check to bind
/// time for store- and inline-declared templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingVariablePolicy {
    /// Substitute empty text for unresolved placeholders (default).
    #[default]
    Empty,
    /// Fail rendering with [`TemplateError::UnresolvedVariables`] listing every
    /// unresolved name.
    Fail,
}

/// Variable map handed to the renderer. Values are arbitrary JSON; see
/// [`value_to_text`] for how each kind renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateVariables {
    values: HashMap<String, Value>,
}

impl TemplateVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, Value>> for TemplateVariables {
    fn from(values: HashMap<String, Value>) -> Self {
        TemplateVariables { values }
    }
}

impl FromIterator<(String, Value)> for TemplateVariables {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        TemplateVariables {
            values: iter.into_iter().collect(),
        }
    }
}

pub(crate) fn render_segments(
    segments: &[Segment],
    variables: &TemplateVariables,
    policy: MissingVariablePolicy,
) -> Result<String, TemplateError> {
    let mut out = String::new();
    let mut missing: Vec<String> = Vec::new();
    walk(segments, variables, &mut out, &mut missing);
    if !missing.is_empty() {
        if policy == MissingVariablePolicy::Fail {
            return Err(TemplateError::UnresolvedVariables { names: missing });
        }
        tracing::warn!(
            variables = %missing.join(", "),
            "unresolved template variables rendered as empty"
        );
    }
    Ok(out)
}

fn walk(
    segments: &[Segment],
    variables: &TemplateVariables,
    out: &mut String,
    missing: &mut Vec<String>,
) {
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Variable(name) => match variables.get(name) {
                Some(value) => out.push_str(&value_to_text(value)),
                None => record_missing(missing, name),
            },
            Segment::Section {
                name,
                inverted,
                body,
            } => {
                let value = variables.get(name);
                if value.is_none() {
                    record_missing(missing, name);
                }
                let truthy = value.map(is_truthy).unwrap_or(false);
                if truthy != *inverted {
                    walk(body, variables, out, missing);
                }
            }
        }
    }
}

fn record_missing(missing: &mut Vec<String>, name: &str) {
    if !missing.iter().any(|recorded| recorded == name) {
        missing.push(name.to_string());
    }
}

/// Section condition truthiness: `null`, `false`, `""` and `[]` are falsy,
/// everything else (including `0`) is truthy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Number(_) | Value::Object(_) => true,
    }
}

/// How a variable value becomes template text: strings render unquoted,
/// numbers and booleans via their display form, `null` as `null`, arrays as
/// `[a, b]` (recursively, comma-space separated), objects as compact JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(value_to_text).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
