//! Parsed template representation.
//!
//! Templates compile into a small tree of segments; rendering is a pure walk
//! over this structure (see the [`render`](crate::template::render) module),
//! and bind-time validation can read the referenced variable set without
//! rendering anything.

use std::collections::BTreeSet;

use crate::template::error::TemplateError;
use crate::template::parser;
use crate::template::render::{self, MissingVariablePolicy, TemplateVariables};

/// One parsed piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text copied through unchanged.
    Literal(String),
    /// `{{name}}` placeholder substituted from the variable map.
    Variable(String),
    /// `{{#name}}…{{/name}}` conditional block, rendered when `name` is truthy
    /// (`{{^name}}…{{/name}}` when `inverted`, rendered when falsy).
    Section {
        name: String,
        inverted: bool,
        body: Vec<Segment>,
    },
}

/// A template compiled into renderable form.
///
/// Compilation happens once per template (the store caches compiled templates
/// process-wide); rendering never re-scans the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTemplate {
    segments: Vec<Segment>,
}

impl CompiledTemplate {
    /// Parse template source. Fails with [`TemplateError::Syntax`] on
    /// unterminated tags, unclosed or mismatched sections, and invalid
    /// variable names.
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        parser::parse(source).map(|segments| CompiledTemplate { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Every variable name this template can touch: placeholders and section
    /// conditions, recursively, including names inside conditionally-skipped
    /// section bodies. Used for bind-time contract validation.
    pub fn referenced_variables(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        collect_names(&self.segments, &mut names);
        names
    }

    /// Render against `variables`. Pure: identical inputs render byte-identically.
    pub fn render(
        &self,
        variables: &TemplateVariables,
        policy: MissingVariablePolicy,
    ) -> Result<String, TemplateError> {
        render::render_segments(&self.segments, variables, policy)
    }
}

fn collect_names(segments: &[Segment], names: &mut BTreeSet<String>) {
    for segment in segments {
        match segment {
            Segment::Literal(_) => {}
            Segment::Variable(name) => {
                names.insert(name.clone());
            }
            Segment::Section { name, body, .. } => {
                names.insert(name.clone());
                collect_names(body, names);
            }
        }
    }
}
