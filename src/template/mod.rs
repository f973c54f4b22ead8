//! Template resolution, compilation, and rendering.
//!
//! Templates are plain text with `{{variable}}` placeholders plus optional
//! `{{#section}}...{{/section}}` blocks. Sources resolve a [`TemplatePath`]
//! to raw text; the [`TemplateStore`] compiles that text once and caches the
//! result so concurrent callers share a single [`CompiledTemplate`].
//!
//! - `TemplateStore`: Compile-once cache in front of a source
//! - `TemplateSource`: Pluggable lookup backend (filesystem, in-memory)
//! - `CompiledTemplate`: Parsed segment tree, renders against variables
//! - `TemplateVariables`: Named values a render call substitutes
//! - `MissingVariablePolicy`: Lenient or strict handling of absent names
//!
//! # Examples
//!
//! ```
//! use prompt_services::template::{
//!     CompiledTemplate, MissingVariablePolicy, TemplateVariables,
//! };
//! use serde_json::json;
//!
//! let template = CompiledTemplate::compile("Hello {{name}}!").unwrap();
//! let vars = TemplateVariables::new().with("name", json!("Alice"));
//! let text = template
//!     .render(&vars, MissingVariablePolicy::Fail)
//!     .unwrap();
//!
//! assert_eq!(text, "Hello Alice!");
//! ```

pub mod ast;
pub mod error;
pub mod path;
pub mod render;
pub mod source;
pub mod store;

mod parser;

pub(crate) use parser::is_valid_variable_name;

// Re-export commonly used types
pub use ast::{CompiledTemplate, Segment};
pub use error::TemplateError;
pub use path::TemplatePath;
pub use render::{value_to_text, MissingVariablePolicy, TemplateVariables};
pub use source::{FsTemplateSource, InMemoryTemplateSource, TemplateSource};
pub use store::{TemplateStore, DEFAULT_CACHE_CAPACITY};
