//! `{{…}}` template parser.
//!
//! Recognizes four tag forms between `{{` and `}}` delimiters:
//! plain placeholders (`{{name}}`), section opens (`{{#name}}`, inverted
//! `{{^name}}`), section closes (`{{/name}}`), and comments (`{{! ignored }}`).
//! Whitespace inside the delimiters is insignificant. Anything outside a tag is
//! literal text, including stray `}}` sequences.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::template::ast::Segment;
use crate::template::error::TemplateError;

static VARIABLE_NAME: Lazy<Regex> = Lazy::new(|| {
    // Simple identifiers only; no dotted lookups or expression evaluation.
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("variable name pattern compiles")
});

/// Whether `name` is acceptable as a template variable name. Also used by the
/// contract binder to validate declared parameter bindings.
pub(crate) fn is_valid_variable_name(name: &str) -> bool {
    VARIABLE_NAME.is_match(name)
}

struct Frame {
    // None for the root frame.
    section: Option<(String, bool)>,
    body: Vec<Segment>,
}

pub(crate) fn parse(source: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut frames = vec![Frame {
        section: None,
        body: Vec::new(),
    }];
    let mut rest = source;

    while let Some(open) = rest.find("{{") {
        if open > 0 {
            push_literal(&mut frames, &rest[..open]);
        }
        let after_open = &rest[open + 2..];
        let close = after_open
            .find("}}")
            .ok_or_else(|| TemplateError::syntax("unterminated `{{` tag"))?;
        let tag = after_open[..close].trim();
        rest = &after_open[close + 2..];

        match tag.chars().next() {
            Some('#') | Some('^') => {
                let inverted = tag.starts_with('^');
                let name = tag_name(&tag[1..])?;
                frames.push(Frame {
                    section: Some((name, inverted)),
                    body: Vec::new(),
                });
            }
            Some('/') => {
                let name = tag_name(&tag[1..])?;
                if frames.len() == 1 {
                    return Err(TemplateError::syntax(format!(
                        "closing tag {{{{/{}}}}} without an open section",
                        name
                    )));
                }
                let frame = frames.pop().expect("closing a section frame");
                let (open_name, inverted) = frame.section.expect("non-root frame has a section");
                if open_name != name {
                    return Err(TemplateError::syntax(format!(
                        "section {{{{#{}}}}} closed by {{{{/{}}}}}",
                        open_name, name
                    )));
                }
                frames
                    .last_mut()
                    .expect("root frame remains")
                    .body
                    .push(Segment::Section {
                        name: open_name,
                        inverted,
                        body: frame.body,
                    });
            }
            Some('!') => {
                // Comment tag, dropped from the output.
            }
            _ => {
                let name = tag_name(tag)?;
                frames
                    .last_mut()
                    .expect("at least the root frame exists")
                    .body
                    .push(Segment::Variable(name));
            }
        }
    }

    if !rest.is_empty() {
        push_literal(&mut frames, rest);
    }

    if frames.len() > 1 {
        let frame = frames.pop().expect("checked above");
        let (name, inverted) = frame.section.expect("non-root frame has a section");
        let sigil = if inverted { '^' } else { '#' };
        return Err(TemplateError::syntax(format!(
            "unclosed section {{{{{}{}}}}}",
            sigil, name
        )));
    }

    Ok(frames.pop().expect("root frame").body)
}

fn push_literal(frames: &mut [Frame], text: &str) {
    frames
        .last_mut()
        .expect("at least the root frame exists")
        .body
        .push(Segment::Literal(text.to_string()));
}

fn tag_name(raw: &str) -> Result<String, TemplateError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(TemplateError::syntax("empty tag name"));
    }
    if !is_valid_variable_name(name) {
        return Err(TemplateError::syntax(format!(
            "invalid tag name: {:?}",
            name
        )));
    }
    Ok(name.to_string())
}
