//! User message assembly from a binding plan and call arguments.

use serde_json::Value;

use crate::message::ChatMessage;
use crate::template::{value_to_text, CompiledTemplate, MissingVariablePolicy, TemplateVariables};
use crate::Result;

use super::error::ServiceError;
use super::plan::{BindingPlan, UserTemplate};

/// Builds the user turn for one call.
///
/// Arity is checked before anything renders. Every declared parameter binds
/// its argument under the declared variable name; the user-name parameter
/// additionally tags the message with the argument's text form.
pub(crate) fn build_user_message(
    plan: &BindingPlan,
    args: &[Value],
    policy: MissingVariablePolicy,
) -> Result<ChatMessage> {
    if args.len() != plan.arity() {
        return Err(ServiceError::ArgumentCount {
            method: plan.method.clone(),
            expected: plan.arity(),
            got: args.len(),
        }
        .into());
    }

    let variables: TemplateVariables = plan
        .bindings
        .iter()
        .map(|(index, name)| (name.clone(), args[*index].clone()))
        .collect();

    let text = match &plan.user_template {
        UserTemplate::Compiled(compiled) => compiled.render(&variables, policy)?,
        UserTemplate::FromArgument(index) => {
            // The argument text is itself a template, compiled per call.
            let source = value_to_text(&args[*index]);
            let compiled = CompiledTemplate::compile(&source)?;
            compiled.render(&variables, policy)?
        }
    };

    Ok(match plan.user_name_index {
        Some(index) => ChatMessage::user_named(value_to_text(&args[index]), text),
        None => ChatMessage::user(text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ChatRole;
    use crate::template::TemplateError;
    use crate::Error;
    use serde_json::json;
    use std::sync::Arc;

    fn plan(
        source: &str,
        bindings: Vec<(usize, &str)>,
        user_name_index: Option<usize>,
    ) -> BindingPlan {
        BindingPlan {
            method: "greet".to_string(),
            user_template: UserTemplate::Compiled(Arc::new(
                CompiledTemplate::compile(source).unwrap(),
            )),
            bindings: bindings
                .into_iter()
                .map(|(index, name)| (index, name.to_string()))
                .collect(),
            user_name_index,
            session_id_index: None,
            response_format: Default::default(),
        }
    }

    #[test]
    fn test_binds_arguments_by_declared_name() {
        let plan = plan(
            "Hello {{user_name}}, you said: {{message}}",
            vec![(0, "user_name"), (1, "message")],
            Some(0),
        );
        let message = build_user_message(
            &plan,
            &[json!("My friend"), json!("How are you?")],
            MissingVariablePolicy::Fail,
        )
        .unwrap();
        assert_eq!(message.role, ChatRole::User);
        assert_eq!(message.text, "Hello My friend, you said: How are you?");
        assert_eq!(message.user_name.as_deref(), Some("My friend"));
    }

    #[test]
    fn test_arity_mismatch_fails_before_rendering() {
        let plan = plan("{{a}}", vec![(0, "a")], None);
        let err = build_user_message(&plan, &[], MissingVariablePolicy::Empty).unwrap_err();
        match err {
            Error::Service(ServiceError::ArgumentCount {
                expected, got, ..
            }) => {
                assert_eq!(expected, 1);
                assert_eq!(got, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_argument_sourced_template_sees_all_bindings() {
        let plan = BindingPlan {
            method: "ask".to_string(),
            user_template: UserTemplate::FromArgument(0),
            bindings: vec![(0, "prompt".to_string()), (1, "topic".to_string())],
            user_name_index: None,
            session_id_index: None,
            response_format: Default::default(),
        };
        let message = build_user_message(
            &plan,
            &[json!("Tell me about {{topic}}."), json!("owls")],
            MissingVariablePolicy::Fail,
        )
        .unwrap();
        assert_eq!(message.text, "Tell me about owls.");
    }

    #[test]
    fn test_strict_policy_propagates_unresolved() {
        let plan = plan("{{a}} {{b}}", vec![(0, "a")], None);
        let err =
            build_user_message(&plan, &[json!("x")], MissingVariablePolicy::Fail).unwrap_err();
        match err {
            Error::Template(TemplateError::UnresolvedVariables { names }) => {
                assert_eq!(names, vec!["b".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lenient_policy_renders_empty() {
        let plan = plan("a:{{a}} b:{{b}}", vec![(0, "a")], None);
        let message =
            build_user_message(&plan, &[json!("x")], MissingVariablePolicy::Empty).unwrap();
        assert_eq!(message.text, "a:x b:");
    }

    #[test]
    fn test_non_string_values_render_as_text() {
        let plan = plan(
            "{{count}} items: {{items}}",
            vec![(0, "count"), (1, "items")],
            None,
        );
        let message = build_user_message(
            &plan,
            &[json!(3), json!(["a", "b", "c"])],
            MissingVariablePolicy::Fail,
        )
        .unwrap();
        assert_eq!(message.text, "3 items: [a, b, c]");
    }
}
