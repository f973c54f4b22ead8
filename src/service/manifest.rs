//! Serde form of the contract surface.
//!
//! A [`ContractManifest`] declares the same thing the builder API does, as a
//! YAML or JSON document, and converts into a [`ServiceContract`] before
//! binding. Parameters are either bare names (ordinary variables) or
//! name-plus-role maps; the message source is the parameter's name rather
//! than its position.
//!
//! ```yaml
//! service: support
//! methods:
//!   - name: answer
//!     template: support/answer
//!     params:
//!       - question
//!       - name: customer
//!         role: user_name
//!   - name: echo
//!     inline: "You said {{message}}"
//!     params: [message]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::template::TemplatePath;

use super::contract::{MethodSpec, ParamSpec, ResponseFormat, ServiceContract, UserMessage};
use super::error::ServiceError;

/// Serde-deserializable declaration of a service contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractManifest {
    pub service: String,
    #[serde(default)]
    pub methods: Vec<MethodManifest>,
}

/// One method declaration inside a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodManifest {
    pub name: String,
    /// Store-resolved user template path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplatePath>,
    /// Inline user template literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<String>,
    /// Name of the parameter whose value is the user template source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_argument: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamManifest>,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// Parameter declaration: a bare name or a name with a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamManifest {
    Name(String),
    Spec {
        name: String,
        #[serde(default)]
        role: ParamRoleManifest,
    },
}

impl ParamManifest {
    fn into_spec(self) -> ParamSpec {
        match self {
            ParamManifest::Name(name) => ParamSpec::variable(name),
            ParamManifest::Spec { name, role } => match role {
                ParamRoleManifest::Variable => ParamSpec::variable(name),
                ParamRoleManifest::UserName => ParamSpec::user_name(name),
                ParamRoleManifest::SessionId => ParamSpec::session_id(name),
            },
        }
    }
}

/// Manifest spelling of a parameter role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamRoleManifest {
    #[default]
    Variable,
    UserName,
    SessionId,
}

impl ContractManifest {
    pub fn from_yaml(text: &str) -> Result<Self, ServiceError> {
        serde_yaml::from_str(text)
            .map_err(|err| ServiceError::manifest(format!("YAML parse failure: {err}")))
    }

    pub fn from_json(text: &str) -> Result<Self, ServiceError> {
        serde_json::from_str(text)
            .map_err(|err| ServiceError::manifest(format!("JSON parse failure: {err}")))
    }

    pub async fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|err| {
            ServiceError::manifest(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::from_yaml(&content)
    }

    /// Translates the manifest into the builder-level contract form.
    ///
    /// Shape problems only a manifest can have are caught here; everything
    /// else is left to the binder so both declaration forms fail the same way.
    pub fn into_contract(self) -> Result<ServiceContract, ServiceError> {
        let mut contract = ServiceContract::new(self.service);
        for method in self.methods {
            let MethodManifest {
                name,
                template,
                inline,
                from_argument,
                params,
                response_format,
            } = method;
            let params: Vec<ParamSpec> =
                params.into_iter().map(ParamManifest::into_spec).collect();

            let mut user_message = None;
            let mut declared_sources = 0;
            if let Some(path) = template {
                user_message = Some(UserMessage::Template(path));
                declared_sources += 1;
            }
            if let Some(text) = inline {
                user_message = Some(UserMessage::Inline(text));
                declared_sources += 1;
            }
            if let Some(param) = from_argument {
                let index = params.iter().position(|p| p.name == param).ok_or_else(|| {
                    ServiceError::manifest(format!(
                        "method `{name}` sources its message from unknown parameter `{param}`"
                    ))
                })?;
                user_message = Some(UserMessage::FromArgument(index));
                declared_sources += 1;
            }
            if declared_sources > 1 {
                return Err(ServiceError::manifest(format!(
                    "method `{name}` declares more than one user message source"
                )));
            }

            contract = contract.method(MethodSpec {
                name,
                user_message,
                params,
                response_format,
            });
        }
        Ok(contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::contract::ParamRole;

    const MANIFEST: &str = r#"
service: support
methods:
  - name: answer
    template: support/answer
    params:
      - question
      - name: customer
        role: user_name
      - name: session
        role: session_id
    response_format: json
  - name: echo
    inline: "You said {{message}}"
    params: [message]
  - name: freeform
    from_argument: prompt
    params: [prompt]
"#;

    #[test]
    fn test_yaml_manifest_translates() {
        let contract = ContractManifest::from_yaml(MANIFEST)
            .unwrap()
            .into_contract()
            .unwrap();
        assert_eq!(contract.name, "support");
        assert_eq!(contract.methods.len(), 3);

        let answer = &contract.methods[0];
        assert_eq!(
            answer.user_message,
            Some(UserMessage::template("support/answer"))
        );
        assert_eq!(answer.params[0].role, ParamRole::Variable);
        assert_eq!(answer.params[1].role, ParamRole::UserName);
        assert_eq!(answer.params[2].role, ParamRole::SessionId);
        assert_eq!(answer.response_format, ResponseFormat::Json);

        let echo = &contract.methods[1];
        assert_eq!(
            echo.user_message,
            Some(UserMessage::inline("You said {{message}}"))
        );
        assert_eq!(echo.response_format, ResponseFormat::Text);

        let freeform = &contract.methods[2];
        assert_eq!(freeform.user_message, Some(UserMessage::from_argument(0)));
    }

    #[test]
    fn test_json_manifest_parses() {
        let manifest = ContractManifest::from_json(
            r#"{"service": "s", "methods": [{"name": "m", "inline": "hi"}]}"#,
        )
        .unwrap();
        assert_eq!(manifest.methods.len(), 1);
    }

    #[test]
    fn test_two_sources_rejected() {
        let err = ContractManifest::from_yaml(
            "service: s\nmethods:\n  - name: m\n    template: t\n    inline: hi\n",
        )
        .unwrap()
        .into_contract()
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("more than one user message source"));
    }

    #[test]
    fn test_from_argument_must_name_a_param() {
        let err = ContractManifest::from_yaml(
            "service: s\nmethods:\n  - name: m\n    from_argument: nope\n    params: [text]\n",
        )
        .unwrap()
        .into_contract()
        .unwrap_err();
        assert!(err.to_string().contains("unknown parameter `nope`"));
    }

    #[test]
    fn test_invalid_yaml_reports_manifest_error() {
        let err = ContractManifest::from_yaml(": not yaml").unwrap_err();
        assert!(matches!(err, ServiceError::Manifest { .. }));
    }
}
