//! Contract validation tests: everything a static pass can reject fails at
//! build time, and both declaration forms fail the same way.

use std::sync::Arc;

use prompt_services::model::{ChatModel, RecordingChatModel, StaticChatModel};
use prompt_services::service::{
    ContractManifest, MethodSpec, PromptService, ServiceContract, ServiceError,
};
use prompt_services::template::{
    InMemoryTemplateSource, MissingVariablePolicy, TemplateError, TemplateStore,
};
use prompt_services::Error;
use serde_json::json;

fn store_with(pairs: &[(&str, &str)]) -> Arc<TemplateStore> {
    let mut source = InMemoryTemplateSource::new();
    for (path, text) in pairs {
        source.insert(*path, *text);
    }
    Arc::new(TemplateStore::new(Box::new(source)))
}

async fn build(contract: ServiceContract) -> prompt_services::Result<PromptService> {
    PromptService::builder()
        .contract(contract)
        .chat_model(Arc::new(StaticChatModel::new("ok")))
        .build()
        .await
}

#[tokio::test]
async fn test_duplicate_binding_fails_in_either_order() {
    let variable_then_user_name = ServiceContract::new("svc").method(
        MethodSpec::new("greet")
            .inline_template("Hi {{who}}")
            .param("who")
            .user_name_param("who"),
    );
    let user_name_then_variable = ServiceContract::new("svc").method(
        MethodSpec::new("greet")
            .inline_template("Hi {{who}}")
            .user_name_param("who")
            .param("who"),
    );

    for contract in [variable_then_user_name, user_name_then_variable] {
        let err = build(contract).await.unwrap_err();
        match err {
            Error::Service(ServiceError::DuplicateVariableBinding { method, variable }) => {
                assert_eq!(method, "greet");
                assert_eq!(variable, "who");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[tokio::test]
async fn test_second_user_name_param_is_invalid() {
    let err = build(ServiceContract::new("svc").method(
        MethodSpec::new("greet")
            .inline_template("hi")
            .user_name_param("a")
            .user_name_param("b"),
    ))
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        Error::Service(ServiceError::InvalidContract { .. })
    ));
}

#[tokio::test]
async fn test_unresolvable_method_template_fails_at_build() {
    let store = store_with(&[("present", "x")]);
    let err = PromptService::builder()
        .contract(
            ServiceContract::new("svc").method(MethodSpec::new("greet").user_template("absent")),
        )
        .template_store(store)
        .chat_model(Arc::new(StaticChatModel::new("ok")))
        .build()
        .await
        .unwrap_err();

    match err {
        Error::Service(ServiceError::InvalidContract { source, .. }) => {
            assert!(matches!(source, Some(TemplateError::NotFound { .. })));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_strict_policy_moves_unresolved_variables_to_build_time() {
    let store = store_with(&[("greet", "Hello {{name}} from {{city}}")]);
    let err = PromptService::builder()
        .contract(
            ServiceContract::new("svc")
                .method(MethodSpec::new("greet").user_template("greet").param("name")),
        )
        .template_store(store)
        .render_policy(MissingVariablePolicy::Fail)
        .chat_model(Arc::new(StaticChatModel::new("ok")))
        .build()
        .await
        .unwrap_err();

    match err {
        Error::Service(ServiceError::MissingVariable { variable, .. }) => {
            assert_eq!(variable, "city");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_manifest_and_builder_forms_bind_identically() {
    let manifest_contract = ContractManifest::from_yaml(
        r#"
service: assistant
methods:
  - name: greet
    template: greet
    params:
      - name: user_name
        role: user_name
      - message
"#,
    )
    .unwrap()
    .into_contract()
    .unwrap();

    let builder_contract = ServiceContract::new("assistant").method(
        MethodSpec::new("greet")
            .user_template("greet")
            .user_name_param("user_name")
            .param("message"),
    );

    let mut captured = Vec::new();
    for contract in [manifest_contract, builder_contract] {
        let model = Arc::new(RecordingChatModel::new("ok"));
        let store = store_with(&[("greet", "Hello {{user_name}}, you said: {{message}}")]);
        let service = PromptService::builder()
            .contract(contract)
            .template_store(store)
            .chat_model(Arc::clone(&model) as Arc<dyn ChatModel>)
            .build()
            .await
            .unwrap();
        service
            .call("greet", &[json!("My friend"), json!("How are you?")])
            .await
            .unwrap();
        captured.push(model.last_conversation().unwrap());
    }

    assert_eq!(captured[0], captured[1]);
    assert_eq!(
        captured[0].user_message().text,
        "Hello My friend, you said: How are you?"
    );
}

#[tokio::test]
async fn test_manifest_loads_from_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contract.yaml");
    std::fs::write(
        &path,
        "service: assistant\nmethods:\n  - name: echo\n    inline: \"You said {{message}}\"\n    params: [message]\n",
    )
    .unwrap();

    let contract = ContractManifest::from_yaml_file(&path)
        .await
        .unwrap()
        .into_contract()
        .unwrap();
    let model = Arc::new(RecordingChatModel::new("ok"));
    let service = PromptService::builder()
        .contract(contract)
        .chat_model(Arc::clone(&model) as Arc<dyn ChatModel>)
        .build()
        .await
        .unwrap();
    service.call("echo", &[json!("hi")]).await.unwrap();
    assert_eq!(
        model.last_conversation().unwrap().user_message().text,
        "You said hi"
    );

    let err = ContractManifest::from_yaml_file(dir.path().join("absent.yaml"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Manifest { .. }));
}

#[tokio::test]
async fn test_manifest_response_format_survives_binding() {
    let contract = ContractManifest::from_yaml(
        r#"
service: classifier
methods:
  - name: classify
    inline: "Classify: {{text}}"
    params: [text]
    response_format: json
"#,
    )
    .unwrap()
    .into_contract()
    .unwrap();

    let model = Arc::new(RecordingChatModel::new(r#"{"label": "ok"}"#));
    let service = PromptService::builder()
        .contract(contract)
        .chat_model(Arc::clone(&model) as Arc<dyn ChatModel>)
        .build()
        .await
        .unwrap();

    service.call("classify", &[json!("t")]).await.unwrap();
    let user_text = model.last_conversation().unwrap().user_message().text.clone();
    // JSON mode appends the output instructions at dispatch
    assert!(user_text.contains("Classify: t"));
    assert!(user_text.contains("strictly with JSON"));
}

#[tokio::test]
async fn test_bound_contract_reports_methods() {
    let service = build(
        ServiceContract::new("svc")
            .method(MethodSpec::new("one").inline_template("1"))
            .method(MethodSpec::new("two").inline_template("2")),
    )
    .await
    .unwrap();

    let contract = service.contract();
    assert_eq!(contract.service(), "svc");
    assert_eq!(contract.len(), 2);
    let mut methods: Vec<&str> = contract.methods().collect();
    methods.sort_unstable();
    assert_eq!(methods, vec!["one", "two"]);
}
