//! Basic service example
//!
//! This example declares a small assistant contract in code, binds it against
//! in-memory templates, and dispatches a few calls through a canned backend.
//! Swap `StaticChatModel` for your own `ChatModel` implementation to talk to
//! a real provider.
//!
//! Usage:
//!   cargo run --example basic_service

use std::sync::Arc;

use prompt_services::prelude::*;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let mut templates = InMemoryTemplateSource::new();
    templates.insert("assistant/system", "You are {{persona}} in session {{session_id}}.");
    templates.insert(
        "assistant/greeting",
        "Hello {{user_name}}, you said: {{message}}",
    );
    let store = Arc::new(TemplateStore::new(Box::new(templates)));

    let contract = ServiceContract::new("assistant")
        .method(
            MethodSpec::new("chat")
                .user_template("assistant/greeting")
                .user_name_param("user_name")
                .param("message")
                .session_id_param("session"),
        )
        .method(MethodSpec::new("echo").message_from_argument(0).param("text"));

    let service = PromptService::builder()
        .contract(contract)
        .template_store(Arc::clone(&store))
        .system_message_provider(Arc::new(
            TemplateSystemMessageProvider::new("assistant/system", store)
                .with_variable("persona", "a patient tutor"),
        ))
        .chat_model(Arc::new(StaticChatModel::new("Nice to meet you!")))
        .build()
        .await?;

    let reply = service
        .call("chat", &[json!("Klaus"), json!("How are you?"), json!("s-1")])
        .await?;
    println!("chat reply: {reply}");

    // The echo method treats its first argument as the prompt itself.
    let reply = service
        .call("echo", &[json!("Please summarize our discussion.")])
        .await?;
    println!("echo reply: {reply}");

    Ok(())
}
