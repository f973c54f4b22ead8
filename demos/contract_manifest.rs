//! Contract manifest example
//!
//! This example loads a service contract from a YAML manifest instead of
//! declaring it in code, then dispatches a JSON-mode method and decodes the
//! reply into a typed struct.
//!
//! Usage:
//!   cargo run --example contract_manifest

use std::sync::Arc;

use prompt_services::decode;
use prompt_services::prelude::*;
use serde::Deserialize;
use serde_json::json;

const MANIFEST: &str = r#"
service: classifier
methods:
  - name: classify
    inline: "Classify the sentiment of: {{text}}"
    params: [text]
    response_format: json
  - name: greet
    inline: "Hello {{user_name}}, you said: {{message}}"
    params:
      - name: user_name
        role: user_name
      - message
"#;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct Sentiment {
    label: String,
    confidence: f64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let contract = ContractManifest::from_yaml(MANIFEST)?.into_contract()?;

    // A schema hint like this can be embedded in templates that ask for JSON.
    println!("{}\n", decode::format_instructions::<Sentiment>());

    // Canned backend: replies the way a JSON-mode model typically does,
    // fenced in markdown.
    let service = PromptService::builder()
        .contract(contract)
        .chat_model(Arc::new(StaticChatModel::new(
            "```json\n{\"label\": \"positive\", \"confidence\": 0.93}\n```",
        )))
        .build()
        .await?;

    let bound = service.contract();
    let mut methods: Vec<&str> = bound.methods().collect();
    methods.sort_unstable();
    println!("service `{}` methods: {methods:?}", bound.service());

    let sentiment: Sentiment = service
        .call_as("classify", &[json!("What a lovely day")])
        .await?;
    println!(
        "decoded: {} (confidence {:.2})",
        sentiment.label, sentiment.confidence
    );

    Ok(())
}
