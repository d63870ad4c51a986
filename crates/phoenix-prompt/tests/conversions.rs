use std::collections::HashMap;

use anyhow::Result;
use phoenix_prompt::{
    models::{
        message::Message,
        prompt::PromptVersion,
        tool::{ToolChoice, ToolDefinition, Tools},
    },
    providers::{
        anthropic::{AnthropicAdapter, AnthropicMessageContent},
        factory::ModelProvider,
        openai::OpenAiMessage,
    },
    ConversionError, ConverterOptions, FormatConverter, SerializationFallback,
};
use serde_json::{json, Value};

/// Convert a conversation to the hub and return its JSON form
fn to_hub_json(messages: &[Message]) -> Result<Value> {
    let hub = FormatConverter::default().messages_to_hub(messages)?;
    Ok(serde_json::to_value(hub)?)
}

#[test]
fn test_phoenix_document_to_hub() -> Result<()> {
    let messages: Vec<Message> = serde_json::from_value(json!([
        {"role": "SYSTEM", "content": [
            {"type": "text", "text": {"text": "You are a weather bot."}}
        ]},
        {"role": "USER", "content": [{"type": "text", "text": {"text": "Weather in Oslo?"}}]},
        {"role": "AI", "content": [
            {"type": "tool_call", "tool_call": {
                "tool_call_id": "call_1",
                "tool_call": {"type": "function", "name": "weather", "arguments": {"city": "Oslo"}}
            }}
        ]},
        {"role": "TOOL", "content": [
            {"type": "tool_result", "tool_result": {
                "tool_call_id": "call_1",
                "result": {"temp": -3}
            }}
        ]},
        {"role": "AI", "content": [{"type": "text", "text": {"text": "It is -3 degrees."}}]}
    ]))?;

    assert_eq!(
        to_hub_json(&messages)?,
        json!([
            {"role": "system", "content": [{"type": "text", "text": "You are a weather bot."}]},
            {"role": "user", "content": [{"type": "text", "text": "Weather in Oslo?"}]},
            {"role": "assistant", "content": [], "tool_calls": [
                {
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "weather", "arguments": "{\"city\":\"Oslo\"}"}
                }
            ]},
            {"role": "tool", "content": "{\"temp\":-3}", "tool_call_id": "call_1"},
            {"role": "assistant", "content": [{"type": "text", "text": "It is -3 degrees."}]}
        ])
    );
    Ok(())
}

#[test]
fn test_string_arguments_are_not_encoded_twice() -> Result<()> {
    let message = Message::ai().with_tool_call("call_1", "f", "{\"x\":1}");
    let hub = to_hub_json(&[message])?;
    assert_eq!(hub[0]["tool_calls"][0]["function"]["arguments"], json!("{\"x\":1}"));
    Ok(())
}

#[test]
fn test_object_arguments_are_encoded() -> Result<()> {
    let message = Message::ai().with_tool_call("call_1", "f", json!({"x": 1}));
    let hub = to_hub_json(&[message])?;
    assert_eq!(hub[0]["tool_calls"][0]["function"]["arguments"], json!("{\"x\":1}"));
    Ok(())
}

#[test]
fn test_tool_call_count_and_order() -> Result<()> {
    let message = Message::ai()
        .with_tool_call("a", "first", "{}")
        .with_text("between")
        .with_tool_call("b", "second", "{}")
        .with_tool_call("c", "third", "{}");
    let hub = to_hub_json(&[message])?;
    let ids: Vec<&str> = hub[0]["tool_calls"]
        .as_array()
        .unwrap()
        .iter()
        .map(|call| call["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    Ok(())
}

#[test]
fn test_unknown_tags_are_rejected_at_the_boundary() {
    let err = serde_json::from_value::<Message>(json!({
        "role": "USER",
        "content": [{"type": "image", "image": {"url": "x"}}]
    }))
    .map_err(ConversionError::from)
    .unwrap_err();
    assert!(err.to_string().contains("unknown variant"));

    assert!(serde_json::from_value::<Message>(json!({"role": "ROBOT", "content": []})).is_err());
    assert!(serde_json::from_value::<ToolChoice>(json!({"type": "sometimes"})).is_err());
}

#[test]
fn test_fallback_policy_is_configurable() {
    let converter = FormatConverter::new(ConverterOptions {
        serialization_fallback: SerializationFallback::Error,
    });
    // JSON values always encode, the policy only changes the outcome of a failed encoding
    let hub = converter
        .message_to_hub(&Message::tool().with_tool_result("c", json!([1, 2])))
        .unwrap();
    assert_eq!(
        serde_json::to_value(hub).unwrap()["content"],
        json!("[1,2]")
    );
}

#[test]
fn test_anthropic_round_trip_through_hub() -> Result<()> {
    let converter = FormatConverter::default();
    let messages = vec![
        Message::system().with_text("Be brief."),
        Message::user().with_text("Add 2 and 3"),
        Message::ai()
            .with_text("Using the calculator")
            .with_tool_call("t1", "add", json!({"a": 2, "b": 3})),
        Message::tool().with_tool_result("t1", json!("5")),
        Message::ai().with_text("5"),
    ];

    let conversation = converter.messages_to_provider(&AnthropicAdapter, &messages)?;
    assert_eq!(conversation.system.as_deref(), Some("Be brief."));
    assert_eq!(conversation.messages.len(), 4);
    assert!(matches!(
        conversation.messages[2].content,
        AnthropicMessageContent::Blocks(_)
    ));

    let back = converter.messages_from_provider(&AnthropicAdapter, &conversation)?;
    assert_eq!(back.len(), messages.len());
    assert_eq!(back[0], messages[0]);
    assert_eq!(back[1], messages[1]);
    assert_eq!(back[3], messages[3]);
    assert_eq!(back[4], messages[4]);

    let call = back[2].tool_calls()[0].clone();
    assert_eq!(call.tool_call_id, "t1");
    assert_eq!(call.tool_call.name, "add");
    assert_eq!(
        serde_json::from_str::<Value>(call.tool_call.arguments.as_str().unwrap())?,
        json!({"a": 2, "b": 3})
    );
    Ok(())
}

#[test]
fn test_tools_move_between_providers() -> Result<()> {
    let converter = FormatConverter::default();
    let tools = Tools::new(vec![ToolDefinition::new("lookup")
        .with_description("Find a document")
        .with_schema(json!({"type": "object", "properties": {"id": {"type": "string"}}}))])?
    .with_tool_choice(ToolChoice::SpecificFunctionTool {
        function_name: "lookup".to_string(),
    });

    let openai = converter.denormalize_tools(&tools, ModelProvider::OpenAi)?;
    assert_eq!(
        openai["tool_choice"],
        json!({"type": "function", "function": {"name": "lookup"}})
    );

    let anthropic = converter.denormalize_tools(&tools, ModelProvider::Anthropic)?;
    assert_eq!(anthropic["tool_choice"], json!({"type": "tool", "name": "lookup"}));

    let from_anthropic = converter.normalize_tools(
        &anthropic["tools"],
        ModelProvider::Anthropic,
        Some(&anthropic["tool_choice"]),
    )?;
    assert_eq!(from_anthropic, tools);
    Ok(())
}

#[test]
fn test_prompt_version_requests() -> Result<()> {
    let version: PromptVersion = serde_json::from_value(json!({
        "model_provider": "ANTHROPIC",
        "model_name": "claude-3-5-sonnet-latest",
        "template": {"version": "string-template-v1", "template": "Translate {text} to {language}"},
        "template_type": "STR",
        "template_format": "FSTRING",
        "invocation_parameters": {
            "type": "invocation-parameters",
            "parameters": {"max_completion_tokens": 300, "stop_sequences": ["\n\n"]}
        }
    }))?;
    let variables = HashMap::from([
        ("text".to_string(), "bonjour".to_string()),
        ("language".to_string(), "English".to_string()),
    ]);

    let anthropic = serde_json::to_value(version.to_anthropic_request(&variables)?)?;
    assert_eq!(
        anthropic,
        json!({
            "model": "claude-3-5-sonnet-latest",
            "messages": [{"role": "user", "content": [
                {"type": "text", "text": "Translate bonjour to English"}
            ]}],
            "max_tokens": 300,
            "stop_sequences": ["\n\n"]
        })
    );

    let openai = version.to_openai_request(&variables)?;
    match &openai.messages[0] {
        OpenAiMessage::User { content } => {
            assert_eq!(content.text(), "Translate bonjour to English")
        }
        other => panic!("Expected user message, got {:?}", other),
    }
    // openai has no stop sequence field in the stored mapping
    assert_eq!(serde_json::to_value(&openai)?.get("stop_sequences"), None);
    Ok(())
}

#[test]
fn test_saved_tool_choice_reaches_other_provider() -> Result<()> {
    let converter = FormatConverter::default();
    let mut version: PromptVersion = serde_json::from_value(json!({
        "model_provider": "ANTHROPIC",
        "model_name": "claude-3-5-sonnet-latest",
        "template": {"version": "string-template-v1", "template": "Hello"},
        "template_type": "STR",
        "template_format": "NONE",
        "invocation_parameters": {"type": "invocation-parameters", "parameters": {}}
    }))?;
    let variables = HashMap::new();

    version.invocation_parameters = converter.normalize_invocation_parameters(
        &json!({"tool_choice": {"type": "tool", "name": "lookup"}}),
        ModelProvider::Anthropic,
    )?;
    let openai = serde_json::to_value(converter.openai_request(&version, &variables)?)?;
    assert_eq!(
        openai["tool_choice"],
        json!({"type": "function", "function": {"name": "lookup"}})
    );

    version.invocation_parameters = converter
        .normalize_invocation_parameters(&json!({"tool_choice": "none"}), ModelProvider::OpenAi)?;
    let anthropic = serde_json::to_value(converter.anthropic_request(&version, &variables)?)?;
    assert_eq!(anthropic["tool_choice"], json!({"type": "none"}));
    Ok(())
}
