//! Tests for the wire messages and requests

use parley_core::{
    FunctionCall, FunctionChoice, General, Message, Request, Response, Role, Usage, Value,
};
use serde_json::json;

#[test]
fn tool_role_serializes_as_function() {
    let message = Message::tool("get_current_weather", "sunny");
    let wire = serde_json::to_value(&message).unwrap();
    assert_eq!(
        wire,
        json!({ "role": "function", "content": "sunny", "name": "get_current_weather" })
    );

    let parsed: Message =
        serde_json::from_value(json!({ "role": "tool", "content": "x" })).unwrap();
    assert_eq!(parsed.role(), Role::Tool);
}

#[test]
fn assistant_call_carries_annotation() {
    let call = FunctionCall::new("find_hiking_trails", json!({ "location": "Denver" }));
    let message = Message::assistant_call("", call.clone());
    assert_eq!(message.role(), Role::Assistant);
    assert_eq!(message.function_call(), Some(&call));

    let plain = serde_json::to_value(Message::user("hi")).unwrap();
    assert!(plain.get("function_call").is_none());
    assert!(plain.get("name").is_none());
}

#[test]
fn request_defaults_follow_config() {
    let request = Request::default();
    let general = General::default();
    assert_eq!(request.model, "GigaChat");
    assert_eq!(request.temperature, general.temperature);
    assert_eq!(request.max_tokens, 1024);

    let wire = serde_json::to_value(&request).unwrap();
    assert!(wire.get("functions").is_none());
    assert!(wire.get("function_call").is_none());
}

#[test]
fn function_choice_wire_forms() {
    assert_eq!(serde_json::to_value(FunctionChoice::auto()).unwrap(), json!("auto"));
    assert_eq!(serde_json::to_value(FunctionChoice::none()).unwrap(), json!("none"));
    assert_eq!(
        serde_json::to_value(FunctionChoice::from("search_restaurants")).unwrap(),
        json!({ "name": "search_restaurants" })
    );
}

#[test]
fn parse_response_with_function_call() {
    let response: Response = serde_json::from_value(json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": "",
                "function_call": {
                    "name": "get_current_weather",
                    "arguments": { "location": "Paris" }
                }
            },
            "finish_reason": "function_call",
            "index": 0
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13 },
        "created": 1700000000,
        "object": "chat.completion"
    }))
    .unwrap();

    let call = response.function_call().unwrap();
    assert_eq!(call.name, "get_current_weather");
    assert_eq!(call.arguments["location"], "Paris");
    assert_eq!(response.usage, Usage::new(10, 3));
}

#[test]
fn missing_usage_is_zero() {
    let response: Response = serde_json::from_value(json!({
        "choices": [{ "message": { "content": "hello" }, "finish_reason": "stop" }]
    }))
    .unwrap();
    assert_eq!(response.usage, Usage::default());
    assert_eq!(response.content(), Some("hello"));
    assert!(response.function_call().is_none());
}

#[test]
fn usage_accumulates() {
    let mut total = Usage::default();
    total += Usage::new(5, 2);
    total += Usage::new(1, 1);
    assert_eq!(total, Usage::new(6, 3));
    assert_eq!(total.total_tokens, 9);
}

#[test]
fn usage_saturates_instead_of_overflowing() {
    assert_eq!(Usage::new(u32::MAX, 7).total_tokens, u32::MAX);

    let mut total = Usage::new(u32::MAX - 1, 0);
    total += Usage::new(5, 2);
    assert_eq!(total.prompt_tokens, u32::MAX);
    assert_eq!(total.completion_tokens, 2);
    assert_eq!(total.total_tokens, u32::MAX);
}

#[test]
fn value_prefers_integers() {
    assert_eq!(Value::from_json(&json!(100)), Value::Int(100));
    assert_eq!(Value::from_json(&json!(2.5)), Value::Float(2.5));
    assert_eq!(
        Value::from_json(&json!({ "a": [1, "b"] })).to_json(),
        json!({ "a": [1, "b"] })
    );
    assert_eq!(Value::from("Paris").to_string(), "Paris");
    assert_eq!(Value::from(3).to_string(), "3");
}
