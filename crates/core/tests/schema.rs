//! Tests for the schema generator

use parley_core::{FALLBACK_PARAM, Param, ParamType, SchemaType, ToolDescriptor};
use serde_json::json;

fn weather() -> ToolDescriptor {
    let units = ["celsius", "fahrenheit"];
    ToolDescriptor::new("get_current_weather", "Get the current weather")
        .param(Param::string("location").describe("City name"))
        .param(Param::one_of("unit", units).default("celsius"))
}

#[test]
fn one_entry_per_param() {
    let ints = ParamType::Array(Box::new(ParamType::Integer));
    let tool = ToolDescriptor::new("mixed", "")
        .param(Param::string("a"))
        .param(Param::integer("b").default(1))
        .param(Param::number("c").nullable())
        .param(Param::boolean("d"))
        .param(Param::new("e", ints));
    let schema = tool.schema();

    assert_eq!(schema.properties.len(), tool.params().len());
    for (prop, param) in schema.properties.iter().zip(tool.params()) {
        assert_eq!(prop.name, param.name);
        assert_eq!(prop.required, param.default.is_none() && !param.nullable);
    }
    assert_eq!(schema.required().collect::<Vec<_>>(), vec!["a", "d", "e"]);
}

#[test]
fn maps_declared_types() {
    let strings = ParamType::Array(Box::new(ParamType::String));
    let tool = ToolDescriptor::new("types", "")
        .param(Param::new("custom", ParamType::Other("Guid".into())))
        .param(Param::new("tags", strings))
        .param(Param::one_of("level", ["easy", "hard"]));
    let schema = tool.schema();

    assert_eq!(schema.properties[0].ty, SchemaType::String);
    assert_eq!(schema.properties[1].ty, SchemaType::Array);
    assert_eq!(schema.properties[1].items, Some(SchemaType::String));
    assert_eq!(schema.properties[2].ty, SchemaType::String);
    let values = schema.properties[2]
        .enum_values
        .as_deref()
        .unwrap_or_default();
    assert_eq!(
        values.iter().map(|v| v.as_str()).collect::<Vec<_>>(),
        vec!["easy", "hard"]
    );
}

#[test]
fn renders_object_schema() {
    let rendered = serde_json::to_value(weather().schema().to_schema()).unwrap();
    assert_eq!(
        rendered,
        json!({
            "type": "object",
            "properties": {
                "location": { "type": "string", "description": "City name" },
                "unit": {
                    "type": "string",
                    "enum": ["celsius", "fahrenheit"],
                    "default": "celsius"
                }
            },
            "required": ["location"]
        })
    );
}

#[test]
fn opaque_tool_falls_back_to_input() {
    let schema = ToolDescriptor::opaque("echo", "Echo the input").schema();
    assert_eq!(schema.properties.len(), 1);
    assert_eq!(schema.properties[0].name, FALLBACK_PARAM);
    assert_eq!(schema.properties[0].ty, SchemaType::String);
    assert!(schema.properties[0].required);
}

#[test]
fn empty_params_is_not_fallback() {
    let schema = ToolDescriptor::new("now", "Current time").schema();
    assert!(schema.properties.is_empty());
    let rendered = serde_json::to_value(schema.to_schema()).unwrap();
    assert_eq!(rendered["required"], json!([]));
}

#[test]
fn schema_is_deterministic() {
    assert_eq!(weather().schema(), weather().schema());
}
