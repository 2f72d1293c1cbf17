//! Argument coercion.
//!
//! Turns whatever the model sent into a named, typed argument map for one
//! descriptor. Never fails: the worst case is a map missing some required
//! parameters, which the invoker then reports back to the model.

use crate::{FunctionCallRequest, Heuristics, RawArguments};
use anyhow::Result;
use compact_str::CompactString;
use pcore::{FALLBACK_PARAM, Param, ParamType, SchemaType, ToolDescriptor, Value};
use serde_json::{Map, Value as Json};
use std::collections::BTreeMap;

/// Where an argument value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Sent by the model
    Supplied,
    /// The declared default
    Default,
    /// Guessed from free text or a placeholder
    Inferred,
}

/// A single coerced argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// The typed value
    pub value: Value,
    /// Where the value came from
    pub origin: Origin,
}

/// Named arguments handed to a tool handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: BTreeMap<CompactString, Argument>,
}

impl Arguments {
    /// Create an empty argument map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an argument, replacing any previous value
    pub fn insert(
        &mut self,
        name: impl Into<CompactString>,
        value: impl Into<Value>,
        origin: Origin,
    ) {
        self.values.insert(
            name.into(),
            Argument {
                value: value.into(),
                origin,
            },
        );
    }

    /// Builder form of [`Arguments::insert`] for supplied values
    pub fn with(mut self, name: impl Into<CompactString>, value: impl Into<Value>) -> Self {
        self.insert(name, value, Origin::Supplied);
        self
    }

    /// Get an argument value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).map(|arg| &arg.value)
    }

    /// Get an argument with its origin
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.values.get(name)
    }

    /// Where an argument came from
    pub fn origin(&self, name: &str) -> Option<Origin> {
        self.values.get(name).map(|arg| arg.origin)
    }

    /// Whether an argument is present
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Get a text argument
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Get an integer argument
    pub fn i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Get a numeric argument
    pub fn f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    /// Get a boolean argument
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Get an argument or fail with its name.
    pub fn require(&self, name: &str) -> Result<&Value> {
        self.get(name)
            .ok_or_else(|| anyhow::anyhow!("missing argument `{name}`"))
    }

    /// Iterate over the arguments in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Argument)> {
        self.values.iter().map(|(name, arg)| (name.as_str(), arg))
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The values as a JSON object
    pub fn to_json(&self) -> Json {
        Json::Object(
            self.values
                .iter()
                .map(|(name, arg)| (name.to_string(), arg.value.to_json()))
                .collect(),
        )
    }
}

/// Coerce a call's arguments against a descriptor.
///
/// In priority order: a structured object is copied by parameter name; an
/// object holding only `input` goes through the heuristic mapper; plain
/// text is split on commas and assigned positionally. Declared defaults
/// fill whatever is still missing.
pub fn coerce(
    call: FunctionCallRequest,
    tool: &ToolDescriptor,
    heuristics: &dyn Heuristics,
) -> Arguments {
    let raw = call.into_arguments();
    let Some(params) = tool.params.as_deref() else {
        let mut args = Arguments::new();
        args.insert(FALLBACK_PARAM, raw.into_text(), Origin::Supplied);
        return args;
    };

    let mut args = match raw {
        RawArguments::Object(map) => match underspecified(&map, tool) {
            Some(text) => {
                tracing::debug!("{}: mapping free-text input heuristically", tool.name);
                infer(&text, params, heuristics)
            }
            None => from_object(&map, params),
        },
        RawArguments::Text(text) => positional(&text, params),
    };

    for param in params {
        if let Some(default) = &param.default
            && !args.contains(&param.name)
        {
            args.insert(param.name.clone(), default.clone(), Origin::Default);
        }
    }
    args
}

/// The free text of an object that only carries the generic `input` key.
fn underspecified(map: &Map<String, Json>, tool: &ToolDescriptor) -> Option<String> {
    if map.len() != 1 || tool.get(FALLBACK_PARAM).is_some() {
        return None;
    }
    match map.get(FALLBACK_PARAM)? {
        Json::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn from_object(map: &Map<String, Json>, params: &[Param]) -> Arguments {
    let mut args = Arguments::new();
    for param in params {
        match map.get(param.name.as_str()) {
            Some(Json::Null) if !param.nullable => {}
            Some(value) => args.insert(
                param.name.clone(),
                convert(Value::from_json(value), &param.ty),
                Origin::Supplied,
            ),
            None => {}
        }
    }
    args
}

fn positional(text: &str, params: &[Param]) -> Arguments {
    let mut args = Arguments::new();
    for (param, part) in params.iter().zip(text.split(',')) {
        let part = part.trim().trim_matches(['"', '\'']).trim();
        if part.is_empty() {
            continue;
        }
        args.insert(
            param.name.clone(),
            convert(Value::from(part), &param.ty),
            Origin::Supplied,
        );
    }
    args
}

fn infer(text: &str, params: &[Param], heuristics: &dyn Heuristics) -> Arguments {
    let mut args = Arguments::new();
    if let [param] = params {
        args.insert(
            param.name.clone(),
            convert(Value::from(text.trim()), &param.ty),
            Origin::Inferred,
        );
        return args;
    }

    for param in params {
        if let Some(default) = &param.default {
            args.insert(param.name.clone(), default.clone(), Origin::Default);
        }
    }

    if let Some(param) = params.iter().find(|p| p.is_numeric())
        && let Some(number) = first_number(text)
    {
        args.insert(
            param.name.clone(),
            convert(number, &param.ty),
            Origin::Inferred,
        );
    }

    for param in params {
        if args.contains(&param.name) || SchemaType::from(&param.ty) != SchemaType::String {
            continue;
        }
        match heuristics.placeholder(param) {
            Some(value) => args.insert(param.name.clone(), value, Origin::Inferred),
            None => tracing::warn!("no placeholder for parameter {}", param.name),
        }
    }
    args
}

/// The first token of the text that reads as a number.
fn first_number(text: &str) -> Option<Value> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .map(|word| word.trim_matches(|c: char| !c.is_ascii_digit() && c != '.' && c != '-'))
        .find_map(parse_number)
}

fn parse_number(text: &str) -> Option<Value> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(Value::Int(int));
    }
    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Float)
}

/// Convert a value to the declared type when it cleanly parses.
fn convert(value: Value, ty: &ParamType) -> Value {
    match (ty, value) {
        (ParamType::Integer, Value::Text(text)) => {
            text.trim()
                .parse::<i64>()
                .map(Value::Int)
                .unwrap_or(Value::Text(text))
        }
        (ParamType::Integer, Value::Float(f))
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
        {
            Value::Int(f as i64)
        }
        (ParamType::Number, Value::Text(text)) => {
            parse_number(text.trim()).unwrap_or(Value::Text(text))
        }
        (ParamType::Boolean, Value::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::Text(text),
        },
        (ParamType::Array(_), Value::Text(text)) => serde_json::from_str::<Json>(&text)
            .ok()
            .filter(Json::is_array)
            .map(|json| Value::from_json(&json))
            .unwrap_or(Value::Text(text)),
        (_, value) => value,
    }
}
