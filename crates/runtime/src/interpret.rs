//! Response interpretation.
//!
//! A reply either answers the user or asks for a function call. Two call
//! conventions are recognized: the structured `function_call` field, and an
//! inline `CALL_FUNCTION:name:arguments` marker at the start of the text.
//! The structured field takes priority and, when present, alone decides.

use crate::{Entry, Registry};
use compact_str::CompactString;
use pcore::{Error, FALLBACK_PARAM, FunctionCall, Message, Response, Result};
use serde_json::{Map, Value as Json};

/// The literal prefix of an inline call.
pub const CALL_MARKER: &str = "CALL_FUNCTION:";

/// The outcome of one reply.
#[derive(Debug)]
pub enum Turn<'r> {
    /// The reply is the answer
    Final(String),

    /// The reply asks for a registered function
    Call {
        /// The registry entry the name resolved to
        entry: &'r Entry,
        /// The call as the model sent it
        request: FunctionCallRequest,
    },
}

/// A detected function call.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionCallRequest {
    /// Parsed from the inline text marker
    Inline {
        /// The function name
        name: CompactString,
        /// Everything after the separator
        arguments: String,
    },

    /// Read from the structured call field
    Structured {
        /// The function name
        name: CompactString,
        /// The call arguments
        arguments: RawArguments,
    },
}

impl FunctionCallRequest {
    /// The requested function name
    pub fn name(&self) -> &str {
        match self {
            Self::Inline { name, .. } | Self::Structured { name, .. } => name,
        }
    }

    /// The assistant message recording this call.
    pub fn record(&self) -> Message {
        let (name, arguments) = match self {
            Self::Inline { name, arguments } => (name, Json::String(arguments.clone())),
            Self::Structured { name, arguments } => (name, arguments.to_json()),
        };
        let shown = match &arguments {
            Json::String(text) => text.clone(),
            other => other.to_string(),
        };
        Message::assistant_call(
            format!("Calling function {name} with arguments: {shown}"),
            FunctionCall::new(name.clone(), arguments),
        )
    }

    /// Consume the request, keeping only the arguments
    pub fn into_arguments(self) -> RawArguments {
        match self {
            Self::Inline { arguments, .. } => RawArguments::from(arguments),
            Self::Structured { arguments, .. } => arguments,
        }
    }
}

/// Arguments as the model sent them.
#[derive(Debug, Clone, PartialEq)]
pub enum RawArguments {
    /// A JSON object
    Object(Map<String, Json>),

    /// Free text that is not an object
    Text(String),
}

impl RawArguments {
    /// The arguments as one string.
    ///
    /// An object holding only `input` yields that value.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Object(map) => match map.get(FALLBACK_PARAM) {
                Some(Json::String(text)) if map.len() == 1 => text.clone(),
                _ => Json::Object(map).to_string(),
            },
        }
    }

    /// The arguments as JSON
    pub fn to_json(&self) -> Json {
        match self {
            Self::Object(map) => Json::Object(map.clone()),
            Self::Text(text) => Json::String(text.clone()),
        }
    }
}

impl RawArguments {
    /// Read the arguments of a structured call.
    ///
    /// Object-shaped text that does not parse is a malformed reply.
    pub fn structured(json: Json) -> Result<Self> {
        if let Json::String(text) = &json
            && text.trim_start().starts_with('{')
        {
            let parsed = serde_json::from_str::<Json>(text.trim());
            if !matches!(parsed, Ok(Json::Object(_))) {
                return Err(Error::NoResponse);
            }
        }
        Ok(Self::from(json))
    }
}

impl From<String> for RawArguments {
    fn from(text: String) -> Self {
        let trimmed = text.trim();
        if trimmed.starts_with('{')
            && let Ok(Json::Object(map)) = serde_json::from_str(trimmed)
        {
            return Self::Object(map);
        }
        Self::Text(text)
    }
}

impl From<Json> for RawArguments {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Self::Object(Map::new()),
            Json::Object(map) => Self::Object(map),
            Json::String(text) => Self::from(text),
            other => Self::Text(other.to_string()),
        }
    }
}

/// Classify a reply as a final answer or a call to a registered tool.
///
/// A structured call without a name, or with object-shaped arguments that
/// do not parse, is a malformed reply and ends the turn.
pub fn interpret<'r>(response: &Response, registry: &'r Registry) -> Result<Turn<'r>> {
    let choice = response.choices.first().ok_or(Error::NoResponse)?;
    let content = choice.message.content.clone().unwrap_or_default();

    if let Some(call) = &choice.message.function_call {
        if call.name.is_empty() {
            return Err(Error::NoResponse);
        }
        let Some(entry) = registry.get(&call.name) else {
            tracing::debug!("model asked for unknown function {}", call.name);
            return Ok(Turn::Final(content));
        };
        let request = FunctionCallRequest::Structured {
            name: call.name.clone(),
            arguments: RawArguments::structured(call.arguments.clone())?,
        };
        return Ok(Turn::Call { entry, request });
    }

    let Some((name, arguments)) = parse_inline(&content) else {
        return Ok(Turn::Final(content));
    };
    match registry.get(name) {
        Some(entry) => {
            let request = FunctionCallRequest::Inline {
                name: name.into(),
                arguments: arguments.to_owned(),
            };
            Ok(Turn::Call { entry, request })
        }
        None => {
            tracing::debug!("model asked for unknown function {name}");
            Ok(Turn::Final(content))
        }
    }
}

/// Split an inline call into name and arguments.
///
/// The separator is the first colon after the marker.
pub fn parse_inline(text: &str) -> Option<(&str, &str)> {
    let rest = text.trim_start().strip_prefix(CALL_MARKER)?;
    let (name, arguments) = rest.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, arguments.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_keeps_colons_in_arguments() {
        assert_eq!(
            parse_inline("CALL_FUNCTION:lookup:time: 12:30"),
            Some(("lookup", "time: 12:30"))
        );
    }

    #[test]
    fn inline_ignores_leading_whitespace() {
        assert_eq!(
            parse_inline("\n  CALL_FUNCTION:get_weather:Paris"),
            Some(("get_weather", "Paris"))
        );
    }

    #[test]
    fn inline_requires_separator() {
        assert_eq!(parse_inline("CALL_FUNCTION:get_weather"), None);
        assert_eq!(parse_inline("CALL_FUNCTION::Paris"), None);
        assert_eq!(parse_inline("sure, CALL_FUNCTION:get_weather:Paris"), None);
    }

    #[test]
    fn raw_arguments_from_json() {
        assert_eq!(RawArguments::from(Json::Null), RawArguments::Object(Map::new()));
        assert!(matches!(
            RawArguments::from(Json::String(r#"{"a": 1}"#.into())),
            RawArguments::Object(_)
        ));
        assert_eq!(
            RawArguments::from(Json::String("Paris".into())),
            RawArguments::Text("Paris".into())
        );
        assert_eq!(
            RawArguments::from(serde_json::json!(42)),
            RawArguments::Text("42".into())
        );
    }

    #[test]
    fn structured_rejects_broken_object_text() {
        let broken = ["{\"location\": \"Paris\"", "  { not json }", "{\"a\": 1} trailing"];
        for text in broken {
            let result = RawArguments::structured(Json::String(text.into()));
            assert!(matches!(result, Err(Error::NoResponse)), "{text}");
        }

        let empty = RawArguments::structured(Json::String(" {} ".into())).unwrap();
        assert_eq!(empty, RawArguments::Object(Map::new()));
        let list = RawArguments::structured(Json::String("[1, 2]".into())).unwrap();
        assert_eq!(list, RawArguments::Text("[1, 2]".into()));
    }

    #[test]
    fn into_text_unwraps_input() {
        let args = RawArguments::from(serde_json::json!({ "input": "100 usd" }));
        assert_eq!(args.into_text(), "100 usd");
    }
}
