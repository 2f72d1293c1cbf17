//! Conversation messages

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A message in the conversation.
///
/// Messages are append-only inside a session: fields are private and the
/// role is fixed by the constructor.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Message {
    /// The role of the message
    role: Role,

    /// The content of the message
    #[serde(default)]
    content: String,

    /// The function call requested by the assistant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_call: Option<FunctionCall>,

    /// The name of the function that produced this message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<CompactString>,
}

impl Message {
    /// Create a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            ..Default::default()
        }
    }

    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            ..Default::default()
        }
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            ..Default::default()
        }
    }

    /// Create an assistant message recording a function call
    pub fn assistant_call(content: impl Into<String>, call: FunctionCall) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            function_call: Some(call),
            ..Default::default()
        }
    }

    /// Create a new tool result message
    pub fn tool(name: impl Into<CompactString>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// The role of the message
    pub fn role(&self) -> Role {
        self.role
    }

    /// The text content of the message
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The function call annotation, if any
    pub fn function_call(&self) -> Option<&FunctionCall> {
        self.function_call.as_ref()
    }

    /// The function name for tool messages
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A function call made by the model
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct FunctionCall {
    /// The name of the function to call
    #[serde(default)]
    pub name: CompactString,

    /// The arguments, either a JSON object or a string that may contain one
    #[serde(default)]
    pub arguments: serde_json::Value,
}

impl FunctionCall {
    /// Create a new function call
    pub fn new(name: impl Into<CompactString>, arguments: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// The role of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
pub enum Role {
    /// The user role
    #[serde(rename = "user")]
    #[default]
    User,
    /// The assistant role
    #[serde(rename = "assistant")]
    Assistant,
    /// The system role
    #[serde(rename = "system")]
    System,
    /// The tool result role
    #[serde(rename = "function", alias = "tool")]
    Tool,
}
