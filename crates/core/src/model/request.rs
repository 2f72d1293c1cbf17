//! Chat request type.

use crate::{General, Message};
use compact_str::CompactString;
use schemars::Schema;
use serde::{Deserialize, Serialize};

/// A chat completion request in the provider's wire format.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Request {
    /// The model to use.
    pub model: CompactString,

    /// The conversation messages.
    #[serde(default)]
    pub messages: Vec<Message>,

    /// Sampling temperature.
    pub temperature: f32,

    /// Maximum tokens to generate.
    pub max_tokens: usize,

    /// The functions the model may call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<Function>>,

    /// Controls whether and which function is called.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionChoice>,
}

impl Request {
    /// Set the messages for this request.
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Set the functions for this request.
    pub fn with_functions(mut self, functions: Vec<Function>) -> Self {
        self.functions = Some(functions);
        self
    }

    /// Set the function choice for this request.
    pub fn with_function_call(mut self, choice: FunctionChoice) -> Self {
        self.function_call = Some(choice);
        self
    }
}

impl From<&General> for Request {
    fn from(config: &General) -> Self {
        Self {
            model: config.model.clone(),
            messages: Vec::new(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            functions: None,
            function_call: None,
        }
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::from(&General::default())
    }
}

/// A function advertised to the model.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Function {
    /// The name of the function
    pub name: CompactString,

    /// The description of the function
    pub description: String,

    /// The parameter schema
    pub parameters: Schema,
}

/// Controls which function is called by the model
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FunctionChoice {
    /// `"auto"` or `"none"`
    Mode(FunctionMode),

    /// Model must call the named function
    Named {
        /// The function name
        name: CompactString,
    },
}

impl FunctionChoice {
    /// Let the model decide
    pub fn auto() -> Self {
        Self::Mode(FunctionMode::Auto)
    }

    /// Forbid function calls
    pub fn none() -> Self {
        Self::Mode(FunctionMode::None)
    }
}

impl From<&str> for FunctionChoice {
    fn from(name: &str) -> Self {
        Self::Named { name: name.into() }
    }
}

/// String modes of [`FunctionChoice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionMode {
    /// Model can pick between generating a message or calling a function
    Auto,
    /// Model will not call any function
    None,
}
