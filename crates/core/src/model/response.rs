//! Chat response abstractions

use crate::FunctionCall;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// A chat completion response from the model
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Response {
    /// The list of completion choices
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Token usage statistics
    #[serde(default)]
    pub usage: Usage,
}

impl Response {
    /// Create a response carrying a plain assistant answer
    pub fn answer(content: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                message: Delta {
                    content: Some(content.into()),
                    ..Default::default()
                },
                finish_reason: Some(FinishReason::Stop),
                ..Default::default()
            }],
            usage: Usage::default(),
        }
    }

    /// Create a response carrying a structured function call
    pub fn call(name: &str, arguments: serde_json::Value) -> Self {
        Self {
            choices: vec![Choice {
                message: Delta {
                    function_call: Some(FunctionCall::new(name, arguments)),
                    ..Default::default()
                },
                finish_reason: Some(FinishReason::FunctionCall),
                ..Default::default()
            }],
            usage: Usage::default(),
        }
    }

    /// Replace the usage statistics
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }

    /// Get the text content of the first choice
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }

    /// Get the structured function call of the first choice
    pub fn function_call(&self) -> Option<&FunctionCall> {
        self.choices
            .first()
            .and_then(|choice| choice.message.function_call.as_ref())
    }
}

/// A completion choice
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Choice {
    /// The index of this choice in the list
    #[serde(default)]
    pub index: u32,

    /// The generated message
    #[serde(default)]
    pub message: Delta,

    /// The reason the model stopped generating
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

/// Message content in a completion response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Delta {
    /// The content of the message
    #[serde(default)]
    pub content: Option<String>,

    /// The function call requested by the model
    #[serde(default)]
    pub function_call: Option<FunctionCall>,
}

/// The reason the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The model finished naturally
    Stop,

    /// The model hit the max token limit
    Length,

    /// Content was filtered
    Blacklist,

    /// The model is making a function call
    FunctionCall,

    /// Any other reason reported by the provider
    #[serde(untagged)]
    Other(String),
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Usage {
    /// Number of tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: u32,

    /// Number of tokens in the completion
    #[serde(default)]
    pub completion_tokens: u32,

    /// Total number of tokens used
    #[serde(default)]
    pub total_tokens: u32,
}

impl Usage {
    /// Create usage statistics. Counts saturate at `u32::MAX`.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

impl AddAssign for Usage {
    fn add_assign(&mut self, rhs: Self) {
        let add = u32::saturating_add;
        self.prompt_tokens = add(self.prompt_tokens, rhs.prompt_tokens);
        self.completion_tokens = add(self.completion_tokens, rhs.completion_tokens);
        self.total_tokens = add(self.total_tokens, rhs.total_tokens);
    }
}
