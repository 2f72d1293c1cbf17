//! Configuration for a conversation

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The default system prompt for new sessions.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// How function calls are advertised to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// Send parameter schemas in the `functions` field
    #[default]
    Structured,

    /// Describe the tools in the system prompt and ask for an inline marker
    Inline,
}

/// Conversation configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct General {
    /// The model to use
    pub model: CompactString,

    /// The sampling temperature
    pub temperature: f32,

    /// The number of max tokens to generate
    pub max_tokens: usize,

    /// Upper bound on tool invocations within one turn
    pub max_function_calls: usize,

    /// The function call convention advertised to the model
    pub protocol: Protocol,

    /// The system prompt new sessions start from
    pub system_prompt: String,

    /// Characters per streamed chunk
    pub chunk_size: usize,

    /// Delay between streamed chunks, in milliseconds
    pub chunk_delay_ms: u64,
}

impl General {
    /// Set the call convention
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Set the per-turn invocation bound
    pub fn with_max_function_calls(mut self, max: usize) -> Self {
        self.max_function_calls = max;
        self
    }

    /// The delay between streamed chunks
    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }
}

impl Default for General {
    fn default() -> Self {
        Self {
            model: "GigaChat".into(),
            temperature: 0.7,
            max_tokens: 1024,
            max_function_calls: 5,
            protocol: Protocol::Structured,
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            chunk_size: 5,
            chunk_delay_ms: 50,
        }
    }
}
