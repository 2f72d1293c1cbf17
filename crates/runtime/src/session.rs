//! Conversation state.

use pcore::{General, Message, Usage};

/// One logical conversation.
///
/// Owns the message history, the invocation counters and the cumulative
/// token usage. Only the runtime mutates it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    messages: Vec<Message>,
    calls: usize,
    total_calls: usize,
    usage: Usage,
}

impl Session {
    /// Start a session from a system prompt.
    ///
    /// An empty prompt starts with no messages.
    pub fn new(system_prompt: &str) -> Self {
        let messages = if system_prompt.is_empty() {
            Vec::new()
        } else {
            vec![Message::system(system_prompt)]
        };
        Self {
            messages,
            ..Default::default()
        }
    }

    /// The message history
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Tool invocations in the current turn
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Tool invocations over the session's lifetime
    pub fn total_calls(&self) -> usize {
        self.total_calls
    }

    /// Token usage accumulated across all requests
    pub fn usage(&self) -> Usage {
        self.usage
    }

    pub(crate) fn begin_turn(&mut self) {
        self.calls = 0;
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub(crate) fn record_call(&mut self) {
        self.calls += 1;
        self.total_calls += 1;
    }

    pub(crate) fn add_usage(&mut self, usage: Usage) {
        self.usage += usage;
    }
}

impl From<&General> for Session {
    fn from(config: &General) -> Self {
        Self::new(&config.system_prompt)
    }
}
