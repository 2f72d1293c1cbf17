//! Parley runtime: the tool-augmented conversation loop.
//!
//! The [`Runtime`] holds the model transport, the configuration and the
//! tool registry. Each call to [`Runtime::send`] runs one user turn: it
//! builds a request, interprets the reply, invokes any requested tool,
//! feeds the result back and repeats until the model answers or the
//! per-turn invocation bound is reached.
//!
//! # Example
//!
//! ```rust,ignore
//! use parley_runtime::{Runtime, Session};
//! use pcore::{General, Message, Param, ToolDescriptor};
//!
//! let mut runtime = Runtime::new(General::default(), provider);
//! runtime.register(
//!     ToolDescriptor::new("get_current_weather", "Current weather")
//!         .param(Param::string("location"))
//!         .param(Param::string("unit").default("celsius")),
//!     |args| async move { Ok(format!("sunny in {}", args.str("location").unwrap_or("?"))) },
//! );
//! let mut session = runtime.session();
//! let reply = runtime.send(&mut session, Message::user("weather in Paris?"), &cancel).await?;
//! ```

pub use {
    coerce::{Argument, Arguments, Origin, coerce},
    heuristic::{Heuristics, KeywordHeuristics},
    interpret::{CALL_MARKER, FunctionCallRequest, RawArguments, Turn, interpret},
    invoke::{ERROR_PREFIX, invoke},
    json::{extract_json, strip_comments},
    registry::{Entry, Handler, Registry},
    session::Session,
    stream::chunks,
};
pub use tokio_util::sync::CancellationToken;

use compact_str::CompactString;
use futures_core::Stream;
use pcore::{Error, General, Message, Model, Result, ToolDescriptor, Usage};
use serde::de::DeserializeOwned;
use std::{collections::BTreeMap, future::Future, sync::Arc};

pub mod builder;
mod coerce;
mod heuristic;
mod interpret;
mod invoke;
mod json;
mod registry;
mod session;
mod stream;

/// The final answer of a turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// The answer text
    pub text: String,

    /// Usage reported for the last request of the turn
    pub usage: Usage,

    /// Tool invocations made during the turn
    pub calls: usize,
}

/// The parley runtime.
///
/// Holds the model, the configuration, the tool registry, the heuristic
/// policy and the named session store.
pub struct Runtime<M: Model> {
    model: M,
    config: General,
    registry: Registry,
    heuristics: Arc<dyn Heuristics>,
    sessions: BTreeMap<CompactString, Session>,
}

impl<M: Model> Runtime<M> {
    /// Create a new runtime with the given config and model.
    pub fn new(config: General, model: M) -> Self {
        Self {
            model,
            config,
            registry: Registry::new(),
            heuristics: Arc::new(KeywordHeuristics::default()),
            sessions: BTreeMap::new(),
        }
    }

    /// Replace the heuristic policy used for free-text arguments.
    pub fn with_heuristics(mut self, heuristics: impl Heuristics + 'static) -> Self {
        self.heuristics = Arc::new(heuristics);
        self
    }

    /// Register a tool with its handler.
    pub fn register<F, Fut>(&mut self, descriptor: ToolDescriptor, handler: F)
    where
        F: Fn(Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<String>> + Send + 'static,
    {
        self.registry.register(descriptor, handler);
    }

    /// Start a session from the configured system prompt.
    pub fn session(&self) -> Session {
        Session::from(&self.config)
    }

    /// Run one user turn through a session.
    ///
    /// Cancelling the token while the model is answering aborts the turn
    /// with [`Error::Cancelled`] before the reply is interpreted.
    pub async fn send(
        &self,
        session: &mut Session,
        message: Message,
        cancel: &CancellationToken,
    ) -> Result<Reply> {
        session.begin_turn();
        session.push(message);

        loop {
            let request = builder::build(&self.config, session.messages(), &self.registry);
            let response = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!("turn cancelled while awaiting the model");
                    return Err(Error::Cancelled);
                }
                response = self.model.send(&request) => response?,
            };
            session.add_usage(response.usage);

            let max = self.config.max_function_calls;
            let (entry, call) = match interpret(&response, &self.registry)? {
                Turn::Call { entry, request } if session.calls() < max => (entry, request),
                Turn::Call { request, .. } => {
                    tracing::debug!(
                        "function call limit {max} reached, ignoring call to {}",
                        request.name()
                    );
                    let text = response.content().unwrap_or_default();
                    return Ok(finish(session, text, response.usage));
                }
                Turn::Final(text) => return Ok(finish(session, &text, response.usage)),
            };

            let name = entry.descriptor().name.clone();
            tracing::debug!("calling function {name}");
            session.push(call.record());
            let args = coerce(call, entry.descriptor(), self.heuristics.as_ref());
            let output = invoke(entry, args).await;
            session.push(Message::tool(name, output));
            session.record_call();
        }
    }

    /// Run one user turn, then emit the answer in chunks.
    ///
    /// The whole loop completes before the first chunk is yielded.
    pub fn stream<'a>(
        &'a self,
        session: &'a mut Session,
        message: Message,
        cancel: CancellationToken,
    ) -> impl Stream<Item = Result<String>> + 'a {
        async_stream::try_stream! {
            let reply = self.send(session, message, &cancel).await?;
            let chunks = chunks(
                reply.text,
                self.config.chunk_size,
                self.config.chunk_delay(),
                cancel,
            );
            for await chunk in chunks {
                yield chunk;
            }
        }
    }

    /// Run one user turn and decode the answer as JSON.
    ///
    /// Returns `None` when the answer holds no parseable object; the raw
    /// answer stays in the session either way.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        session: &mut Session,
        message: Message,
        cancel: &CancellationToken,
    ) -> Result<Option<T>> {
        let reply = self.send(session, message, cancel).await?;
        let Some(json) = extract_json(&reply.text) else {
            tracing::debug!("answer holds no json object");
            return Ok(None);
        };
        match serde_json::from_str(&strip_comments(json)) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::debug!("failed to decode structured answer: {e}");
                Ok(None)
            }
        }
    }

    /// Send to a named session kept by the runtime.
    ///
    /// New keys start from the configured system prompt.
    pub async fn send_to(
        &mut self,
        key: &str,
        message: Message,
        cancel: &CancellationToken,
    ) -> Result<Reply> {
        let key = CompactString::from(key);
        let mut session = self
            .sessions
            .remove(&key)
            .unwrap_or_else(|| Session::from(&self.config));
        let result = self.send(&mut session, message, cancel).await;
        self.sessions.insert(key, session);
        result
    }

    /// Get a named session
    pub fn named(&self, key: &str) -> Option<&Session> {
        self.sessions.get(key)
    }

    /// Drop a named session, returning it
    pub fn forget(&mut self, key: &str) -> Option<Session> {
        self.sessions.remove(key)
    }
}

/// Record the final answer and build the reply.
fn finish(session: &mut Session, text: &str, usage: Usage) -> Reply {
    session.push(Message::assistant(text));
    Reply {
        text: text.to_owned(),
        usage,
        calls: session.calls(),
    }
}
