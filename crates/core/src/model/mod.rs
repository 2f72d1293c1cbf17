//! Wire types and the transport trait.
//!
//! Provides the shared types sent to and received from the endpoint:
//! `Message`, `Request`, `Response`, tool descriptors and their schemas,
//! and the `Model` trait implemented by transports.

use crate::Result;
pub use message::{FunctionCall, Message, Role};
pub use request::{Function, FunctionChoice, FunctionMode, Request};
pub use response::{Choice, Delta, FinishReason, Response, Usage};
pub use schema::{FALLBACK_PARAM, ParameterSchema, PropertySchema, SchemaType};
pub use tool::{Param, ParamType, ToolDescriptor};

mod message;
mod request;
mod response;
mod schema;
mod tool;

/// A chat completion transport.
///
/// Implementations carry their own credentials and endpoint; the runtime
/// only hands them a fully built [`Request`].
pub trait Model: Clone {
    /// Send a chat completion request.
    fn send(&self, request: &Request) -> impl Future<Output = Result<Response>> + Send;
}
