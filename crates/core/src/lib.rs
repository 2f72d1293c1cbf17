//! Core types for the parley conversation client.
//!
//! Holds the wire model shared by the transport and the runtime, the
//! configuration, the transport error and the [`Model`] trait.

pub use {
    config::{DEFAULT_SYSTEM_PROMPT, General, Protocol},
    error::{Error, Result},
    model::*,
    value::Value,
};

mod config;
mod error;
mod model;
#[cfg(feature = "testing")]
pub mod testing;
mod value;
