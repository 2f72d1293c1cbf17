//! Tool invocation.

use crate::{Arguments, registry::Entry};
use futures_util::FutureExt;
use std::{any::Any, panic::AssertUnwindSafe};

/// Prefix of every failure text fed back to the model.
pub const ERROR_PREFIX: &str = "Error executing function:";

/// Run a tool with coerced arguments.
///
/// Failures never escape: a missing required argument, a handler error or
/// a handler panic all become `Error executing function: <cause>`.
pub async fn invoke(entry: &Entry, args: Arguments) -> String {
    let name = &entry.descriptor().name;
    let missing = entry
        .schema()
        .required()
        .filter(|param| !args.contains(param))
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        tracing::warn!("{name}: missing required arguments {missing:?}");
        return format!(
            "{ERROR_PREFIX} missing required parameter: {}",
            missing.join(", ")
        );
    }

    tracing::debug!("invoking {name} with {}", args.to_json());
    let call = async move { (entry.handler)(args).await };
    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            tracing::warn!("{name} failed: {e:#}");
            format!("{ERROR_PREFIX} {e}")
        }
        Err(panic) => {
            let cause = panic_message(panic.as_ref());
            tracing::warn!("{name} panicked: {cause}");
            format!("{ERROR_PREFIX} {cause}")
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "tool panicked".to_owned()
    }
}
