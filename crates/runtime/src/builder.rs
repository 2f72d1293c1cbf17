//! Request building.
//!
//! Under [`Protocol::Structured`] the registered schemas go in the
//! `functions` field. Under [`Protocol::Inline`] the tools are described in
//! the system prompt instead, and call records are flattened to plain text
//! so the history reads the way the model was told to write it.

use crate::Registry;
use pcore::{FunctionChoice, General, Message, Protocol, Request, Role};
use std::fmt::Write;

/// Build the request for the next round trip.
pub fn build(config: &General, messages: &[Message], registry: &Registry) -> Request {
    let request = Request::from(config);
    if registry.is_empty() {
        return request.with_messages(messages.to_vec());
    }

    match config.protocol {
        Protocol::Structured => request
            .with_messages(messages.to_vec())
            .with_functions(registry.functions())
            .with_function_call(FunctionChoice::auto()),
        Protocol::Inline => request.with_messages(inline_messages(messages, registry)),
    }
}

fn inline_messages(messages: &[Message], registry: &Registry) -> Vec<Message> {
    let listing = tool_listing(registry);
    let mut out = Vec::with_capacity(messages.len() + 1);
    let mut prompted = false;
    for message in messages {
        match message.role() {
            Role::System if !prompted => {
                prompted = true;
                out.push(Message::system(format!("{}\n\n{listing}", message.content())));
            }
            Role::Assistant if message.function_call().is_some() => {
                out.push(Message::assistant(message.content()));
            }
            Role::Tool => {
                out.push(Message::user(format!("Function result: {}", message.content())));
            }
            _ => out.push(message.clone()),
        }
    }
    if !prompted {
        out.insert(0, Message::system(listing));
    }
    out
}

/// Describe every tool and the inline call format.
pub fn tool_listing(registry: &Registry) -> String {
    let mut listing = String::from("You have access to the following functions:\n");
    for entry in registry.iter() {
        let tool = entry.descriptor();
        let _ = writeln!(listing, "Function: {}", tool.name);
        let _ = writeln!(listing, "Description: {}", tool.description);
        let params = entry
            .schema()
            .properties
            .iter()
            .map(|prop| {
                let mut line = format!("{} ({}", prop.name, prop.ty.as_str());
                if prop.required {
                    line.push_str(", required");
                }
                if let Some(default) = &prop.default {
                    let _ = write!(line, ", default {default}");
                }
                line.push(')');
                line
            })
            .collect::<Vec<_>>();
        if !params.is_empty() {
            let _ = writeln!(listing, "Parameters: {}", params.join(", "));
        }
        listing.push('\n');
    }
    listing.push_str(
        "When you need to call a function, respond with: CALL_FUNCTION:function_name:arguments",
    );
    listing
}
