//! Tool registry.
//!
//! Maps a tool name to its descriptor, the schema derived from it at
//! registration time, and the bound handler. Registering a name twice
//! replaces the earlier entry.

use crate::Arguments;
use compact_str::CompactString;
use pcore::{Function, ParameterSchema, ToolDescriptor};
use std::{collections::BTreeMap, fmt, future::Future, pin::Pin, sync::Arc};

/// A type-erased async tool handler.
pub type Handler = Arc<
    dyn Fn(Arguments) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send>>
        + Send
        + Sync,
>;

/// A registered tool.
#[derive(Clone)]
pub struct Entry {
    descriptor: ToolDescriptor,
    schema: ParameterSchema,
    pub(crate) handler: Handler,
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

impl Entry {
    /// The tool descriptor
    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    /// The schema derived at registration
    pub fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    /// The function advertised to the model
    pub fn function(&self) -> Function {
        Function {
            name: self.descriptor.name.clone(),
            description: self.descriptor.description.clone(),
            parameters: self.schema.to_schema(),
        }
    }
}

/// Name-keyed catalog of callable tools.
#[derive(Clone, Default)]
pub struct Registry {
    tools: BTreeMap<CompactString, Entry>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool with its handler.
    pub fn register<F, Fut>(&mut self, descriptor: ToolDescriptor, handler: F)
    where
        F: Fn(Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<String>> + Send + 'static,
    {
        let name = descriptor.name.clone();
        let schema = descriptor.schema();
        let handler: Handler = Arc::new(move |args| Box::pin(handler(args)));
        let entry = Entry {
            descriptor,
            schema,
            handler,
        };
        if self.tools.insert(name.clone(), entry).is_some() {
            tracing::warn!("tool {name} registered twice, replacing the earlier handler");
        }
    }

    /// Get a registered tool by name
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.tools.get(name)
    }

    /// Iterate over the registered tools in name order
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.tools.values()
    }

    /// The functions advertised to the model, in name order
    pub fn functions(&self) -> Vec<Function> {
        self.tools.values().map(Entry::function).collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tool is registered
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
