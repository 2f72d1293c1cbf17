//! Tool descriptors

use crate::{ParameterSchema, Value};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A callable function the model may ask for.
///
/// Descriptors are declared once at registration time and never change
/// afterwards; the schema sent to the model is derived from them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ToolDescriptor {
    /// The name of the tool, unique within a registry
    pub name: CompactString,

    /// The description of the tool
    pub description: String,

    /// The declared parameters in positional order.
    ///
    /// `None` means no parameter metadata is available, the tool then
    /// receives a single free-text `input` argument.
    pub params: Option<Vec<Param>>,
}

impl ToolDescriptor {
    /// Create a descriptor with an empty parameter list
    pub fn new(name: impl Into<CompactString>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Some(Vec::new()),
        }
    }

    /// Create a descriptor without parameter metadata
    pub fn opaque(name: impl Into<CompactString>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: None,
        }
    }

    /// Append a parameter
    pub fn param(mut self, param: Param) -> Self {
        self.params.get_or_insert_with(Vec::new).push(param);
        self
    }

    /// The declared parameters, empty when no metadata is available
    pub fn params(&self) -> &[Param] {
        self.params.as_deref().unwrap_or_default()
    }

    /// Find a parameter by name
    pub fn get(&self, name: &str) -> Option<&Param> {
        self.params().iter().find(|p| p.name == name)
    }

    /// Derive the parameter schema for this descriptor
    pub fn schema(&self) -> ParameterSchema {
        ParameterSchema::from(self)
    }
}

/// A declared tool parameter.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Param {
    /// The name of the parameter
    pub name: CompactString,

    /// The declared type
    pub ty: ParamType,

    /// The default value, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Whether the parameter accepts null
    #[serde(default)]
    pub nullable: bool,

    /// The description of the parameter
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Param {
    /// Create a parameter of the given type
    pub fn new(name: impl Into<CompactString>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            nullable: false,
            description: String::new(),
        }
    }

    /// Create a string parameter
    pub fn string(name: impl Into<CompactString>) -> Self {
        Self::new(name, ParamType::String)
    }

    /// Create an integer parameter
    pub fn integer(name: impl Into<CompactString>) -> Self {
        Self::new(name, ParamType::Integer)
    }

    /// Create a number parameter
    pub fn number(name: impl Into<CompactString>) -> Self {
        Self::new(name, ParamType::Number)
    }

    /// Create a boolean parameter
    pub fn boolean(name: impl Into<CompactString>) -> Self {
        Self::new(name, ParamType::Boolean)
    }

    /// Create a closed-set parameter
    pub fn one_of<I, S>(name: impl Into<CompactString>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        Self::new(
            name,
            ParamType::Enum(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Set the default value
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Mark the parameter as nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Set the description
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether the model must supply this parameter
    pub fn required(&self) -> bool {
        self.default.is_none() && !self.nullable
    }

    /// Whether the parameter holds a number
    pub fn is_numeric(&self) -> bool {
        matches!(self.ty, ParamType::Integer | ParamType::Number)
    }
}

/// The declared type of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// Free text
    String,
    /// Whole number
    Integer,
    /// Decimal number
    Number,
    /// Boolean flag
    Boolean,
    /// Homogeneous list
    Array(Box<ParamType>),
    /// Closed set of named values
    Enum(Vec<CompactString>),
    /// A type the schema has no mapping for, sent as string
    Other(CompactString),
}
