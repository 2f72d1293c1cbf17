//! Parameter schema generation.
//!
//! The schema is a pure function of a [`ToolDescriptor`]: one property per
//! declared parameter, `required` iff the parameter has no default and is not
//! nullable. Descriptors without parameter metadata fall back to a single
//! required `input: string` property, losing type fidelity.

use crate::{ParamType, ToolDescriptor, Value};
use compact_str::CompactString;
use schemars::Schema;
use serde_json::{Map, json};

/// Name of the generic parameter used when a tool has no metadata.
pub const FALLBACK_PARAM: &str = "input";

/// Primitive JSON schema types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
}

impl SchemaType {
    /// The JSON schema type keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
        }
    }
}

impl From<&ParamType> for SchemaType {
    fn from(ty: &ParamType) -> Self {
        match ty {
            ParamType::Integer => Self::Integer,
            ParamType::Number => Self::Number,
            ParamType::Boolean => Self::Boolean,
            ParamType::Array(_) => Self::Array,
            ParamType::String | ParamType::Enum(_) | ParamType::Other(_) => Self::String,
        }
    }
}

/// A single property of a parameter schema.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    /// The parameter name
    pub name: CompactString,
    /// The primitive type
    pub ty: SchemaType,
    /// The item type for arrays
    pub items: Option<SchemaType>,
    /// Whether the model must supply the parameter
    pub required: bool,
    /// Allowed values for closed sets
    pub enum_values: Option<Vec<CompactString>>,
    /// The declared default
    pub default: Option<Value>,
    /// The parameter description
    pub description: String,
}

/// Schema view of a descriptor's parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSchema {
    /// One entry per parameter, in declaration order
    pub properties: Vec<PropertySchema>,
}

impl ParameterSchema {
    /// The generic single-input schema.
    pub fn fallback() -> Self {
        Self {
            properties: vec![PropertySchema {
                name: FALLBACK_PARAM.into(),
                ty: SchemaType::String,
                items: None,
                required: true,
                enum_values: None,
                default: None,
                description: String::new(),
            }],
        }
    }

    /// Names of the required properties
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
    }

    /// Render as a JSON object schema.
    pub fn to_schema(&self) -> Schema {
        let mut properties = Map::new();
        for prop in &self.properties {
            let mut entry = Map::new();
            entry.insert("type".into(), json!(prop.ty.as_str()));
            if let Some(items) = prop.items {
                entry.insert("items".into(), json!({ "type": items.as_str() }));
            }
            if let Some(values) = &prop.enum_values {
                entry.insert("enum".into(), json!(values));
            }
            if let Some(default) = &prop.default {
                entry.insert("default".into(), default.to_json());
            }
            if !prop.description.is_empty() {
                entry.insert("description".into(), json!(prop.description));
            }
            properties.insert(prop.name.to_string(), entry.into());
        }

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), properties.into());
        schema.insert(
            "required".into(),
            json!(self.required().collect::<Vec<_>>()),
        );
        Schema::from(schema)
    }
}

impl From<&ToolDescriptor> for ParameterSchema {
    fn from(tool: &ToolDescriptor) -> Self {
        let Some(params) = &tool.params else {
            tracing::debug!("tool {} has no parameter metadata, using fallback", tool.name);
            return Self::fallback();
        };

        let properties = params
            .iter()
            .map(|param| PropertySchema {
                name: param.name.clone(),
                ty: SchemaType::from(&param.ty),
                items: match &param.ty {
                    ParamType::Array(item) => Some(SchemaType::from(item.as_ref())),
                    _ => None,
                },
                required: param.required(),
                enum_values: match &param.ty {
                    ParamType::Enum(values) => Some(values.clone()),
                    _ => None,
                },
                default: param.default.clone(),
                description: param.description.clone(),
            })
            .collect();

        Self { properties }
    }
}
