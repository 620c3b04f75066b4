//! Command resources and the parameter declarations shared with tasks.

use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Command {
    pub parameters: Vec<Parameter>,
    /// Pipelines instantiated when the command runs.
    pub pipelines: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Parameter {
    /// Unique within a command.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParameterType,
    /// Allowed values; only meaningful for string parameters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// A parameter without a default is mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Environment variable set to the parameter value in instantiated
    /// pipelines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

impl Parameter {
    pub fn is_mandatory(&self) -> bool {
        self.default.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    #[default]
    String,
    Number,
    Boolean,
}
