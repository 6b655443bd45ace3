//! Placeholder tools: declarations whose execution happens on the agent service.

use crate::error::ToolError;
use crate::prebuilt::find as find_prebuilt;
use crate::traits::{Tool, ToolResult};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde_json::{json, Value};
use tracing::debug;

/// Output of a placeholder invoked locally.
pub const HANDLED_REMOTELY: &str = "Handled by the agent service";

/// A tool declaration with no local behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderTool {
    name: String,
    description: String,
    input_schema: Value,
}

#[async_trait]
impl Tool for PlaceholderTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_schema(&self) -> Value {
        self.input_schema.clone()
    }

    async fn execute(&self, _args: Value) -> Result<ToolResult, ToolError> {
        debug!(tool = %self.name, "placeholder invoked locally");
        Ok(ToolResult::success(HANDLED_REMOTELY))
    }
}

/// Options for [`custom`].
#[derive(Debug, Clone, Default)]
pub struct CustomToolOptions {
    /// Defaults to "`<name>` tool".
    pub description: Option<String>,
    /// Defaults to a schema accepting any input.
    pub input_schema: Option<Value>,
}

impl CustomToolOptions {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn input_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }

    /// Derive the input schema from a Rust type.
    pub fn input<T: JsonSchema>(self) -> Result<Self, ToolError> {
        let schema = serde_json::to_value(schemars::schema_for!(T))
            .map_err(|e| ToolError::InvalidParameters(e.to_string()))?;
        Ok(self.input_schema(schema))
    }
}

/// Schema that accepts any input.
fn any_schema() -> Value {
    json!({})
}

/// Declare a custom tool that the agent service implements.
pub fn custom(name: impl Into<String>, options: CustomToolOptions) -> PlaceholderTool {
    let name = name.into();
    PlaceholderTool {
        description: options
            .description
            .unwrap_or_else(|| format!("{name} tool")),
        input_schema: options.input_schema.unwrap_or_else(any_schema),
        name,
    }
}

/// Declare one of the service's prebuilt tools.
pub fn prebuilt(name: &str) -> Result<PlaceholderTool, ToolError> {
    let tool = find_prebuilt(name).ok_or_else(|| ToolError::UnknownPrebuilt(name.to_string()))?;
    Ok(PlaceholderTool {
        name: tool.name.to_string(),
        description: tool.description.to_string(),
        input_schema: any_schema(),
    })
}
