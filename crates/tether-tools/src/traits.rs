//! Tool trait definition and common types.

use crate::error::ToolError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of a tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Output text.
    pub output: String,
    /// Whether the result represents an error.
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful tool result.
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: false,
        }
    }

    /// Create an error tool result.
    pub fn error(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: true,
        }
    }
}

/// Trait that all tool declarations implement.
///
/// The chat framework expects every tool the model may call to be declared
/// locally. With a remote agent the declaration is all that matters: the
/// agent service runs the tool and reports the outcome in its own records.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Machine-readable tool name (e.g., "web_search").
    fn name(&self) -> &str;

    /// Description of what the tool does.
    fn description(&self) -> &str;

    /// JSON Schema describing the tool's input.
    fn input_schema(&self) -> serde_json::Value;

    /// Invoke the tool locally with the given arguments.
    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError>;
}

// Compile-time check: Tool must be object-safe
const _: () = {
    fn _assert_object_safe(_: &dyn Tool) {}
};
