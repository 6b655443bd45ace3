//! Tool registry for managing declared tools.

use crate::error::ToolError;
use crate::placeholder::prebuilt;
use crate::traits::Tool;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of declared tools.
///
/// Stores tools by name and provides lookup functionality.
#[derive(Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry holding the named prebuilt tools.
    pub fn with_prebuilt<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, ToolError> {
        let mut registry = Self::new();
        for name in names {
            registry.register(Arc::new(prebuilt(name)?));
        }
        Ok(registry)
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Check if a tool is registered.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered tool names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool declarations in the shape the chat framework expects.
    pub fn tool_definitions(&self) -> Vec<serde_json::Value> {
        self.names()
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| {
                serde_json::json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "inputSchema": tool.input_schema(),
                })
            })
            .collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
