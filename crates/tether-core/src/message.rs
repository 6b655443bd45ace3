//! Framework-side message types used for history and batch results.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tether_provider::ReasoningSource;

/// The role of a framework message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiRole {
    User,
    Assistant,
    System,
}

impl fmt::Display for UiRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiRole::User => write!(f, "user"),
            UiRole::Assistant => write!(f, "assistant"),
            UiRole::System => write!(f, "system"),
        }
    }
}

/// Lifecycle state of a tool part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolState {
    OutputAvailable,
    OutputError,
}

/// A part of a framework message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiPart {
    /// Plain text.
    Text { text: String },

    /// Reasoning, tagged with where it came from.
    Reasoning {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<ReasoningSource>,
    },

    /// A file, image or audio reference.
    #[serde(rename_all = "camelCase")]
    File { url: String, media_type: String },

    /// A tool call the agent already resolved server-side.
    #[serde(rename_all = "camelCase")]
    DynamicTool {
        tool_call_id: String,
        tool_name: String,
        state: ToolState,
        input: Value,
        output: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error_text: Option<String>,
    },
}

/// A single message in framework format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiMessage {
    pub id: String,
    pub role: UiRole,
    pub parts: Vec<UiPart>,
}

impl UiMessage {
    /// Empty message; the role defaults to assistant until a record says otherwise.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: UiRole::Assistant,
            parts: Vec::new(),
        }
    }

    /// Get the text content of this message (concatenated text parts).
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                UiPart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}
