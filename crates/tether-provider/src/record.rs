//! Wire records exchanged with the agent service.
//!
//! The service describes its side of a conversation as a flat sequence of
//! typed records. Several records may share one `id`; they belong to the same
//! logical message and arrive in order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Correlation fields shared by every record kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq_id: Option<i64>,
}

/// One record emitted by the agent service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "message_type", rename_all = "snake_case")]
pub enum AgentMessage {
    SystemMessage {
        id: String,
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        date: Option<DateTime<Utc>>,
        #[serde(flatten)]
        meta: RecordMeta,
    },
    UserMessage {
        id: String,
        content: MessageContent,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        date: Option<DateTime<Utc>>,
        #[serde(flatten)]
        meta: RecordMeta,
    },
    AssistantMessage {
        id: String,
        content: MessageContent,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        date: Option<DateTime<Utc>>,
        #[serde(flatten)]
        meta: RecordMeta,
    },
    ReasoningMessage {
        id: String,
        reasoning: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<ReasoningSource>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        signature: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        date: Option<DateTime<Utc>>,
        #[serde(flatten)]
        meta: RecordMeta,
    },
    ToolCallMessage {
        id: String,
        tool_call: ToolCallDelta,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        date: Option<DateTime<Utc>>,
        #[serde(flatten)]
        meta: RecordMeta,
    },
    ToolReturnMessage {
        id: String,
        tool_call_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        tool_return: String,
        status: ToolReturnStatus,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stdout: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stderr: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        date: Option<DateTime<Utc>>,
        #[serde(flatten)]
        meta: RecordMeta,
    },
}

impl AgentMessage {
    /// Correlation id of the record.
    pub fn id(&self) -> &str {
        match self {
            AgentMessage::SystemMessage { id, .. }
            | AgentMessage::UserMessage { id, .. }
            | AgentMessage::AssistantMessage { id, .. }
            | AgentMessage::ReasoningMessage { id, .. }
            | AgentMessage::ToolCallMessage { id, .. }
            | AgentMessage::ToolReturnMessage { id, .. } => id,
        }
    }

    /// The record kind, without its payload.
    pub fn message_type(&self) -> MessageType {
        match self {
            AgentMessage::SystemMessage { .. } => MessageType::SystemMessage,
            AgentMessage::UserMessage { .. } => MessageType::UserMessage,
            AgentMessage::AssistantMessage { .. } => MessageType::AssistantMessage,
            AgentMessage::ReasoningMessage { .. } => MessageType::ReasoningMessage,
            AgentMessage::ToolCallMessage { .. } => MessageType::ToolCallMessage,
            AgentMessage::ToolReturnMessage { .. } => MessageType::ToolReturnMessage,
        }
    }

    /// Create an assistant record with plain text content.
    pub fn assistant(id: impl Into<String>, text: impl Into<String>) -> Self {
        AgentMessage::AssistantMessage {
            id: id.into(),
            content: MessageContent::Text(text.into()),
            date: None,
            meta: RecordMeta::default(),
        }
    }

    /// Create a user record with plain text content.
    pub fn user(id: impl Into<String>, text: impl Into<String>) -> Self {
        AgentMessage::UserMessage {
            id: id.into(),
            content: MessageContent::Text(text.into()),
            date: None,
            meta: RecordMeta::default(),
        }
    }

    /// Create a reasoning record.
    pub fn reasoning(
        id: impl Into<String>,
        reasoning: impl Into<String>,
        source: Option<ReasoningSource>,
    ) -> Self {
        AgentMessage::ReasoningMessage {
            id: id.into(),
            reasoning: reasoning.into(),
            source,
            signature: None,
            date: None,
            meta: RecordMeta::default(),
        }
    }

    /// Create a tool call record (possibly a fragment of a streamed call).
    pub fn tool_call(id: impl Into<String>, tool_call: ToolCallDelta) -> Self {
        AgentMessage::ToolCallMessage {
            id: id.into(),
            tool_call,
            date: None,
            meta: RecordMeta::default(),
        }
    }
}

/// Field-less record kind, used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    SystemMessage,
    UserMessage,
    AssistantMessage,
    ReasoningMessage,
    ToolCallMessage,
    ToolReturnMessage,
}

impl MessageType {
    /// Every record kind.
    pub const ALL: [MessageType; 6] = [
        MessageType::UserMessage,
        MessageType::AssistantMessage,
        MessageType::SystemMessage,
        MessageType::ToolCallMessage,
        MessageType::ToolReturnMessage,
        MessageType::ReasoningMessage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::SystemMessage => "system_message",
            MessageType::UserMessage => "user_message",
            MessageType::AssistantMessage => "assistant_message",
            MessageType::ReasoningMessage => "reasoning_message",
            MessageType::ToolCallMessage => "tool_call_message",
            MessageType::ToolReturnMessage => "tool_return_message",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of a user or assistant record.
///
/// Older service generations send a bare string; newer ones send parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentEntry>),
}

/// A content entry whose tag may or may not be known to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentEntry {
    Part(ContentPart),
    Unrecognized(UnrecognizedPart),
}

impl ContentEntry {
    pub fn text(text: impl Into<String>) -> Self {
        ContentEntry::Part(ContentPart::Text { text: text.into() })
    }
}

/// Content part with a known tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text {
        text: String,
    },
    Image {
        source: ImageSource,
    },
    File {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        media_type: Option<String>,
    },
    Audio {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        media_type: Option<String>,
    },
}

/// Where an image part's bytes live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageSource {
    Url {
        url: String,
    },
    Base64 {
        media_type: String,
        data: String,
    },
}

/// Content part whose tag this crate does not model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnrecognizedPart {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Origin of a reasoning record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningSource {
    /// Native reasoning produced by the underlying model.
    ReasonerModel,
    /// Reasoning produced by the agent loop around a non-reasoning model.
    NonReasonerModel,
}

/// Tool call payload. While streaming, each field may be absent on any fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCallDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolReturnStatus {
    Success,
    Error,
}

// ──────────────────────────────────────────────────────────
// Outbound
// ──────────────────────────────────────────────────────────

/// A turn sent to the agent service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageCreate {
    pub role: CreateRole,
    pub content: MessageCreateContent,
}

/// Roles the service accepts from the client side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreateRole {
    User,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageCreateContent {
    Text(String),
    Parts(Vec<TextContent>),
}

/// Text entry of an outbound parts array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: TextTag,
    pub text: String,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            kind: TextTag::Text,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTag {
    Text,
}
