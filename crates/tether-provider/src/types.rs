//! Request and response bodies for the agent service API.

use crate::record::{AgentMessage, MessageCreate};
use serde::{Deserialize, Serialize};

/// Body of the synchronous message-create call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCreateRequest {
    /// Turns to append to the agent's conversation.
    pub messages: Vec<MessageCreate>,
    /// Cap on agent steps for this call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<u32>,
}

/// Body of the streaming message-create call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageStreamRequest {
    /// Turns to append to the agent's conversation.
    pub messages: Vec<MessageCreate>,
    /// Stream token-level fragments instead of whole records.
    #[serde(default)]
    pub stream_tokens: bool,
    /// Let the agent keep running server-side if the client disconnects.
    #[serde(default)]
    pub background: bool,
    /// Cap on agent steps for this call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<u32>,
}

/// Response of the synchronous message-create call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<AgentMessage>,
    /// Usage as reported by the service, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<serde_json::Value>,
}

/// Query for message history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListMessagesQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

/// Body for agent creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAgentRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Model handle, e.g. "openai/gpt-4o-mini".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Embedding handle, e.g. "openai/text-embedding-3-small".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Query for agent listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAgentsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Agent summary returned by the lifecycle endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}
