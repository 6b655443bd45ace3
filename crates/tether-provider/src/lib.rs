//! tether-provider: wire records and client for the remote agent service.

mod client;
mod error;
pub mod record;
pub mod traits;
pub mod types;

pub use client::{
    decode_stream_frame, ClientSettings, HttpAgentClient, CLOUD_BASE_URL, ENV_API_KEY,
    ENV_BASE_URL, ENV_PROJECT, ENV_TEMPLATE, LOCAL_BASE_URL,
};
pub use error::ProviderError;
pub use record::{
    AgentMessage, ContentEntry, ContentPart, CreateRole, ImageSource, MessageContent,
    MessageCreate, MessageCreateContent, MessageType, ReasoningSource, RecordMeta, TextContent,
    ToolCallDelta, ToolReturnStatus, UnrecognizedPart,
};
pub use traits::{AgentClient, RecordStream};
pub use types::{
    AgentState, CreateAgentRequest, ListAgentsQuery, ListMessagesQuery, MessageCreateRequest,
    MessageStreamRequest, MessagesResponse,
};
