//! tether-core: chat-framework adapter over a remote agent service.

pub mod assembler;
pub mod chat;
pub mod config;
pub mod convert;
mod error;
pub mod event;
pub mod message;
pub mod prompt;
pub mod provider;

pub use assembler::{assemble_stream, AssembledStream, StreamAssembler};
pub use chat::{
    AgentChatModel, AgentRef, CallOptions, GenerateResult, LanguageModel, ProviderOptions,
    StreamResult, PROVIDER_NAME,
};
pub use config::{Config, ConfigStore, ENV_AGENT_ID};
pub use convert::{to_content_blocks, to_message_creates, to_ui_messages, InboundOptions};
pub use error::AdapterError;
pub use event::{
    CallWarning, ContentBlock, FinishReason, ReasoningMetadata, ReasoningOrigin, StreamEvent,
    Usage,
};
pub use message::{ToolState, UiMessage, UiPart, UiRole};
pub use prompt::{PromptPart, PromptTurn, SystemContent};
pub use provider::{AgentProvider, DEFAULT_MODEL_ID};
