//! Agent service client trait definition.

use crate::error::ProviderError;
use crate::record::AgentMessage;
use crate::types::{
    AgentState, CreateAgentRequest, ListAgentsQuery, ListMessagesQuery, MessageCreateRequest,
    MessageStreamRequest, MessagesResponse,
};
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Stream of records pushed by the service for one streaming call.
pub type RecordStream = BoxStream<'static, Result<AgentMessage, ProviderError>>;

/// Trait for clients of the remote agent service.
///
/// The service owns agent state, memory and tool execution. Clients only send
/// turns and read back the records the agent produced.
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Send turns and wait for the full batch of resulting records.
    async fn create_messages(
        &self,
        agent_id: &str,
        request: MessageCreateRequest,
    ) -> Result<MessagesResponse, ProviderError>;

    /// Send turns and receive resulting records as they are produced.
    ///
    /// The returned stream ends when the service closes it.
    async fn create_message_stream(
        &self,
        agent_id: &str,
        request: MessageStreamRequest,
    ) -> Result<RecordStream, ProviderError>;

    /// Read the agent's message history.
    async fn list_messages(
        &self,
        agent_id: &str,
        query: ListMessagesQuery,
    ) -> Result<Vec<AgentMessage>, ProviderError>;

    async fn create_agent(&self, request: CreateAgentRequest) -> Result<AgentState, ProviderError>;

    async fn retrieve_agent(&self, agent_id: &str) -> Result<AgentState, ProviderError>;

    async fn list_agents(&self, query: ListAgentsQuery) -> Result<Vec<AgentState>, ProviderError>;

    async fn delete_agent(&self, agent_id: &str) -> Result<(), ProviderError>;
}

// Compile-time check: AgentClient must be object-safe
const _: () = {
    fn _assert_object_safe(_: &dyn AgentClient) {}
};
