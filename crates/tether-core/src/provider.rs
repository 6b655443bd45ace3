//! Provider factory: one configured client, many chat models.

use crate::chat::AgentChatModel;
use crate::error::AdapterError;
use std::convert::Infallible;
use std::sync::Arc;
use tether_provider::{AgentClient, ClientSettings, HttpAgentClient};
use tether_tools::{ToolRegistry, PREBUILT_TOOLS};

/// Model id used by [`AgentProvider::chat`].
pub const DEFAULT_MODEL_ID: &str = "agent";

/// Entry point for building chat models backed by the agent service.
#[derive(Clone)]
pub struct AgentProvider {
    client: Arc<dyn AgentClient>,
}

impl AgentProvider {
    /// Provider over the HTTP client. Environment variables fill unset settings.
    pub fn new(settings: ClientSettings) -> Result<Self, AdapterError> {
        let client = HttpAgentClient::new(settings.with_env())?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Provider for the hosted service.
    pub fn cloud() -> Result<Self, AdapterError> {
        Self::new(ClientSettings::cloud())
    }

    /// Provider for a self-hosted server on the default port.
    pub fn local() -> Result<Self, AdapterError> {
        Self::new(ClientSettings::local())
    }

    /// Provider over any client implementation.
    pub fn with_client(client: Arc<dyn AgentClient>) -> Self {
        Self { client }
    }

    /// Chat model that talks to one agent unless a call names another.
    pub fn chat(&self, agent_id: impl Into<String>) -> AgentChatModel {
        AgentChatModel::new(self.client.clone(), DEFAULT_MODEL_ID).with_default_agent(agent_id)
    }

    /// Chat model whose agent must come from each call's provider options.
    pub fn language_model(&self, model_id: impl Into<String>) -> AgentChatModel {
        AgentChatModel::new(self.client.clone(), model_id)
    }

    /// Embeddings are not offered by agents.
    pub fn text_embedding_model(&self, model_id: &str) -> Result<Infallible, AdapterError> {
        Err(AdapterError::Unsupported(format!(
            "text embedding model '{model_id}'"
        )))
    }

    /// The underlying client, for history and agent lifecycle calls.
    pub fn client(&self) -> Arc<dyn AgentClient> {
        self.client.clone()
    }

    /// Registry holding every prebuilt tool placeholder.
    pub fn tools(&self) -> Result<ToolRegistry, AdapterError> {
        let registry = ToolRegistry::with_prebuilt(PREBUILT_TOOLS.iter().map(|tool| tool.name))?;
        Ok(registry)
    }
}
