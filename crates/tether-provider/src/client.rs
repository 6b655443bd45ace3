//! HTTP client for the agent service.
//!
//! Batch calls are plain JSON request/response. The streaming create call is
//! consumed as server-sent events, one record per `data:` frame, terminated by
//! `[DONE]` or by the server closing the connection.

use crate::error::ProviderError;
use crate::record::AgentMessage;
use crate::traits::{AgentClient, RecordStream};
use crate::types::{
    AgentState, CreateAgentRequest, ListAgentsQuery, ListMessagesQuery, MessageCreateRequest,
    MessageStreamRequest, MessagesResponse,
};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::{Client, Method, RequestBuilder, Response};
use reqwest_eventsource::{retry, Event, EventSource};
use serde_json::Value;
use tracing::{debug, trace};

/// Hosted service endpoint.
pub const CLOUD_BASE_URL: &str = "https://api.letta.com";
/// Default endpoint of a self-hosted server.
pub const LOCAL_BASE_URL: &str = "http://localhost:8283";

pub const ENV_API_KEY: &str = "TETHER_API_KEY";
pub const ENV_BASE_URL: &str = "TETHER_BASE_URL";
pub const ENV_PROJECT: &str = "TETHER_PROJECT";
pub const ENV_TEMPLATE: &str = "TETHER_TEMPLATE";

/// Stream frames that carry bookkeeping rather than conversation records.
const CONTROL_FRAMES: &[&str] = &["usage_statistics", "stop_reason", "ping"];

/// Connection settings for [`HttpAgentClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub base_url: String,
    pub token: Option<String>,
    /// Project the calls are scoped to (sent as `X-Project`).
    pub project: Option<String>,
    /// Template used by glue code when it creates agents.
    pub template: Option<String>,
}

impl ClientSettings {
    /// Settings for the hosted service.
    pub fn cloud() -> Self {
        Self {
            base_url: CLOUD_BASE_URL.to_string(),
            token: None,
            project: None,
            template: None,
        }
    }

    /// Settings for a self-hosted server on the default port.
    pub fn local() -> Self {
        Self {
            base_url: LOCAL_BASE_URL.to_string(),
            ..Self::cloud()
        }
    }

    /// Fill unset fields from the environment. The base URL is replaced when
    /// an override is present.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.is_empty() {
                self.base_url = url;
            }
        }
        self.token = self.token.or_else(|| non_empty_env(ENV_API_KEY));
        self.project = self.project.or_else(|| non_empty_env(ENV_PROJECT));
        self.template = self.template.or_else(|| non_empty_env(ENV_TEMPLATE));
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::cloud()
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Agent service client speaking the REST + SSE protocol.
pub struct HttpAgentClient {
    settings: ClientSettings,
    client: Client,
}

impl HttpAgentClient {
    /// Create a new client.
    pub fn new(settings: ClientSettings) -> Result<Self, ProviderError> {
        if reqwest::Url::parse(&settings.base_url).is_err() {
            return Err(ProviderError::InvalidSettings(format!(
                "invalid base URL: {}",
                settings.base_url
            )));
        }
        Ok(Self {
            settings,
            client: Client::new(),
        })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(ref token) = self.settings.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(ref project) = self.settings.project {
            builder = builder.header("X-Project", project);
        }
        builder
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ProviderError> {
        let response = builder.send().await.map_err(ProviderError::Http)?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ProviderError::ApiError { status, body });
        }
        Ok(response)
    }
}

/// Decode one SSE data frame. Control frames yield `None`.
pub fn decode_stream_frame(data: &str) -> Result<Option<AgentMessage>, ProviderError> {
    let value: Value = serde_json::from_str(data)
        .map_err(|e| ProviderError::Decode(format!("invalid stream frame: {e}")))?;

    if let Some(kind) = value.get("message_type").and_then(Value::as_str) {
        if CONTROL_FRAMES.contains(&kind) {
            trace!(kind, "skipping control frame");
            return Ok(None);
        }
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| ProviderError::Decode(format!("unrecognized record: {e}")))
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn create_messages(
        &self,
        agent_id: &str,
        request: MessageCreateRequest,
    ) -> Result<MessagesResponse, ProviderError> {
        debug!(agent_id, turns = request.messages.len(), "creating messages");
        let path = format!("/v1/agents/{agent_id}/messages");
        let response = Self::send(self.request(Method::POST, &path).json(&request)).await?;
        response.json().await.map_err(ProviderError::Http)
    }

    async fn create_message_stream(
        &self,
        agent_id: &str,
        request: MessageStreamRequest,
    ) -> Result<RecordStream, ProviderError> {
        debug!(
            agent_id,
            turns = request.messages.len(),
            stream_tokens = request.stream_tokens,
            "opening message stream"
        );
        let path = format!("/v1/agents/{agent_id}/messages/stream");
        let builder = self.request(Method::POST, &path).json(&request);

        let mut source = EventSource::new(builder)
            .map_err(|e| ProviderError::StreamError(format!("cannot open stream: {e}")))?;
        source.set_retry_policy(Box::new(retry::Never));

        let records = stream::unfold(Some(source), |state| async move {
            let mut source = state?;
            loop {
                match source.next().await {
                    Some(Ok(Event::Open)) => continue,
                    Some(Ok(Event::Message(message))) => {
                        if message.data.trim() == "[DONE]" {
                            source.close();
                            return None;
                        }
                        match decode_stream_frame(&message.data) {
                            Ok(Some(record)) => return Some((Ok(record), Some(source))),
                            Ok(None) => continue,
                            Err(e) => {
                                source.close();
                                return Some((Err(e), None));
                            }
                        }
                    }
                    Some(Err(reqwest_eventsource::Error::StreamEnded)) | None => return None,
                    Some(Err(e)) => {
                        source.close();
                        return Some((Err(ProviderError::from(e)), None));
                    }
                }
            }
        });

        Ok(records.boxed())
    }

    async fn list_messages(
        &self,
        agent_id: &str,
        query: ListMessagesQuery,
    ) -> Result<Vec<AgentMessage>, ProviderError> {
        let path = format!("/v1/agents/{agent_id}/messages");
        let response = Self::send(self.request(Method::GET, &path).query(&query)).await?;
        response.json().await.map_err(ProviderError::Http)
    }

    async fn create_agent(&self, request: CreateAgentRequest) -> Result<AgentState, ProviderError> {
        debug!(name = %request.name, "creating agent");
        let response = Self::send(self.request(Method::POST, "/v1/agents").json(&request)).await?;
        response.json().await.map_err(ProviderError::Http)
    }

    async fn retrieve_agent(&self, agent_id: &str) -> Result<AgentState, ProviderError> {
        let path = format!("/v1/agents/{agent_id}");
        let response = Self::send(self.request(Method::GET, &path)).await?;
        response.json().await.map_err(ProviderError::Http)
    }

    async fn list_agents(&self, query: ListAgentsQuery) -> Result<Vec<AgentState>, ProviderError> {
        let response = Self::send(self.request(Method::GET, "/v1/agents").query(&query)).await?;
        response.json().await.map_err(ProviderError::Http)
    }

    async fn delete_agent(&self, agent_id: &str) -> Result<(), ProviderError> {
        debug!(agent_id, "deleting agent");
        let path = format!("/v1/agents/{agent_id}");
        Self::send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}
