//! Language-model contract backed by a remote agent.

use crate::assembler::assemble_stream;
use crate::convert::{to_content_blocks, to_message_creates, InboundOptions};
use crate::error::AdapterError;
use crate::event::{CallWarning, ContentBlock, FinishReason, StreamEvent, Usage};
use crate::prompt::PromptTurn;
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tether_provider::{
    AgentClient, MessageCreate, MessageCreateRequest, MessageStreamRequest, MessagesResponse,
};
use tracing::debug;

/// Name the adapter reports as its provider.
pub const PROVIDER_NAME: &str = "tether";

/// The agent a call is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRef {
    pub id: String,
}

/// Call-scoped options, as found under the provider's key in the framework's
/// provider-options object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderOptions {
    pub agent: Option<AgentRef>,
    /// Stream token-level fragments.
    pub stream_tokens: bool,
    /// Keep the agent running server-side if the stream is dropped.
    pub background: bool,
    pub max_steps: Option<u32>,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            agent: None,
            stream_tokens: true,
            background: false,
            max_steps: None,
        }
    }
}

impl ProviderOptions {
    /// Options addressed to the given agent.
    pub fn for_agent(id: impl Into<String>) -> Self {
        Self {
            agent: Some(AgentRef { id: id.into() }),
            ..Self::default()
        }
    }
}

/// Input of a generate or stream call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallOptions {
    pub prompt: Vec<PromptTurn>,
    #[serde(default)]
    pub provider_options: ProviderOptions,
}

/// Result of a non-streaming call.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub content: Vec<ContentBlock>,
    pub finish_reason: FinishReason,
    pub usage: Usage,
    pub warnings: Vec<CallWarning>,
    /// Raw service response.
    pub response: MessagesResponse,
}

/// Result of a streaming call. The stream starts with `stream-start`.
pub struct StreamResult {
    pub stream: BoxStream<'static, Result<StreamEvent, AdapterError>>,
    pub warnings: Vec<CallWarning>,
}

/// The framework's language-model capability contract.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Provider name (e.g., "tether").
    fn provider(&self) -> &str;

    /// Model identifier this instance was created with.
    fn model_id(&self) -> &str;

    /// Run the call to completion and return all content at once.
    async fn do_generate(&self, options: CallOptions) -> Result<GenerateResult, AdapterError>;

    /// Run the call and return content as a stream of protocol events.
    async fn do_stream(&self, options: CallOptions) -> Result<StreamResult, AdapterError>;
}

// Compile-time check: LanguageModel must be object-safe
const _: () = {
    fn _assert_object_safe(_: &dyn LanguageModel) {}
};

/// Language model whose responses come from an agent on the remote service.
///
/// The agent keeps the conversation, so only the newest prompt turn is sent.
/// Each call makes exactly one request and performs no retries.
#[derive(Clone)]
pub struct AgentChatModel {
    client: Arc<dyn AgentClient>,
    model_id: String,
    default_agent: Option<String>,
}

/// A validated call: target agent, records to send, warnings to report.
struct PreparedCall {
    agent_id: String,
    messages: Vec<MessageCreate>,
    warnings: Vec<CallWarning>,
}

impl AgentChatModel {
    pub fn new(client: Arc<dyn AgentClient>, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            default_agent: None,
        }
    }

    /// Use this agent when a call's options do not name one.
    pub fn with_default_agent(mut self, agent_id: impl Into<String>) -> Self {
        self.default_agent = Some(agent_id.into());
        self
    }

    pub fn default_agent(&self) -> Option<&str> {
        self.default_agent.as_deref()
    }

    fn prepare(&self, options: &CallOptions) -> Result<PreparedCall, AdapterError> {
        let agent_id = options
            .provider_options
            .agent
            .as_ref()
            .map(|agent| agent.id.clone())
            .or_else(|| self.default_agent.clone())
            .filter(|id| !id.is_empty())
            .ok_or(AdapterError::MissingAgentConfiguration)?;

        let (last, earlier) = options
            .prompt
            .split_last()
            .ok_or(AdapterError::EmptyPrompt)?;
        let messages = to_message_creates(std::slice::from_ref(last))?;

        let mut warnings = Vec::new();
        if !earlier.is_empty() {
            warnings.push(CallWarning::Other {
                message: format!(
                    "only the last prompt turn is sent; {} earlier turn(s) were not forwarded",
                    earlier.len()
                ),
            });
        }
        Ok(PreparedCall {
            agent_id,
            messages,
            warnings,
        })
    }
}

#[async_trait]
impl LanguageModel for AgentChatModel {
    fn provider(&self) -> &str {
        PROVIDER_NAME
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn do_generate(&self, options: CallOptions) -> Result<GenerateResult, AdapterError> {
        let call = self.prepare(&options)?;
        debug!(agent_id = %call.agent_id, "creating messages");

        let request = MessageCreateRequest {
            messages: call.messages,
            max_steps: options.provider_options.max_steps,
        };
        let response = self.client.create_messages(&call.agent_id, request).await?;
        let content = to_content_blocks(&response.messages, &InboundOptions::responses())?;

        Ok(GenerateResult {
            content,
            finish_reason: FinishReason::Stop,
            usage: Usage::unknown(),
            warnings: call.warnings,
            response,
        })
    }

    async fn do_stream(&self, options: CallOptions) -> Result<StreamResult, AdapterError> {
        let call = self.prepare(&options)?;
        debug!(
            agent_id = %call.agent_id,
            stream_tokens = options.provider_options.stream_tokens,
            "opening message stream"
        );

        let request = MessageStreamRequest {
            messages: call.messages,
            stream_tokens: options.provider_options.stream_tokens,
            background: options.provider_options.background,
            max_steps: options.provider_options.max_steps,
        };
        let upstream = self
            .client
            .create_message_stream(&call.agent_id, request)
            .await?;

        let start = StreamEvent::StreamStart {
            warnings: call.warnings.clone(),
        };
        let stream = stream::once(async move { Ok(start) })
            .chain(assemble_stream(upstream))
            .boxed();

        Ok(StreamResult {
            stream,
            warnings: call.warnings,
        })
    }
}
