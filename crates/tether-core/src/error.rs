//! Error types for the tether-core crate.

use tether_provider::ProviderError;
use tether_tools::ToolError;

/// Errors raised while adapting between the chat framework and the agent service.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// A content part has a type the converters do not handle.
    #[error("Content type {0} not supported")]
    UnsupportedContentType(String),

    /// Assistant turns are owned by the remote agent.
    #[error("Assistant role is not supported for user input")]
    AssistantRoleNotSupported,

    /// Tool results are tracked by the remote agent.
    #[error("Tool role is not supported")]
    ToolRoleNotSupported,

    /// No agent id was given in the call's provider options.
    #[error("Missing agent id: set providerOptions.agent.id")]
    MissingAgentConfiguration,

    #[error("Prompt contains no turns")]
    EmptyPrompt,

    /// The capability is not offered by this provider.
    #[error("{0} is not supported by the agent provider")]
    Unsupported(String),

    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Transport or protocol failure from the agent service, passed through unchanged.
    #[error(transparent)]
    Upstream(#[from] ProviderError),
}
