//! Command implementations.

pub mod agents;
pub mod config;
pub mod generate;
pub mod history;
pub mod stream;
pub mod tools;

use std::sync::Arc;
use tether_core::{AgentProvider, Config, ENV_AGENT_ID};
use tether_provider::{ClientSettings, HttpAgentClient, LOCAL_BASE_URL};

/// Build the provider from saved config, environment, then command-line flags.
pub fn build_provider(
    base_url: Option<&str>,
    local: bool,
    config: &Config,
) -> anyhow::Result<AgentProvider> {
    let settings = resolve_settings(base_url, local, config);
    tracing::debug!(base_url = %settings.base_url, "using agent service");
    let client = HttpAgentClient::new(settings).map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(AgentProvider::with_client(Arc::new(client)))
}

fn resolve_settings(base_url: Option<&str>, local: bool, config: &Config) -> ClientSettings {
    let settings = config.client_settings().with_env();
    match (base_url, local) {
        (Some(url), _) => settings.with_base_url(url),
        (None, true) => settings.with_base_url(LOCAL_BASE_URL),
        (None, false) => settings,
    }
}

/// Agent from `--agent`, then `TETHER_AGENT_ID`, then the saved config.
pub fn resolve_agent(agent: Option<&str>, config: &Config) -> anyhow::Result<String> {
    agent
        .map(str::to_string)
        .or_else(|| std::env::var(ENV_AGENT_ID).ok().filter(|v| !v.is_empty()))
        .or_else(|| config.agent_id.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No agent selected. Pass --agent, set {ENV_AGENT_ID}, or run:\n  \
                 tether config set-agent <agent-id>"
            )
        })
}
