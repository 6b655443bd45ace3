//! CLI argument and command definitions.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tether", version, about = "Talk to a remote agent through the chat adapter")]
pub struct Cli {
    /// Agent service base URL (overrides config and TETHER_BASE_URL).
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Use a self-hosted server on the default local port.
    #[arg(long, global = true, conflicts_with = "base_url")]
    pub local: bool,

    /// Agent to address (defaults to TETHER_AGENT_ID or the configured agent).
    #[arg(long, global = true)]
    pub agent: Option<String>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a prompt and print the complete response.
    Generate {
        /// The prompt to send.
        prompt: String,

        /// Print the result as a single JSON object.
        #[arg(long)]
        json: bool,
    },

    /// Send a prompt and print the response as it streams.
    Stream {
        /// The prompt to send.
        prompt: String,

        /// Print each stream event as a JSON line.
        #[arg(long)]
        json: bool,

        /// Ask for whole records instead of token-level fragments.
        #[arg(long)]
        no_tokens: bool,

        /// Cap on agent steps.
        #[arg(long)]
        max_steps: Option<u32>,
    },

    /// Show the agent's message history.
    History {
        /// Maximum number of records to fetch.
        #[arg(short, long, default_value = "20")]
        limit: u32,

        /// Print messages as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Manage agents.
    Agents {
        #[command(subcommand)]
        action: AgentsAction,
    },

    /// List prebuilt tool placeholders, or show one.
    Tools {
        /// Tool name to show.
        name: Option<String>,
    },

    /// Show or edit ~/.tether/config.json.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum AgentsAction {
    /// List agents.
    List {
        /// Only agents with this name.
        #[arg(long)]
        name: Option<String>,
    },
    /// Create an agent.
    Create {
        /// Agent name.
        name: String,

        /// Model handle, e.g. "openai/gpt-4o-mini".
        #[arg(long)]
        model: Option<String>,

        /// Embedding handle, e.g. "openai/text-embedding-3-small".
        #[arg(long)]
        embedding: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an agent.
    Delete {
        /// Agent ID to delete.
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the saved configuration (the API key is masked).
    Show,
    /// Save the API key.
    SetKey {
        key: String,
    },
    /// Save the default agent.
    SetAgent {
        id: String,
    },
    /// Save the base URL.
    SetBaseUrl {
        url: String,
    },
}
