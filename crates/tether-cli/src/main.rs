//! tether: drive a remote agent through the chat-framework adapter.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_store = tether_core::ConfigStore::new();
    config_store.hydrate_env();
    let config = config_store.load();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("tether=debug,tether_core=debug,tether_provider=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Config { action } => commands::config::run(&config_store, action)?,
        Commands::Tools { ref name } => {
            let provider = commands::build_provider(cli.base_url.as_deref(), cli.local, &config)?;
            commands::tools::run(&provider.tools()?, name.as_deref())?;
        }
        Commands::Agents { action } => {
            let provider = commands::build_provider(cli.base_url.as_deref(), cli.local, &config)?;
            commands::agents::run(&provider, action).await?;
        }
        Commands::Generate { ref prompt, json } => {
            let provider = commands::build_provider(cli.base_url.as_deref(), cli.local, &config)?;
            let agent_id = commands::resolve_agent(cli.agent.as_deref(), &config)?;
            commands::generate::run(&provider, &agent_id, prompt, json).await?;
        }
        Commands::Stream {
            ref prompt,
            json,
            no_tokens,
            max_steps,
        } => {
            let provider = commands::build_provider(cli.base_url.as_deref(), cli.local, &config)?;
            let agent_id = commands::resolve_agent(cli.agent.as_deref(), &config)?;
            let options = commands::stream::StreamOptions {
                json,
                stream_tokens: !no_tokens,
                max_steps,
            };
            commands::stream::run(&provider, &agent_id, prompt, options).await?;
        }
        Commands::History { limit, json } => {
            let provider = commands::build_provider(cli.base_url.as_deref(), cli.local, &config)?;
            let agent_id = commands::resolve_agent(cli.agent.as_deref(), &config)?;
            commands::history::run(&provider, &agent_id, limit, json).await?;
        }
    }

    Ok(())
}
