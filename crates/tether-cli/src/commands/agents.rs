use crate::cli::AgentsAction;
use tether_core::AgentProvider;
use tether_provider::{CreateAgentRequest, ListAgentsQuery};

/// Agent lifecycle commands.
pub async fn run(provider: &AgentProvider, action: AgentsAction) -> anyhow::Result<()> {
    let client = provider.client();
    match action {
        AgentsAction::List { name } => {
            let agents = client
                .list_agents(ListAgentsQuery {
                    name,
                    ..Default::default()
                })
                .await?;
            if agents.is_empty() {
                println!("No agents found.");
            }
            for agent in &agents {
                println!(
                    "{} | {} | {}",
                    agent.id,
                    agent.name,
                    agent.model.as_deref().unwrap_or("-")
                );
            }
        }
        AgentsAction::Create {
            name,
            model,
            embedding,
            description,
        } => {
            let agent = client
                .create_agent(CreateAgentRequest {
                    name,
                    description,
                    model,
                    embedding,
                    project_id: None,
                })
                .await?;
            println!("Created agent {} ({})", agent.id, agent.name);
        }
        AgentsAction::Delete { id } => {
            client.delete_agent(&id).await?;
            println!("Deleted agent {id}");
        }
    }
    Ok(())
}
