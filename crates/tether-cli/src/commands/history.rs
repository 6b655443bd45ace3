use tether_core::{to_ui_messages, AgentProvider, InboundOptions, UiMessage, UiPart};
use tether_provider::ListMessagesQuery;

/// Print the agent's history, grouped into framework messages.
pub async fn run(
    provider: &AgentProvider,
    agent_id: &str,
    limit: u32,
    json: bool,
) -> anyhow::Result<()> {
    let records = provider
        .client()
        .list_messages(
            agent_id,
            ListMessagesQuery {
                limit: Some(limit),
                ..Default::default()
            },
        )
        .await?;
    let messages = to_ui_messages(&records, &InboundOptions::default())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }
    if messages.is_empty() {
        println!("No messages found.");
    }
    for message in &messages {
        println!("{}", format_message(message));
    }
    Ok(())
}

fn format_message(message: &UiMessage) -> String {
    let body = message
        .parts
        .iter()
        .map(|part| match part {
            UiPart::Text { text } => text.clone(),
            UiPart::Reasoning { text, .. } => format!("(thinking) {text}"),
            UiPart::File { url, .. } => format!("[file {url}]"),
            UiPart::DynamicTool {
                tool_name,
                input,
                output,
                ..
            } => format!("[tool {tool_name} {input} -> {output}]"),
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("{} | {} | {}", message.id, message.role, body)
}
