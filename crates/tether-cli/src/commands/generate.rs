//! Single-shot generate command.

use std::time::Instant;
use tether_core::{CallOptions, ContentBlock, LanguageModel, PromptTurn, ProviderOptions};

/// Send one prompt and print the complete response.
pub async fn run(
    provider: &tether_core::AgentProvider,
    agent_id: &str,
    prompt: &str,
    json: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let model = provider.chat(agent_id);
    let result = model
        .do_generate(CallOptions {
            prompt: vec![PromptTurn::user(prompt)],
            provider_options: ProviderOptions::for_agent(agent_id),
        })
        .await?;
    let elapsed_ms = started.elapsed().as_millis();

    if json {
        println!(
            "{}",
            serde_json::to_string(&serde_json::json!({
                "agent_id": agent_id,
                "content": result.content,
                "finish_reason": result.finish_reason,
                "usage": result.usage,
                "warnings": result.warnings,
                "elapsed_ms": elapsed_ms,
            }))?
        );
        return Ok(());
    }

    for line in render_side_channel(&result.content) {
        eprintln!("{line}");
    }
    let text = final_text(&result.content);
    if !text.is_empty() {
        println!("{text}");
    }
    Ok(())
}

fn final_text(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("")
}

/// Reasoning and tool activity, one line each, for stderr.
fn render_side_channel(blocks: &[ContentBlock]) -> Vec<String> {
    blocks
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Reasoning { text, .. } => Some(format!("[reasoning] {text}")),
            ContentBlock::ToolCall {
                tool_name, input, ..
            } => Some(format!("[tool call] {tool_name}({input})")),
            ContentBlock::ToolResult {
                tool_name,
                result,
                is_error,
                ..
            } => {
                let label = if *is_error { "tool error" } else { "tool result" };
                Some(format!("[{label}] {tool_name}: {result}"))
            }
            ContentBlock::File { url, media_type } => Some(format!("[file] {url} ({media_type})")),
            ContentBlock::Text { .. } => None,
        })
        .collect()
}
