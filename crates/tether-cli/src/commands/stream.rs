//! Streaming command: prints protocol events as they arrive.

use futures::StreamExt;
use std::io::Write;
use tether_core::{
    AgentProvider, CallOptions, LanguageModel, PromptTurn, ProviderOptions, StreamEvent,
};

/// Streaming options taken from the command line.
#[derive(Debug, Clone)]
pub struct StreamOptions {
    pub json: bool,
    pub stream_tokens: bool,
    pub max_steps: Option<u32>,
}

pub async fn run(
    provider: &AgentProvider,
    agent_id: &str,
    prompt: &str,
    options: StreamOptions,
) -> anyhow::Result<()> {
    let model = provider.chat(agent_id);
    let provider_options = ProviderOptions {
        stream_tokens: options.stream_tokens,
        max_steps: options.max_steps,
        ..ProviderOptions::for_agent(agent_id)
    };
    let mut result = model
        .do_stream(CallOptions {
            prompt: vec![PromptTurn::user(prompt)],
            provider_options,
        })
        .await?;

    let mut stdout = std::io::stdout();
    while let Some(event) = result.stream.next().await {
        let event = event?;
        if options.json {
            println!("{}", serde_json::to_string(&event)?);
            continue;
        }
        render_event(&event, &mut stdout)?;
    }
    Ok(())
}

/// Human rendering: text to stdout, everything else to stderr.
fn render_event(event: &StreamEvent, out: &mut impl Write) -> anyhow::Result<()> {
    match event {
        StreamEvent::TextDelta { delta, .. } => {
            write!(out, "{delta}")?;
            out.flush()?;
        }
        StreamEvent::TextEnd { .. } => writeln!(out)?,
        StreamEvent::ReasoningDelta { delta, .. } => eprint!("{delta}"),
        StreamEvent::ReasoningEnd { .. } => eprintln!(),
        StreamEvent::ToolCall {
            tool_name, input, ..
        } => eprintln!("[tool call] {tool_name}({input})"),
        StreamEvent::StreamStart { warnings } => {
            for warning in warnings {
                let tether_core::CallWarning::Other { message } = warning;
                eprintln!("warning: {message}");
            }
        }
        StreamEvent::TextStart { .. }
        | StreamEvent::ReasoningStart { .. }
        | StreamEvent::Finish { .. } => {}
    }
    Ok(())
}
