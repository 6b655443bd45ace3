//! Prompt turns to agent-service create records.

use crate::error::AdapterError;
use crate::prompt::{PromptPart, PromptTurn, SystemContent};
use tether_provider::{CreateRole, MessageCreate, MessageCreateContent, TextContent};

/// Convert prompt turns into the records the message-create endpoint accepts.
///
/// Text parts map to text entries and tool parts are skipped. Any other part
/// type fails the whole call, as do assistant and tool turns.
pub fn to_message_creates(turns: &[PromptTurn]) -> Result<Vec<MessageCreate>, AdapterError> {
    turns.iter().map(convert_turn).collect()
}

fn convert_turn(turn: &PromptTurn) -> Result<MessageCreate, AdapterError> {
    match turn {
        PromptTurn::User { content } => Ok(MessageCreate {
            role: CreateRole::User,
            content: MessageCreateContent::Parts(text_entries(content)?),
        }),
        PromptTurn::System { content } => {
            let content = match content {
                SystemContent::Text(text) => MessageCreateContent::Text(text.clone()),
                SystemContent::Parts(parts) => MessageCreateContent::Parts(text_entries(parts)?),
            };
            Ok(MessageCreate {
                role: CreateRole::System,
                content,
            })
        }
        PromptTurn::Assistant { .. } => Err(AdapterError::AssistantRoleNotSupported),
        PromptTurn::Tool { .. } => Err(AdapterError::ToolRoleNotSupported),
    }
}

fn text_entries(parts: &[PromptPart]) -> Result<Vec<TextContent>, AdapterError> {
    let mut entries = Vec::with_capacity(parts.len());
    for part in parts {
        match part {
            PromptPart::Text { text } => entries.push(TextContent::new(text.clone())),
            other if other.is_tool_part() => continue,
            other => {
                return Err(AdapterError::UnsupportedContentType(
                    other.part_type().to_string(),
                ))
            }
        }
    }
    Ok(entries)
}
