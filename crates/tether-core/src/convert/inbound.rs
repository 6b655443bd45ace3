//! Agent-service records to framework messages.

use crate::error::AdapterError;
use crate::event::{ContentBlock, ReasoningMetadata};
use crate::message::{ToolState, UiMessage, UiPart, UiRole};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use tether_provider::{
    AgentMessage, ContentEntry, ContentPart, ImageSource, MessageContent, MessageType,
    ToolCallDelta, ToolReturnStatus,
};

/// Which record types the inbound converter keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundOptions {
    allow: HashSet<MessageType>,
}

impl Default for InboundOptions {
    /// Allow every record type.
    fn default() -> Self {
        Self::only(MessageType::ALL)
    }
}

impl InboundOptions {
    /// Allow only the given record types.
    pub fn only(types: impl IntoIterator<Item = MessageType>) -> Self {
        Self {
            allow: types.into_iter().collect(),
        }
    }

    /// Agent-authored records only: no user or system echoes.
    pub fn responses() -> Self {
        Self::only([
            MessageType::AssistantMessage,
            MessageType::ReasoningMessage,
            MessageType::ToolCallMessage,
            MessageType::ToolReturnMessage,
        ])
    }

    pub fn allows(&self, message_type: MessageType) -> bool {
        self.allow.contains(&message_type)
    }
}

/// Messages keyed by correlation id, in order of first appearance.
#[derive(Default)]
struct OrderedMessages {
    slots: Vec<UiMessage>,
    index: HashMap<String, usize>,
}

impl OrderedMessages {
    fn entry(&mut self, id: &str) -> &mut UiMessage {
        let slot = match self.index.get(id) {
            Some(&slot) => slot,
            None => {
                self.slots.push(UiMessage::new(id));
                self.index.insert(id.to_string(), self.slots.len() - 1);
                self.slots.len() - 1
            }
        };
        &mut self.slots[slot]
    }

    fn into_vec(self) -> Vec<UiMessage> {
        self.slots
    }
}

/// Convert fully received records into framework messages.
///
/// Records sharing an id merge into one message. Parts keep arrival order and
/// the role comes from the last record for that id. An unsupported content
/// part aborts the whole conversion.
pub fn to_ui_messages(
    records: &[AgentMessage],
    options: &InboundOptions,
) -> Result<Vec<UiMessage>, AdapterError> {
    let mut messages = OrderedMessages::default();
    for record in records {
        if !options.allows(record.message_type()) {
            continue;
        }
        let (role, parts) = record_parts(record)?;
        let message = messages.entry(record.id());
        message.role = role;
        message.parts.extend(parts);
    }
    Ok(messages.into_vec())
}

/// Flatten records straight into generate-result content blocks.
pub fn to_content_blocks(
    records: &[AgentMessage],
    options: &InboundOptions,
) -> Result<Vec<ContentBlock>, AdapterError> {
    let mut blocks = Vec::new();
    for record in records {
        if !options.allows(record.message_type()) {
            continue;
        }
        match record {
            AgentMessage::ToolCallMessage { id, tool_call, .. } => {
                blocks.push(ContentBlock::ToolCall {
                    tool_call_id: tool_call_id(id, tool_call),
                    tool_name: tool_call.name.clone().unwrap_or_default(),
                    input: tool_call
                        .arguments
                        .clone()
                        .unwrap_or_else(|| "{}".to_string()),
                });
            }
            other => {
                let (_, parts) = record_parts(other)?;
                blocks.extend(parts.into_iter().map(ContentBlock::from));
            }
        }
    }
    Ok(blocks)
}

impl From<UiPart> for ContentBlock {
    fn from(part: UiPart) -> Self {
        match part {
            UiPart::Text { text } => ContentBlock::Text { text },
            UiPart::Reasoning { text, source } => ContentBlock::Reasoning {
                text,
                metadata: ReasoningMetadata::from_source(source),
            },
            UiPart::File { url, media_type } => ContentBlock::File { url, media_type },
            UiPart::DynamicTool {
                tool_call_id,
                tool_name,
                state,
                output,
                ..
            } => ContentBlock::ToolResult {
                tool_call_id,
                tool_name,
                result: output,
                is_error: state == ToolState::OutputError,
            },
        }
    }
}

fn record_parts(record: &AgentMessage) -> Result<(UiRole, Vec<UiPart>), AdapterError> {
    match record {
        AgentMessage::SystemMessage { content, .. } => Ok((
            UiRole::System,
            vec![UiPart::Text {
                text: content.clone(),
            }],
        )),
        AgentMessage::UserMessage { content, .. } => Ok((UiRole::User, content_parts(content)?)),
        AgentMessage::AssistantMessage { content, .. } => {
            Ok((UiRole::Assistant, content_parts(content)?))
        }
        AgentMessage::ReasoningMessage {
            reasoning, source, ..
        } => Ok((
            UiRole::Assistant,
            vec![UiPart::Reasoning {
                text: reasoning.clone(),
                source: *source,
            }],
        )),
        AgentMessage::ToolCallMessage { id, tool_call, .. } => Ok((
            UiRole::Assistant,
            vec![UiPart::DynamicTool {
                tool_call_id: tool_call_id(id, tool_call),
                tool_name: tool_call.name.clone().unwrap_or_default(),
                state: ToolState::OutputAvailable,
                input: arguments_value(tool_call.arguments.as_deref()),
                output: Value::String(String::new()),
                error_text: None,
            }],
        )),
        AgentMessage::ToolReturnMessage {
            tool_call_id,
            name,
            tool_return,
            status,
            ..
        } => {
            let failed = *status == ToolReturnStatus::Error;
            Ok((
                UiRole::Assistant,
                vec![UiPart::DynamicTool {
                    tool_call_id: tool_call_id.clone(),
                    tool_name: name.clone().unwrap_or_default(),
                    state: if failed {
                        ToolState::OutputError
                    } else {
                        ToolState::OutputAvailable
                    },
                    input: json!({}),
                    output: Value::String(tool_return.clone()),
                    error_text: failed.then(|| tool_return.clone()),
                }],
            ))
        }
    }
}

fn content_parts(content: &MessageContent) -> Result<Vec<UiPart>, AdapterError> {
    match content {
        MessageContent::Text(text) => Ok(vec![UiPart::Text { text: text.clone() }]),
        MessageContent::Parts(entries) => entries.iter().map(entry_part).collect(),
    }
}

fn entry_part(entry: &ContentEntry) -> Result<UiPart, AdapterError> {
    let part = match entry {
        ContentEntry::Unrecognized(unknown) => {
            return Err(AdapterError::UnsupportedContentType(unknown.kind.clone()))
        }
        ContentEntry::Part(part) => part,
    };
    Ok(match part {
        ContentPart::Text { text } => UiPart::Text { text: text.clone() },
        ContentPart::Image {
            source: ImageSource::Url { url },
        } => UiPart::File {
            url: url.clone(),
            media_type: "image/*".to_string(),
        },
        ContentPart::Image {
            source: ImageSource::Base64 { media_type, data },
        } => UiPart::File {
            url: format!("data:{media_type};base64,{data}"),
            media_type: media_type.clone(),
        },
        ContentPart::File { url, media_type } => UiPart::File {
            url: url.clone(),
            media_type: media_type
                .clone()
                .unwrap_or_else(|| "application/octet-stream".to_string()),
        },
        ContentPart::Audio { url, media_type } => UiPart::File {
            url: url.clone(),
            media_type: media_type.clone().unwrap_or_else(|| "audio/*".to_string()),
        },
    })
}

fn tool_call_id(record_id: &str, call: &ToolCallDelta) -> String {
    call.tool_call_id
        .clone()
        .unwrap_or_else(|| record_id.to_string())
}

/// Arguments that parse as JSON become structured; others stay a JSON string.
fn arguments_value(arguments: Option<&str>) -> Value {
    match arguments {
        None => json!({}),
        Some(raw) => {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::to_message_creates;
    use crate::prompt::{PromptPart, PromptTurn};
    use tether_provider::{
        MessageCreateContent, ReasoningSource, RecordMeta, UnrecognizedPart,
    };

    fn tool_return(id: &str, call_id: &str, status: ToolReturnStatus) -> AgentMessage {
        AgentMessage::ToolReturnMessage {
            id: id.to_string(),
            tool_call_id: call_id.to_string(),
            name: Some("search".to_string()),
            tool_return: "no results".to_string(),
            status,
            stdout: None,
            stderr: None,
            date: None,
            meta: RecordMeta::default(),
        }
    }

    #[test]
    fn test_user_message_scenario() {
        let messages =
            to_ui_messages(&[AgentMessage::user("1", "Hello")], &InboundOptions::default())
                .unwrap();
        assert_eq!(
            messages,
            vec![UiMessage {
                id: "1".to_string(),
                role: UiRole::User,
                parts: vec![UiPart::Text {
                    text: "Hello".to_string()
                }],
            }]
        );
    }

    #[test]
    fn test_tool_call_scenario() {
        let record = AgentMessage::tool_call(
            "2",
            ToolCallDelta {
                tool_call_id: Some("t1".to_string()),
                name: Some("search".to_string()),
                arguments: Some("{}".to_string()),
            },
        );
        let messages = to_ui_messages(&[record], &InboundOptions::default()).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, UiRole::Assistant);
        match &messages[0].parts[..] {
            [UiPart::DynamicTool {
                tool_call_id,
                tool_name,
                state,
                input,
                ..
            }] => {
                assert_eq!(tool_call_id, "t1");
                assert_eq!(tool_name, "search");
                assert_eq!(*state, ToolState::OutputAvailable);
                assert_eq!(*input, json!({}));
            }
            other => panic!("Expected one tool part, got: {other:?}"),
        }
    }

    #[test]
    fn test_role_precedence_keeps_part_order() {
        let records = vec![
            AgentMessage::reasoning("X", "Thinking", None),
            AgentMessage::user("X", "Hi"),
        ];
        let messages = to_ui_messages(&records, &InboundOptions::default()).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, UiRole::User);
        assert!(matches!(messages[0].parts[0], UiPart::Reasoning { .. }));
        assert!(matches!(messages[0].parts[1], UiPart::Text { .. }));
    }

    #[test]
    fn test_grouping_by_id_in_first_seen_order() {
        let records = vec![
            AgentMessage::assistant("b", "one"),
            AgentMessage::reasoning("a", "hmm", Some(ReasoningSource::ReasonerModel)),
            AgentMessage::assistant("b", "two"),
            AgentMessage::user("c", "three"),
            AgentMessage::assistant("a", "four"),
        ];
        let messages = to_ui_messages(&records, &InboundOptions::default()).unwrap();
        let ids: Vec<&str> = messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(messages[0].text(), "onetwo");
        assert_eq!(messages[1].parts.len(), 2);
    }

    #[test]
    fn test_allow_set_skips_records() {
        let records = vec![
            AgentMessage::user("u", "question"),
            AgentMessage::assistant("a", "answer"),
            AgentMessage::SystemMessage {
                id: "s".to_string(),
                content: "rules".to_string(),
                date: None,
                meta: RecordMeta::default(),
            },
        ];
        let all = to_ui_messages(&records, &InboundOptions::default()).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].role, UiRole::System);

        let responses = to_ui_messages(&records, &InboundOptions::responses()).unwrap();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].id, "a");
    }

    #[test]
    fn test_tool_return_status() {
        let records = vec![
            tool_return("r1", "t1", ToolReturnStatus::Success),
            tool_return("r2", "t2", ToolReturnStatus::Error),
        ];
        let messages = to_ui_messages(&records, &InboundOptions::default()).unwrap();
        match &messages[1].parts[0] {
            UiPart::DynamicTool {
                state, error_text, ..
            } => {
                assert_eq!(*state, ToolState::OutputError);
                assert_eq!(error_text.as_deref(), Some("no results"));
            }
            other => panic!("Expected tool part, got: {other:?}"),
        }
        match &messages[0].parts[0] {
            UiPart::DynamicTool {
                state, error_text, ..
            } => {
                assert_eq!(*state, ToolState::OutputAvailable);
                assert!(error_text.is_none());
            }
            other => panic!("Expected tool part, got: {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_arguments_stay_text() {
        let record = AgentMessage::tool_call(
            "x",
            ToolCallDelta {
                tool_call_id: None,
                name: Some("run".to_string()),
                arguments: Some("{\"a\":".to_string()),
            },
        );
        let messages = to_ui_messages(&[record], &InboundOptions::default()).unwrap();
        match &messages[0].parts[0] {
            UiPart::DynamicTool {
                tool_call_id,
                input,
                ..
            } => {
                assert_eq!(tool_call_id, "x");
                assert_eq!(*input, Value::String("{\"a\":".to_string()));
            }
            other => panic!("Expected tool part, got: {other:?}"),
        }
    }

    #[test]
    fn test_media_parts_map_to_files() {
        let record = AgentMessage::UserMessage {
            id: "m".to_string(),
            content: MessageContent::Parts(vec![
                ContentEntry::text("look"),
                ContentEntry::Part(ContentPart::Image {
                    source: ImageSource::Base64 {
                        media_type: "image/png".to_string(),
                        data: "AAAA".to_string(),
                    },
                }),
                ContentEntry::Part(ContentPart::Audio {
                    url: "https://x/a.mp3".to_string(),
                    media_type: None,
                }),
            ]),
            date: None,
            meta: RecordMeta::default(),
        };
        let messages = to_ui_messages(&[record], &InboundOptions::default()).unwrap();
        assert_eq!(
            messages[0].parts[1],
            UiPart::File {
                url: "data:image/png;base64,AAAA".to_string(),
                media_type: "image/png".to_string(),
            }
        );
        assert_eq!(
            messages[0].parts[2],
            UiPart::File {
                url: "https://x/a.mp3".to_string(),
                media_type: "audio/*".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_part_aborts_conversion() {
        let records = vec![
            AgentMessage::assistant("ok", "fine"),
            AgentMessage::AssistantMessage {
                id: "bad".to_string(),
                content: MessageContent::Parts(vec![ContentEntry::Unrecognized(
                    UnrecognizedPart {
                        kind: "hologram".to_string(),
                    },
                )]),
                date: None,
                meta: RecordMeta::default(),
            },
        ];
        match to_ui_messages(&records, &InboundOptions::default()) {
            Err(AdapterError::UnsupportedContentType(kind)) => assert_eq!(kind, "hologram"),
            other => panic!("Expected UnsupportedContentType, got: {other:?}"),
        }
    }

    #[test]
    fn test_user_text_round_trip() {
        let turn = PromptTurn::User {
            content: vec![PromptPart::text("Hello"), PromptPart::text("world")],
        };
        let creates = to_message_creates(&[turn]).unwrap();
        let entries = match &creates[0].content {
            MessageCreateContent::Parts(parts) => parts
                .iter()
                .map(|p| ContentEntry::text(p.text.clone()))
                .collect(),
            other => panic!("Expected parts, got: {other:?}"),
        };
        let record = AgentMessage::UserMessage {
            id: "u1".to_string(),
            content: MessageContent::Parts(entries),
            date: None,
            meta: RecordMeta::default(),
        };
        let messages = to_ui_messages(&[record], &InboundOptions::default()).unwrap();
        assert_eq!(messages[0].role, UiRole::User);
        assert_eq!(
            messages[0].parts,
            vec![
                UiPart::Text {
                    text: "Hello".to_string()
                },
                UiPart::Text {
                    text: "world".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_content_blocks_flatten_response() {
        let records = vec![
            AgentMessage::user("u", "ignored"),
            AgentMessage::reasoning("a", "plan", Some(ReasoningSource::ReasonerModel)),
            AgentMessage::tool_call(
                "a",
                ToolCallDelta {
                    tool_call_id: Some("t1".to_string()),
                    name: Some("search".to_string()),
                    arguments: None,
                },
            ),
            tool_return("r", "t1", ToolReturnStatus::Success),
            AgentMessage::assistant("a", "done"),
        ];
        let blocks = to_content_blocks(&records, &InboundOptions::responses()).unwrap();
        assert_eq!(blocks.len(), 4);
        assert!(matches!(blocks[0], ContentBlock::Reasoning { .. }));
        assert_eq!(
            blocks[1],
            ContentBlock::ToolCall {
                tool_call_id: "t1".to_string(),
                tool_name: "search".to_string(),
                input: "{}".to_string(),
            }
        );
        assert!(matches!(
            blocks[2],
            ContentBlock::ToolResult {
                is_error: false,
                ..
            }
        ));
        assert_eq!(
            blocks[3],
            ContentBlock::Text {
                text: "done".to_string()
            }
        );
    }
}
