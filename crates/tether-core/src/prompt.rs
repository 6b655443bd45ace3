//! Prompt turns as handed to the chat model by the framework.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One role-tagged unit of conversation input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum PromptTurn {
    System { content: SystemContent },
    User { content: Vec<PromptPart> },
    Assistant { content: Vec<PromptPart> },
    Tool { content: Vec<PromptPart> },
}

impl PromptTurn {
    /// A user turn with a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        PromptTurn::User {
            content: vec![PromptPart::text(text)],
        }
    }

    /// A system turn with plain string content.
    pub fn system(text: impl Into<String>) -> Self {
        PromptTurn::System {
            content: SystemContent::Text(text.into()),
        }
    }

    /// An assistant turn with a single text part.
    pub fn assistant(text: impl Into<String>) -> Self {
        PromptTurn::Assistant {
            content: vec![PromptPart::text(text)],
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            PromptTurn::System { .. } => "system",
            PromptTurn::User { .. } => "user",
            PromptTurn::Assistant { .. } => "assistant",
            PromptTurn::Tool { .. } => "tool",
        }
    }
}

/// System content is either a plain string or a parts array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SystemContent {
    Text(String),
    Parts(Vec<PromptPart>),
}

/// A content part inside a prompt turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PromptPart {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    File {
        data: String,
        media_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
    },
    Reasoning {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    ToolCall {
        tool_call_id: String,
        tool_name: String,
        input: Value,
    },
    #[serde(rename_all = "camelCase")]
    ToolResult {
        tool_call_id: String,
        tool_name: String,
        output: Value,
    },
    /// Any part whose tag is not modelled above, kept so conversion can decide.
    #[serde(untagged)]
    Other {
        #[serde(rename = "type")]
        kind: String,
    },
}

impl PromptPart {
    pub fn text(text: impl Into<String>) -> Self {
        PromptPart::Text { text: text.into() }
    }

    /// The wire tag of this part.
    pub fn part_type(&self) -> &str {
        match self {
            PromptPart::Text { .. } => "text",
            PromptPart::File { .. } => "file",
            PromptPart::Reasoning { .. } => "reasoning",
            PromptPart::ToolCall { .. } => "tool-call",
            PromptPart::ToolResult { .. } => "tool-result",
            PromptPart::Other { kind } => kind,
        }
    }

    /// Whether this part belongs to tool traffic.
    pub fn is_tool_part(&self) -> bool {
        self.part_type().starts_with("tool-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_turn_from_framework_json() {
        let turns: Vec<PromptTurn> = serde_json::from_value(json!([
            {"role": "system", "content": "Be brief."},
            {"role": "user", "content": [
                {"type": "text", "text": "Hi"},
                {"type": "tool-result", "toolCallId": "c1", "toolName": "search", "output": "x"}
            ]}
        ]))
        .unwrap();

        assert_eq!(turns[0], PromptTurn::system("Be brief."));
        match &turns[1] {
            PromptTurn::User { content } => {
                assert_eq!(content[0], PromptPart::text("Hi"));
                assert!(content[1].is_tool_part());
            }
            other => panic!("Expected user turn, got: {other:?}"),
        }
    }

    #[test]
    fn test_part_types() {
        let file = PromptPart::File {
            data: "aGk=".to_string(),
            media_type: "text/plain".to_string(),
            filename: None,
        };
        assert_eq!(file.part_type(), "file");
        assert!(!file.is_tool_part());
        assert_eq!(PromptTurn::assistant("x").role(), "assistant");
    }

    #[test]
    fn test_unmodelled_part_tags_decode() {
        let parts: Vec<PromptPart> = serde_json::from_value(json!([
            {"type": "tool-approval-response", "approvalId": "a1", "approved": true},
            {"type": "image", "image": "https://example.com/cat.png"}
        ]))
        .unwrap();

        assert_eq!(parts[0].part_type(), "tool-approval-response");
        assert!(parts[0].is_tool_part());
        assert_eq!(
            parts[1],
            PromptPart::Other {
                kind: "image".to_string()
            }
        );
        assert!(!parts[1].is_tool_part());
    }
}
