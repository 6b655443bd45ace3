//! Streaming protocol events and generate-result content.
//!
//! Text and reasoning follow a start/delta/end pattern keyed by a block id.
//! Tool calls are emitted once, after their arguments are complete.
//!
//! ```text
//! StreamStart { warnings: [] }
//! TextStart { id: "m1" }
//! TextDelta { id: "m1", delta: "Hi" }
//! TextEnd { id: "m1" }
//! Finish { finish_reason: Stop, usage: Usage::unknown() }
//! ```

use serde::{Deserialize, Serialize};
use tether_provider::ReasoningSource;

/// Non-fatal notice attached to a call result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CallWarning {
    Other { message: String },
}

/// Token usage. `None` means the count was not measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

impl Usage {
    /// Usage whose counts the agent service did not report.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_unknown(&self) -> bool {
        self.input_tokens.is_none() && self.output_tokens.is_none() && self.total_tokens.is_none()
    }
}

/// Reason a response ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    Error,
    Other,
    Unknown,
}

/// Who produced a piece of reasoning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningOrigin {
    /// The model's own reasoning output.
    Model,
    /// The agent loop's inner monologue.
    Agent,
}

/// Metadata attached to reasoning blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ReasoningSource>,
    pub origin: ReasoningOrigin,
}

impl ReasoningMetadata {
    pub fn from_source(source: Option<ReasoningSource>) -> Self {
        let origin = match source {
            Some(ReasoningSource::ReasonerModel) => ReasoningOrigin::Model,
            Some(ReasoningSource::NonReasonerModel) | None => ReasoningOrigin::Agent,
        };
        Self { source, origin }
    }
}

/// Events of the framework's streaming protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamEvent {
    StreamStart {
        warnings: Vec<CallWarning>,
    },
    TextStart {
        id: String,
    },
    TextDelta {
        id: String,
        delta: String,
    },
    TextEnd {
        id: String,
    },
    ReasoningStart {
        id: String,
        metadata: ReasoningMetadata,
    },
    ReasoningDelta {
        id: String,
        delta: String,
        metadata: ReasoningMetadata,
    },
    ReasoningEnd {
        id: String,
    },
    /// A complete tool call. `input` is the assembled argument JSON text.
    #[serde(rename_all = "camelCase")]
    ToolCall {
        tool_call_id: String,
        tool_name: String,
        input: String,
    },
    #[serde(rename_all = "camelCase")]
    Finish {
        finish_reason: FinishReason,
        usage: Usage,
    },
}

impl StreamEvent {
    /// The protocol tag of this event.
    pub fn kind(&self) -> &'static str {
        match self {
            StreamEvent::StreamStart { .. } => "stream-start",
            StreamEvent::TextStart { .. } => "text-start",
            StreamEvent::TextDelta { .. } => "text-delta",
            StreamEvent::TextEnd { .. } => "text-end",
            StreamEvent::ReasoningStart { .. } => "reasoning-start",
            StreamEvent::ReasoningDelta { .. } => "reasoning-delta",
            StreamEvent::ReasoningEnd { .. } => "reasoning-end",
            StreamEvent::ToolCall { .. } => "tool-call",
            StreamEvent::Finish { .. } => "finish",
        }
    }
}

/// A content block of a non-streaming result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Reasoning {
        text: String,
        metadata: ReasoningMetadata,
    },
    #[serde(rename_all = "camelCase")]
    File {
        url: String,
        media_type: String,
    },
    #[serde(rename_all = "camelCase")]
    ToolCall {
        tool_call_id: String,
        tool_name: String,
        input: String,
    },
    #[serde(rename_all = "camelCase")]
    ToolResult {
        tool_call_id: String,
        tool_name: String,
        result: serde_json::Value,
        is_error: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_usage_serializes_as_null() {
        let usage = Usage::unknown();
        assert!(usage.is_unknown());
        assert_eq!(
            serde_json::to_value(usage).unwrap(),
            json!({"inputTokens": null, "outputTokens": null, "totalTokens": null})
        );

        let measured = Usage {
            input_tokens: Some(0),
            ..Usage::unknown()
        };
        assert!(!measured.is_unknown());
    }

    #[test]
    fn test_reasoning_origin() {
        assert_eq!(
            ReasoningMetadata::from_source(Some(ReasoningSource::ReasonerModel)).origin,
            ReasoningOrigin::Model
        );
        assert_eq!(
            ReasoningMetadata::from_source(Some(ReasoningSource::NonReasonerModel)).origin,
            ReasoningOrigin::Agent
        );
        assert_eq!(ReasoningMetadata::from_source(None).origin, ReasoningOrigin::Agent);
    }

    #[test]
    fn test_stream_event_tags() {
        let event = StreamEvent::ToolCall {
            tool_call_id: "t1".to_string(),
            tool_name: "search".to_string(),
            input: "{}".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "tool-call", "toolCallId": "t1", "toolName": "search", "input": "{}"})
        );
        assert_eq!(event.kind(), "tool-call");

        let finish = StreamEvent::Finish {
            finish_reason: FinishReason::Stop,
            usage: Usage::unknown(),
        };
        let value = serde_json::to_value(&finish).unwrap();
        assert_eq!(value["type"], "finish");
        assert_eq!(value["finishReason"], "stop");
    }

    #[test]
    fn test_content_block_serialization() {
        let block = ContentBlock::File {
            url: "https://x/y.png".to_string(),
            media_type: "image/png".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({"type": "file", "url": "https://x/y.png", "mediaType": "image/png"})
        );
    }
}
