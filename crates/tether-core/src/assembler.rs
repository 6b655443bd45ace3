//! Reassembles streamed agent records into framework stream events.

use crate::error::AdapterError;
use crate::event::{FinishReason, ReasoningMetadata, StreamEvent, Usage};
use futures::Stream;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};
use tether_provider::{AgentMessage, ContentEntry, ContentPart, MessageContent, ProviderError};
use tracing::{trace, warn};

/// A tool call whose arguments are still arriving.
#[derive(Debug)]
struct PendingToolCall {
    id: String,
    name: String,
    arguments: String,
}

/// Stateful encoder from agent records to stream events.
///
/// At most one text block and one reasoning block are open at a time. Text
/// blocks are keyed by the record id, reasoning blocks by `reasoning-<id>`.
/// Tool call fragments are buffered per call id until the accumulated
/// arguments parse as JSON, then emitted once.
///
/// Records are handled strictly in arrival order.
#[derive(Debug, Default)]
pub struct StreamAssembler {
    text_block: Option<String>,
    reasoning_block: Option<String>,
    pending_calls: Vec<PendingToolCall>,
    last_call_id: Option<String>,
}

impl StreamAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one record, returning the events it produces.
    pub fn push(&mut self, record: &AgentMessage) -> Vec<StreamEvent> {
        match record {
            AgentMessage::AssistantMessage { id, content, .. } => {
                let text = extract_text(content);
                if text.is_empty() {
                    return Vec::new();
                }
                let mut events = Vec::new();
                let block = open_block(
                    &mut self.text_block,
                    id,
                    &mut events,
                    |id| StreamEvent::TextStart { id },
                    |id| StreamEvent::TextEnd { id },
                );
                events.push(StreamEvent::TextDelta {
                    id: block,
                    delta: text,
                });
                events
            }
            AgentMessage::ReasoningMessage {
                id,
                reasoning,
                source,
                ..
            } => {
                if reasoning.is_empty() {
                    return Vec::new();
                }
                let metadata = ReasoningMetadata::from_source(*source);
                let mut events = Vec::new();
                let block = open_block(
                    &mut self.reasoning_block,
                    &format!("reasoning-{id}"),
                    &mut events,
                    |id| StreamEvent::ReasoningStart { id, metadata },
                    |id| StreamEvent::ReasoningEnd { id },
                );
                events.push(StreamEvent::ReasoningDelta {
                    id: block,
                    delta: reasoning.clone(),
                    metadata,
                });
                events
            }
            AgentMessage::ToolCallMessage { tool_call, .. } => {
                let call_id = self.resolve_call_id(tool_call.tool_call_id.as_deref());
                self.last_call_id = Some(call_id.clone());

                let slot = match self.pending_calls.iter().position(|c| c.id == call_id) {
                    Some(slot) => slot,
                    None => {
                        self.pending_calls.push(PendingToolCall {
                            id: call_id.clone(),
                            name: String::new(),
                            arguments: String::new(),
                        });
                        self.pending_calls.len() - 1
                    }
                };
                let pending = &mut self.pending_calls[slot];
                if pending.name.is_empty() {
                    if let Some(name) = &tool_call.name {
                        pending.name = name.clone();
                    }
                }
                if let Some(fragment) = &tool_call.arguments {
                    pending.arguments.push_str(fragment);
                }

                if serde_json::from_str::<serde_json::Value>(&pending.arguments).is_err() {
                    trace!(tool_call_id = %call_id, "buffering tool call arguments");
                    return Vec::new();
                }
                let done = self.pending_calls.remove(slot);
                if self.last_call_id.as_deref() == Some(done.id.as_str()) {
                    self.last_call_id = None;
                }
                vec![StreamEvent::ToolCall {
                    tool_call_id: done.id,
                    tool_name: done.name,
                    input: done.arguments,
                }]
            }
            other => {
                trace!(message_type = %other.message_type(), "ignoring record in stream");
                Vec::new()
            }
        }
    }

    /// Close open blocks and emit the final `finish` event.
    pub fn finish(self) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        for call in self.pending_calls {
            if call.arguments.is_empty() {
                events.push(StreamEvent::ToolCall {
                    tool_call_id: call.id,
                    tool_name: call.name,
                    input: "{}".to_string(),
                });
            } else {
                warn!(
                    tool_call_id = %call.id,
                    tool_name = %call.name,
                    "dropping tool call with incomplete arguments"
                );
            }
        }
        if let Some(id) = self.text_block {
            events.push(StreamEvent::TextEnd { id });
        }
        if let Some(id) = self.reasoning_block {
            events.push(StreamEvent::ReasoningEnd { id });
        }
        events.push(StreamEvent::Finish {
            finish_reason: FinishReason::Stop,
            usage: Usage::unknown(),
        });
        events
    }

    /// Call id for a fragment: its own, else the call still buffering, else a fresh one.
    fn resolve_call_id(&self, explicit: Option<&str>) -> String {
        if let Some(id) = explicit {
            return id.to_string();
        }
        if let Some(last) = &self.last_call_id {
            if self.pending_calls.iter().any(|c| &c.id == last) {
                return last.clone();
            }
        }
        format!("call_{}", ulid::Ulid::new())
    }
}

/// Switch `current` to `id`, closing a different open block first.
fn open_block(
    current: &mut Option<String>,
    id: &str,
    events: &mut Vec<StreamEvent>,
    start: impl FnOnce(String) -> StreamEvent,
    end: impl FnOnce(String) -> StreamEvent,
) -> String {
    if current.as_deref() != Some(id) {
        if let Some(previous) = current.take() {
            events.push(end(previous));
        }
        events.push(start(id.to_string()));
        *current = Some(id.to_string());
    }
    id.to_string()
}

fn extract_text(content: &MessageContent) -> String {
    match content {
        MessageContent::Text(text) => text.clone(),
        MessageContent::Parts(entries) => entries
            .iter()
            .filter_map(|entry| match entry {
                ContentEntry::Part(ContentPart::Text { text }) => Some(text.as_str()),
                _ => None,
            })
            .collect(),
    }
}

/// Stream adapter driving a [`StreamAssembler`] from an upstream record stream.
///
/// Upstream is polled only when no assembled events are pending. An upstream
/// error ends the stream without a `finish` event.
#[pin_project::pin_project]
pub struct AssembledStream<S> {
    #[pin]
    upstream: S,
    assembler: Option<StreamAssembler>,
    pending: VecDeque<StreamEvent>,
}

/// Wrap a record stream so it yields framework stream events.
pub fn assemble_stream<S>(upstream: S) -> AssembledStream<S>
where
    S: Stream<Item = Result<AgentMessage, ProviderError>>,
{
    AssembledStream {
        upstream,
        assembler: Some(StreamAssembler::new()),
        pending: VecDeque::new(),
    }
}

impl<S> Stream for AssembledStream<S>
where
    S: Stream<Item = Result<AgentMessage, ProviderError>>,
{
    type Item = Result<StreamEvent, AdapterError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            if let Some(event) = this.pending.pop_front() {
                return Poll::Ready(Some(Ok(event)));
            }
            if this.assembler.is_none() {
                return Poll::Ready(None);
            }
            match futures::ready!(this.upstream.as_mut().poll_next(cx)) {
                Some(Ok(record)) => {
                    if let Some(assembler) = this.assembler.as_mut() {
                        this.pending.extend(assembler.push(&record));
                    }
                }
                Some(Err(err)) => {
                    *this.assembler = None;
                    return Poll::Ready(Some(Err(AdapterError::Upstream(err))));
                }
                None => {
                    if let Some(assembler) = this.assembler.take() {
                        this.pending.extend(assembler.finish());
                    }
                }
            }
        }
    }
}
