//! Integration tests for the chat model adapter.
//!
//! These tests drive `AgentChatModel` through `AgentProvider` against an
//! in-memory client, without a live agent service.

use tether_core::*;
use tether_provider::*;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::{Arc, Mutex};

// -- Mock client for integration tests --

#[derive(Default)]
struct MockClient {
    batch: Vec<AgentMessage>,
    stream: Vec<Result<AgentMessage, String>>,
    calls: Mutex<Vec<(String, Vec<MessageCreate>)>>,
}

impl MockClient {
    fn record_call(&self, agent_id: &str, messages: &[MessageCreate]) {
        self.calls
            .lock()
            .unwrap()
            .push((agent_id.to_string(), messages.to_vec()));
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AgentClient for MockClient {
    async fn create_messages(
        &self,
        agent_id: &str,
        request: MessageCreateRequest,
    ) -> Result<MessagesResponse, ProviderError> {
        self.record_call(agent_id, &request.messages);
        Ok(MessagesResponse {
            messages: self.batch.clone(),
            usage: None,
        })
    }

    async fn create_message_stream(
        &self,
        agent_id: &str,
        request: MessageStreamRequest,
    ) -> Result<RecordStream, ProviderError> {
        self.record_call(agent_id, &request.messages);
        let items: Vec<Result<AgentMessage, ProviderError>> = self
            .stream
            .iter()
            .cloned()
            .map(|item| item.map_err(ProviderError::StreamError))
            .collect();
        Ok(stream::iter(items).boxed())
    }

    async fn list_messages(
        &self,
        _agent_id: &str,
        _query: ListMessagesQuery,
    ) -> Result<Vec<AgentMessage>, ProviderError> {
        Ok(self.batch.clone())
    }

    async fn create_agent(&self, request: CreateAgentRequest) -> Result<AgentState, ProviderError> {
        Ok(AgentState {
            id: "agent-new".to_string(),
            name: request.name,
            description: request.description,
            model: request.model,
        })
    }

    async fn retrieve_agent(&self, agent_id: &str) -> Result<AgentState, ProviderError> {
        Err(ProviderError::ApiError {
            status: 404,
            body: format!("agent {agent_id} not found"),
        })
    }

    async fn list_agents(&self, _query: ListAgentsQuery) -> Result<Vec<AgentState>, ProviderError> {
        Ok(Vec::new())
    }

    async fn delete_agent(&self, _agent_id: &str) -> Result<(), ProviderError> {
        Ok(())
    }
}

fn options(agent: Option<&str>, prompt: Vec<PromptTurn>) -> CallOptions {
    CallOptions {
        prompt,
        provider_options: match agent {
            Some(id) => ProviderOptions::for_agent(id),
            None => ProviderOptions::default(),
        },
    }
}

// -- Integration tests --

#[tokio::test]
async fn test_generate_flattens_agent_records() {
    let client = Arc::new(MockClient {
        batch: vec![
            AgentMessage::user("u1", "Hello"),
            AgentMessage::reasoning("a1", "The user greeted me.", None),
            AgentMessage::assistant("a1", "Hi! How can I help?"),
        ],
        ..Default::default()
    });
    let provider = AgentProvider::with_client(client.clone());
    let model = provider.language_model("agent-model");

    let result = model
        .do_generate(options(Some("agent-1"), vec![PromptTurn::user("Hello")]))
        .await
        .unwrap();

    assert_eq!(result.finish_reason, FinishReason::Stop);
    assert!(result.usage.is_unknown());
    assert!(result.warnings.is_empty());
    assert_eq!(result.content.len(), 2);
    assert!(matches!(result.content[0], ContentBlock::Reasoning { .. }));
    assert_eq!(
        result.content[1],
        ContentBlock::Text {
            text: "Hi! How can I help?".to_string()
        }
    );

    let calls = client.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "agent-1");
}

#[tokio::test]
async fn test_only_last_turn_is_sent() {
    let client = Arc::new(MockClient::default());
    let model = AgentProvider::with_client(client.clone()).chat("agent-1");

    let prompt = vec![
        PromptTurn::system("Be brief."),
        PromptTurn::user("first"),
        PromptTurn::assistant("answer"),
        PromptTurn::user("second"),
    ];
    let result = model.do_generate(options(None, prompt)).await.unwrap();

    assert_eq!(result.warnings.len(), 1);
    let calls = client.calls.lock().unwrap();
    assert_eq!(
        calls[0].1,
        vec![MessageCreate {
            role: CreateRole::User,
            content: MessageCreateContent::Parts(vec![TextContent::new("second")]),
        }]
    );
}

#[tokio::test]
async fn test_call_options_override_default_agent() {
    let client = Arc::new(MockClient::default());
    let model = AgentProvider::with_client(client.clone()).chat("agent-default");

    model
        .do_generate(options(Some("agent-other"), vec![PromptTurn::user("hi")]))
        .await
        .unwrap();
    assert_eq!(client.calls.lock().unwrap()[0].0, "agent-other");
}

#[tokio::test]
async fn test_missing_agent_fails_before_network() {
    let client = Arc::new(MockClient::default());
    let model = AgentProvider::with_client(client.clone()).language_model("m");

    let err = model
        .do_generate(options(None, vec![PromptTurn::user("hi")]))
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::MissingAgentConfiguration));

    let result = model
        .do_stream(options(None, vec![PromptTurn::user("hi")]))
        .await;
    assert!(matches!(result, Err(AdapterError::MissingAgentConfiguration)));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_invalid_last_turn_fails_before_network() {
    let client = Arc::new(MockClient::default());
    let model = AgentProvider::with_client(client.clone()).chat("agent-1");

    let err = model
        .do_generate(options(None, vec![PromptTurn::assistant("I said this")]))
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::AssistantRoleNotSupported));

    let err = model.do_generate(options(None, vec![])).await.unwrap_err();
    assert!(matches!(err, AdapterError::EmptyPrompt));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_stream_scenario() {
    let client = Arc::new(MockClient {
        stream: vec![
            Ok(AgentMessage::assistant("m1", "Hi")),
            Ok(AgentMessage::assistant("m1", " there")),
        ],
        ..Default::default()
    });
    let model = AgentProvider::with_client(client).chat("agent-1");

    let result = model
        .do_stream(options(None, vec![PromptTurn::user("Hello")]))
        .await
        .unwrap();
    let events: Vec<StreamEvent> = result
        .stream
        .map(|event| event.unwrap())
        .collect()
        .await;

    assert_eq!(
        events,
        vec![
            StreamEvent::StreamStart { warnings: vec![] },
            StreamEvent::TextStart {
                id: "m1".to_string()
            },
            StreamEvent::TextDelta {
                id: "m1".to_string(),
                delta: "Hi".to_string()
            },
            StreamEvent::TextDelta {
                id: "m1".to_string(),
                delta: " there".to_string()
            },
            StreamEvent::TextEnd {
                id: "m1".to_string()
            },
            StreamEvent::Finish {
                finish_reason: FinishReason::Stop,
                usage: Usage::unknown()
            },
        ]
    );
}

#[tokio::test]
async fn test_stream_tool_call_and_reasoning() {
    let fragment = |call_id: Option<&str>, name: Option<&str>, args: &str| {
        AgentMessage::tool_call(
            "tc1",
            ToolCallDelta {
                tool_call_id: call_id.map(str::to_string),
                name: name.map(str::to_string),
                arguments: Some(args.to_string()),
            },
        )
    };
    let client = Arc::new(MockClient {
        stream: vec![
            Ok(AgentMessage::reasoning(
                "r1",
                "Need to search.",
                Some(ReasoningSource::NonReasonerModel),
            )),
            Ok(fragment(Some("t1"), Some("web_search"), "{\"query\":")),
            Ok(fragment(Some("t1"), None, " \"rust\"}")),
            Ok(AgentMessage::assistant("m1", "Found it.")),
        ],
        ..Default::default()
    });
    let model = AgentProvider::with_client(client).chat("agent-1");

    let result = model
        .do_stream(options(None, vec![PromptTurn::user("search rust")]))
        .await
        .unwrap();
    let events: Vec<StreamEvent> = result
        .stream
        .map(|event| event.unwrap())
        .collect()
        .await;

    let kinds: Vec<&str> = events.iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            "stream-start",
            "reasoning-start",
            "reasoning-delta",
            "tool-call",
            "text-start",
            "text-delta",
            "text-end",
            "reasoning-end",
            "finish",
        ]
    );
    assert_eq!(
        events[3],
        StreamEvent::ToolCall {
            tool_call_id: "t1".to_string(),
            tool_name: "web_search".to_string(),
            input: "{\"query\": \"rust\"}".to_string(),
        }
    );
    match &events[1] {
        StreamEvent::ReasoningStart { metadata, .. } => {
            assert_eq!(metadata.origin, ReasoningOrigin::Agent)
        }
        other => panic!("Expected reasoning-start, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_stream_error_is_terminal() {
    let client = Arc::new(MockClient {
        stream: vec![
            Ok(AgentMessage::assistant("m1", "partial")),
            Err("connection reset".to_string()),
        ],
        ..Default::default()
    });
    let model = AgentProvider::with_client(client).chat("agent-1");

    let result = model
        .do_stream(options(None, vec![PromptTurn::user("Hello")]))
        .await
        .unwrap();
    let events: Vec<Result<StreamEvent, AdapterError>> = result.stream.collect().await;

    assert_eq!(events.len(), 4);
    assert!(matches!(
        events.last(),
        Some(Err(AdapterError::Upstream(ProviderError::StreamError(_))))
    ));
    assert!(!events
        .iter()
        .any(|e| matches!(e, Ok(StreamEvent::Finish { .. }))));
}

#[tokio::test]
async fn test_history_through_inbound_converter() {
    let client = Arc::new(MockClient {
        batch: vec![
            AgentMessage::user("u1", "Hello"),
            AgentMessage::assistant("a1", "Hi"),
        ],
        ..Default::default()
    });
    let provider = AgentProvider::with_client(client);

    let records = provider
        .client()
        .list_messages("agent-1", ListMessagesQuery::default())
        .await
        .unwrap();
    let messages = to_ui_messages(&records, &InboundOptions::default()).unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, UiRole::User);
    assert_eq!(messages[1].text(), "Hi");
}
