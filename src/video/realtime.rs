//! Production realtime session backed by the OpenAI realtime API.
//!
//! Tool and event handlers are registered locally; the instruction prompt
//! and tool declarations are pushed to the provider as one session payload.
//! The dispatch methods below are the seam a provider event bridge (the
//! vendor-owned websocket relay, out of scope here) feeds: tool calls go
//! through `dispatch_tool_call`, named events through `dispatch_event`.

use crate::agent::session::{
    EventHandler, RealtimeSession, SessionUpdate, ToolDefinition, ToolHandler,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

const REALTIME_SESSIONS_URL: &str = "https://api.openai.com/v1/realtime/sessions";
const REALTIME_MODEL: &str = "gpt-4o-realtime-preview";

pub struct OpenAiRealtimeSession {
    http: reqwest::Client,
    api_key: String,
    agent_user_id: String,
    tools: Vec<ToolDefinition>,
    tool_handlers: HashMap<String, ToolHandler>,
    event_handlers: HashMap<String, Vec<EventHandler>>,
}

impl OpenAiRealtimeSession {
    pub fn new(http: reqwest::Client, api_key: String, agent_user_id: String) -> Self {
        Self {
            http,
            api_key,
            agent_user_id,
            tools: Vec::new(),
            tool_handlers: HashMap::new(),
            event_handlers: HashMap::new(),
        }
    }

    /// Run the handler registered for a tool call coming off the session.
    /// Unknown tools produce an error object rather than a failure.
    /// Crate-visible: called by the provider event bridge, not by handlers.
    pub(crate) async fn dispatch_tool_call(&self, name: &str, args: Value) -> Value {
        match self.tool_handlers.get(name) {
            Some(handler) => handler(args).await,
            None => {
                warn!(
                    "Agent ({}) called unregistered tool: {}",
                    self.agent_user_id, name
                );
                json!({ "error": format!("Unknown tool: {name}") })
            }
        }
    }

    /// Fan a provider event out to its subscribers.
    /// Crate-visible: called by the provider event bridge, not by handlers.
    pub(crate) fn dispatch_event(&self, event: &str, payload: &Value) {
        if let Some(handlers) = self.event_handlers.get(event) {
            for handler in handlers {
                handler(payload);
            }
        }
    }

    fn session_payload(&self, instructions: &str) -> Value {
        let tools: Vec<Value> = self
            .tools
            .iter()
            .map(|tool| {
                json!({
                    "type": "function",
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": tool.parameters,
                })
            })
            .collect();

        json!({
            "model": REALTIME_MODEL,
            "instructions": instructions,
            "tools": tools,
        })
    }
}

#[async_trait]
impl RealtimeSession for OpenAiRealtimeSession {
    async fn update_session(&mut self, update: SessionUpdate) -> Result<()> {
        let payload = self.session_payload(&update.instructions);
        debug!(
            "Pushing session configuration for agent ({})",
            self.agent_user_id
        );

        let response = self
            .http
            .post(REALTIME_SESSIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context("Failed to push realtime session configuration")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Realtime session update failed with status {}: {}", status, body);
        }

        Ok(())
    }

    fn add_tool(&mut self, definition: ToolDefinition, handler: ToolHandler) {
        self.tool_handlers.insert(definition.name.clone(), handler);
        self.tools.push(definition);
    }

    fn on_event(&mut self, event: &str, handler: EventHandler) {
        self.event_handlers
            .entry(event.to_string())
            .or_default()
            .push(handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::tools;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn session() -> OpenAiRealtimeSession {
        OpenAiRealtimeSession::new(reqwest::Client::new(), "sk-test".to_string(), "lucy".to_string())
    }

    #[tokio::test]
    async fn test_dispatch_registered_tool() {
        let mut session = session();
        session.add_tool(
            tools::weather_tool_definition(),
            tools::weather_tool_handler("lucy"),
        );

        let response = session
            .dispatch_tool_call("get_weather", json!({"city": "Madrid"}))
            .await;
        assert_eq!(response["temperature"], 22);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool_returns_error_object() {
        let session = session();
        let response = session.dispatch_tool_call("get_stock_price", json!({})).await;
        assert!(response["error"].as_str().unwrap().contains("get_stock_price"));
    }

    #[test]
    fn test_event_fanout() {
        let mut session = session();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let calls = calls.clone();
            session.on_event(
                "error",
                Box::new(move |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                }),
            );
        }

        session.dispatch_event("error", &json!({"message": "boom"}));
        session.dispatch_event("session.update", &json!({}));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_session_payload_declares_tools() {
        let mut session = session();
        session.add_tool(
            tools::weather_tool_definition(),
            tools::weather_tool_handler("lucy"),
        );

        let payload = session.session_payload("be helpful");
        assert_eq!(payload["instructions"], "be helpful");
        assert_eq!(payload["tools"][0]["name"], "get_weather");
        assert_eq!(payload["tools"][0]["type"], "function");
    }
}
