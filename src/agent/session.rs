//! Narrow interface over the vendor-owned realtime AI session.
//!
//! The vendor SDK exposes a dynamically-typed session object; we only ever
//! use three of its operations, so that is all the trait captures. Handlers
//! and the session configurator program against this trait, which keeps the
//! vendor dependency mockable in tests.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// Callback invoked when the agent calls a registered tool. Receives the
/// tool arguments as JSON, returns the tool result as JSON.
pub type ToolHandler =
    Box<dyn Fn(Value) -> Pin<Box<dyn Future<Output = Value> + Send>> + Send + Sync>;

/// Callback invoked when the session emits a named event.
pub type EventHandler = Box<dyn Fn(&Value) + Send + Sync>;

/// Session-wide settings pushed to the realtime session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUpdate {
    pub instructions: String,
}

/// Declaration of a tool the agent may invoke.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON-schema object describing the tool arguments.
    pub parameters: Value,
}

/// The operations actually used against the vendor realtime session.
#[async_trait]
pub trait RealtimeSession: Send + Sync {
    /// Replace the session instructions (the agent's system prompt).
    async fn update_session(&mut self, update: SessionUpdate) -> Result<()>;

    /// Register a callable tool and its local dispatch handler.
    fn add_tool(&mut self, definition: ToolDefinition, handler: ToolHandler);

    /// Subscribe to a named session event.
    fn on_event(&mut self, event: &str, handler: EventHandler);
}
