//! Agent session configuration.
//!
//! Once the video provider has attached an AI participant to a call, the
//! resulting realtime session is configured here: event logging, the
//! role-specific instruction prompt, and tool registration. All side effects
//! land on the externally-owned session; nothing is retained locally.

pub mod prompt;
pub mod session;
pub mod tools;

pub use session::{RealtimeSession, SessionUpdate, ToolDefinition};

use crate::persona;
use anyhow::Result;
use tracing::{error, info};

/// The role an attached agent plays in the call.
#[derive(Debug, Clone)]
pub enum AgentRole {
    /// Fixed-identity technical interviewer.
    Interviewer,
    /// Persona-selected peer in a group discussion.
    GroupParticipant { candidate_name: String },
}

/// Configure a freshly attached realtime session for its role.
pub async fn configure_session(
    session: &mut dyn RealtimeSession,
    agent_user_id: &str,
    role: &AgentRole,
) -> Result<()> {
    subscribe_logging(session, agent_user_id);

    let instructions = match role {
        AgentRole::Interviewer => prompt::interviewer_instructions(),
        AgentRole::GroupParticipant { candidate_name } => {
            let selected = persona::select(agent_user_id);
            info!(
                "Agent ({}) assigned Persona: {}",
                agent_user_id, selected.name
            );
            prompt::group_instructions(agent_user_id, selected, candidate_name)
        }
    };

    // Register tools first so a session push carries the full configuration.
    session.add_tool(
        tools::weather_tool_definition(),
        tools::weather_tool_handler(agent_user_id),
    );

    session
        .update_session(SessionUpdate { instructions })
        .await?;

    info!("Realtime session setup complete for agent ({})", agent_user_id);
    Ok(())
}

fn subscribe_logging(session: &mut dyn RealtimeSession, agent_user_id: &str) {
    let id = agent_user_id.to_string();
    session.on_event(
        "error",
        Box::new(move |event| {
            error!("Realtime session error ({}): {}", id, event);
        }),
    );

    let id = agent_user_id.to_string();
    session.on_event(
        "session.update",
        Box::new(move |event| {
            info!("Realtime session update ({}): {}", id, event);
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::session::{EventHandler, ToolHandler};
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    #[derive(Default)]
    struct RecordingSession {
        instructions: Option<String>,
        tools: Vec<(ToolDefinition, ToolHandler)>,
        events: HashMap<String, EventHandler>,
    }

    #[async_trait]
    impl RealtimeSession for RecordingSession {
        async fn update_session(&mut self, update: SessionUpdate) -> Result<()> {
            self.instructions = Some(update.instructions);
            Ok(())
        }

        fn add_tool(&mut self, definition: ToolDefinition, handler: ToolHandler) {
            self.tools.push((definition, handler));
        }

        fn on_event(&mut self, event: &str, handler: EventHandler) {
            self.events.insert(event.to_string(), handler);
        }
    }

    #[tokio::test]
    async fn test_interviewer_configuration() {
        let mut session = RecordingSession::default();
        configure_session(&mut session, "lucy", &AgentRole::Interviewer)
            .await
            .unwrap();

        let instructions = session.instructions.expect("instructions set");
        assert!(instructions.contains("HireGenie"));
        assert_eq!(session.tools.len(), 1);
        assert_eq!(session.tools[0].0.name, "get_weather");
        assert!(session.events.contains_key("error"));
        assert!(session.events.contains_key("session.update"));
    }

    #[tokio::test]
    async fn test_group_configuration_embeds_selected_persona() {
        let mut session = RecordingSession::default();
        let role = AgentRole::GroupParticipant {
            candidate_name: "Anil Nandhan".to_string(),
        };
        configure_session(&mut session, "a", &role).await.unwrap();

        let instructions = session.instructions.expect("instructions set");
        // "a" hashes to the second persona
        assert!(instructions.contains(persona::PERSONAS[1].name));
        assert!(instructions.contains("Your assigned ID is 'a'"));
    }

    #[tokio::test]
    async fn test_registered_weather_tool_is_callable() {
        let mut session = RecordingSession::default();
        configure_session(&mut session, "agent-3", &AgentRole::Interviewer)
            .await
            .unwrap();

        let (_, handler) = &session.tools[0];
        let response = handler(serde_json::json!({"city": "Oslo"})).await;
        assert_eq!(response["condition"], "Partly Cloudy");
    }
}
