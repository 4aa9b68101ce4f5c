//! Client for the hosted video platform.
//!
//! Captures only the operations the service actually uses: minting join
//! credentials, fetching call state, and attaching a realtime AI agent to a
//! call. Everything behind [`AgentConnector`] is mockable in tests.

pub mod realtime;
pub mod token;

use crate::agent::RealtimeSession;
use crate::config::{RealtimeSecrets, StreamSecrets};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

const VIDEO_API_BASE: &str = "https://video.stream-io-api.com/api/v2";

pub const CALL_ID_LEN: usize = 12;
pub const GUEST_SUFFIX_LEN: usize = 8;
pub const DEFAULT_CALL_TYPE: &str = "default";

/// A vendor-managed call, identified by type and id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRef {
    pub call_type: String,
    pub call_id: String,
}

impl CallRef {
    pub fn new(call_type: impl Into<String>, call_id: impl Into<String>) -> Self {
        Self {
            call_type: call_type.into(),
            call_id: call_id.into(),
        }
    }
}

/// The bundle a client needs to join a call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub api_key: String,
    pub token: String,
    pub call_type: String,
    pub call_id: String,
    pub user_id: String,
}

/// Short random call id: UUIDv4 with hyphens stripped, truncated.
pub fn new_call_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(CALL_ID_LEN);
    id
}

/// Guest user id for a joining client that has no account identity.
pub fn new_guest_user_id() -> String {
    let mut suffix = Uuid::new_v4().simple().to_string();
    suffix.truncate(GUEST_SUFFIX_LEN);
    format!("guest-{suffix}")
}

/// Mint a fresh credential bundle for a guest joining a new call.
pub fn issue_credentials(secrets: &StreamSecrets) -> Result<Credentials> {
    let call_id = new_call_id();
    let user_id = new_guest_user_id();
    let token = token::create_user_token(&secrets.api_secret, &user_id)?;

    info!("Generated token for userId: {}, callId: {}", user_id, call_id);

    Ok(Credentials {
        api_key: secrets.api_key.clone(),
        token,
        call_type: DEFAULT_CALL_TYPE.to_string(),
        call_id,
        user_id,
    })
}

/// Attaches realtime AI agents to calls.
#[async_trait]
pub trait AgentConnector: Send + Sync {
    async fn connect_agent(
        &self,
        call: &CallRef,
        agent_user_id: &str,
    ) -> Result<Box<dyn RealtimeSession>>;
}

/// Production connector speaking the vendor REST surface.
pub struct StreamVideoClient {
    http: reqwest::Client,
    secrets: RealtimeSecrets,
    video_base: String,
}

impl StreamVideoClient {
    pub fn new(secrets: RealtimeSecrets) -> Self {
        Self {
            http: reqwest::Client::new(),
            secrets,
            video_base: VIDEO_API_BASE.to_string(),
        }
    }

    fn call_url(&self, call: &CallRef) -> String {
        format!(
            "{}/video/call/{}/{}",
            self.video_base, call.call_type, call.call_id
        )
    }

    /// Server-side auth token for our own requests to the video API.
    fn server_token(&self) -> Result<String> {
        token::create_user_token(&self.secrets.stream.api_secret, "server")
    }

    /// Fetch current call state. Used for logging before an agent attach.
    pub async fn get_call(&self, call: &CallRef) -> Result<Value> {
        let response = self
            .http
            .get(self.call_url(call))
            .query(&[("api_key", self.secrets.stream.api_key.as_str())])
            .header("Authorization", self.server_token()?)
            .header("stream-auth-type", "jwt")
            .send()
            .await
            .context("Failed to fetch call state")?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .context("Failed to parse call state response")?;

        if !status.is_success() {
            anyhow::bail!("Call state request failed with status {}: {}", status, body);
        }

        Ok(body)
    }

    /// Register the agent as a call member so it shows up as a participant.
    async fn add_agent_member(&self, call: &CallRef, agent_user_id: &str) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/members", self.call_url(call)))
            .query(&[("api_key", self.secrets.stream.api_key.as_str())])
            .header("Authorization", self.server_token()?)
            .header("stream-auth-type", "jwt")
            .json(&json!({
                "update_members": [{ "user_id": agent_user_id, "role": "user" }],
            }))
            .send()
            .await
            .context("Failed to add agent to call members")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Agent member update failed with status {}: {}", status, body);
        }

        Ok(())
    }
}

#[async_trait]
impl AgentConnector for StreamVideoClient {
    async fn connect_agent(
        &self,
        call: &CallRef,
        agent_user_id: &str,
    ) -> Result<Box<dyn RealtimeSession>> {
        // Call state is fetched first; attachment only proceeds once the
        // call object exists on the provider side.
        let state = self.get_call(call).await?;
        debug!("Current call state: {}", state);

        info!(
            "Attempting to connect agent ({}) to call {}/{}",
            agent_user_id, call.call_type, call.call_id
        );
        self.add_agent_member(call, agent_user_id).await?;

        let session = realtime::OpenAiRealtimeSession::new(
            self.http.clone(),
            self.secrets.openai_api_key.clone(),
            agent_user_id.to_string(),
        );

        Ok(Box::new(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_id_shape() {
        for _ in 0..20 {
            let id = new_call_id();
            assert_eq!(id.len(), CALL_ID_LEN);
            assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_guest_user_id_shape() {
        for _ in 0..20 {
            let id = new_guest_user_id();
            let suffix = id.strip_prefix("guest-").expect("guest prefix");
            assert_eq!(suffix.len(), GUEST_SUFFIX_LEN);
            assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_issue_credentials() {
        let secrets = StreamSecrets {
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
        };
        let credentials = issue_credentials(&secrets).unwrap();

        assert_eq!(credentials.api_key, "key");
        assert_eq!(credentials.call_type, DEFAULT_CALL_TYPE);
        assert_eq!(credentials.call_id.len(), CALL_ID_LEN);
        assert!(credentials.user_id.starts_with("guest-"));
        assert!(!credentials.token.is_empty());
    }

    #[test]
    fn test_credentials_serialize_camel_case() {
        let secrets = StreamSecrets {
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
        };
        let credentials = issue_credentials(&secrets).unwrap();
        let value = serde_json::to_value(&credentials).unwrap();

        for key in ["apiKey", "token", "callType", "callId", "userId"] {
            assert!(value.get(key).is_some(), "missing key: {key}");
        }
    }

    #[test]
    fn test_ids_are_random() {
        assert_ne!(new_call_id(), new_call_id());
        assert_ne!(new_guest_user_id(), new_guest_user_id());
    }
}
