//! Meeting room state and the client-side controller that talks to the
//! agent service over its HTTP API.

pub mod provider;
pub mod status;

pub use status::{CallLayout, CallingState, RoomState, RoomStatusHandle};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::{error, info};

/// Issues agent-attach requests against the service, enforcing one
/// outstanding request at a time through the shared room state.
pub struct RoomController {
    client: reqwest::Client,
    base_url: String,
    status: RoomStatusHandle,
}

impl RoomController {
    pub fn new(base_url: impl Into<String>, status: RoomStatusHandle) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            status,
        }
    }

    /// Attach the fixed AI interviewer to a call.
    pub async fn add_interviewer(&self, call_type: &str, call_id: &str) -> Result<Value> {
        let url = format!("{}/api/connect/{}/{}", self.base_url, call_type, call_id);
        self.send_attach_request(url, None).await
    }

    /// Attach a group-discussion agent, optionally under a chosen id.
    pub async fn add_group_agent(
        &self,
        call_type: &str,
        call_id: &str,
        agent_user_id: Option<&str>,
    ) -> Result<Value> {
        let url = format!(
            "{}/api/connect-group/{}/{}",
            self.base_url, call_type, call_id
        );
        let body = agent_user_id.map(|id| serde_json::json!({ "agentUserId": id }));
        self.send_attach_request(url, body).await
    }

    async fn send_attach_request(&self, url: String, body: Option<Value>) -> Result<Value> {
        if !self.status.begin_agent_request().await {
            bail!("An agent request is already pending");
        }

        info!("Attempting to add agent: POST {}", url);
        let result = self.post_json(&url, body).await;
        // Re-arm the control whether the request succeeded or not.
        self.status.finish_agent_request().await;

        if let Err(e) = &result {
            error!("Error adding agent: {:#}", e);
        }
        result
    }

    async fn post_json(&self, url: &str, body: Option<Value>) -> Result<Value> {
        let mut request = self.client.post(url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .context("Failed to connect to meet service. Is it running?")?;

        let status = response.status();
        let json: Value = response
            .json()
            .await
            .context("Failed to parse service response")?;

        if !status.is_success() {
            bail!(
                "Failed to add agent: {}",
                json.get("error").and_then(|e| e.as_str()).unwrap_or("Unknown error")
            );
        }

        Ok(json)
    }
}
