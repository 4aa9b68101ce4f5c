//! Agent attach endpoints.
//!
//! - POST /api/connect/:call_type/:call_id — fixed-identity AI interviewer;
//!   host-gated against the allow-listed email.
//! - POST /api/connect-group/:call_type/:call_id — persona-selected group
//!   discussion participant, id taken from the body or defaulted.
//!
//! Any error out of the vendor client is caught here, logged, and surfaced
//! as a 500 with the underlying message. No retries.

use crate::agent::{self, AgentRole};
use crate::api::error::{ApiError, ApiResult};
use crate::api::AppState;
use crate::room::provider;
use crate::video::{AgentConnector, CallRef};
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

/// Request body for the group-connect endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ConnectGroupRequest {
    #[serde(rename = "agentUserId")]
    pub agent_user_id: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/connect/:call_type/:call_id", post(connect_interviewer))
        .route(
            "/api/connect-group/:call_type/:call_id",
            post(connect_group),
        )
        .with_state(state)
}

async fn connect_interviewer(
    State(state): State<AppState>,
    Path((call_type, call_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> ApiResult<Json<Value>> {
    info!("API route /api/connect invoked");

    let connector = require_connector(&state)?;
    let call = validate_call_params(&call_type, &call_id)?;
    require_host(&state, &headers)?;

    let agent_user_id = state.agent.interviewer_id.clone();
    info!(
        "Got a request for connect: callType={}, callId={}",
        call.call_type, call.call_id
    );

    attach_agent(connector, &call, &agent_user_id, &AgentRole::Interviewer).await?;

    Ok(Json(json!({ "ok": true })))
}

async fn connect_group(
    State(state): State<AppState>,
    Path((call_type, call_id)): Path<(String, String)>,
    body: Option<Json<ConnectGroupRequest>>,
) -> ApiResult<Json<Value>> {
    info!("API route /api/connect-group invoked");

    let connector = require_connector(&state)?;
    let call = validate_call_params(&call_type, &call_id)?;

    // Missing, empty, or unparseable bodies all fall back to the default id.
    let agent_user_id = body
        .and_then(|Json(req)| req.agent_user_id)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| state.agent.default_group_agent_id.clone());

    info!(
        "Got a request for connect-group: callType={}, callId={}, agentUserId={}",
        call.call_type, call.call_id, agent_user_id
    );

    let role = AgentRole::GroupParticipant {
        candidate_name: state.agent.candidate_name.clone(),
    };
    attach_agent(connector, &call, &agent_user_id, &role).await?;

    Ok(Json(json!({ "ok": true, "agentUserId": agent_user_id })))
}

fn require_connector(state: &AppState) -> Result<&Arc<dyn AgentConnector>, ApiError> {
    state.connector.as_ref().ok_or_else(|| {
        ApiError::internal("Missing Stream/OpenAI API Key or Secret in environment variables")
    })
}

fn validate_call_params(call_type: &str, call_id: &str) -> Result<CallRef, ApiError> {
    if call_type.trim().is_empty() || call_id.trim().is_empty() {
        return Err(ApiError::bad_request(
            "Missing callType or callId in route parameters",
        ));
    }
    Ok(CallRef::new(call_type, call_id))
}

/// Server-side check of the host gate. The email cookie is compared against
/// the configured allow-list; the client-side copy of this check only hides
/// the button.
fn require_host(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let cookie_email = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| provider::cookie_value(header, provider::USER_EMAIL_COOKIE));

    if !provider::is_allowed_host(
        cookie_email.as_deref(),
        state.secrets.host_allowed_email.as_deref(),
    ) {
        return Err(ApiError::forbidden(
            "Not authorized to add the interviewer agent",
        ));
    }
    Ok(())
}

async fn attach_agent(
    connector: &Arc<dyn AgentConnector>,
    call: &CallRef,
    agent_user_id: &str,
    role: &AgentRole,
) -> Result<(), ApiError> {
    let mut session = connector
        .connect_agent(call, agent_user_id)
        .await
        .map_err(|e| {
            error!("Error connecting agent ({}): {:#}", agent_user_id, e);
            ApiError::internal(e.to_string())
        })?;

    agent::configure_session(session.as_mut(), agent_user_id, role)
        .await
        .map_err(|e| {
            error!("Error configuring agent ({}): {:#}", agent_user_id, e);
            ApiError::internal(e.to_string())
        })?;

    info!("Agent ({}) connection process complete", agent_user_id);
    Ok(())
}
