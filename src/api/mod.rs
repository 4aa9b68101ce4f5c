//! REST API server for the meet agent service.
//!
//! Provides HTTP endpoints for:
//! - Call credentials (api key, join token, call and user ids)
//! - Attaching the AI interviewer to a call
//! - Attaching persona-selected group-discussion agents

pub mod error;
pub mod routes;

use crate::config::{AgentConfig, Config, Secrets};
use crate::video::{AgentConnector, StreamVideoClient};
use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// State shared across request handlers. Handlers are otherwise stateless;
/// each request runs independently.
#[derive(Clone)]
pub struct AppState {
    pub secrets: Arc<Secrets>,
    pub agent: AgentConfig,
    /// Present only when the realtime secrets are fully configured; connect
    /// handlers answer with a configuration error otherwise.
    pub connector: Option<Arc<dyn AgentConnector>>,
}

impl AppState {
    pub fn new(config: &Config, secrets: Secrets) -> Self {
        let connector = secrets
            .realtime()
            .ok()
            .map(|realtime| Arc::new(StreamVideoClient::new(realtime)) as Arc<dyn AgentConnector>);

        Self {
            secrets: Arc::new(secrets),
            agent: config.agent.clone(),
            connector,
        }
    }

    /// Same state with the vendor connector swapped out, for tests.
    pub fn with_connector(mut self, connector: Arc<dyn AgentConnector>) -> Self {
        self.connector = Some(connector);
        self
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/version", get(version))
        .merge(routes::credentials::router(state.clone()))
        .merge(routes::connect::router(state))
}

pub struct ApiServer {
    port: u16,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: &Config, secrets: Secrets) -> Self {
        Self {
            port: config.server.port,
            state: AppState::new(config, secrets),
        }
    }

    pub async fn start(self) -> Result<()> {
        let app = router(self.state);

        let listener = tokio::net::TcpListener::bind(&format!("127.0.0.1:{}", self.port)).await?;

        info!("API server listening on http://127.0.0.1:{}", self.port);
        info!("Endpoints:");
        info!("  GET  /                                    - Service info");
        info!("  GET  /version                             - Version info");
        info!("  GET  /api/credentials                     - Mint call credentials");
        info!("  POST /api/connect/:type/:id               - Attach AI interviewer (host only)");
        info!("  POST /api/connect-group/:type/:id         - Attach group-discussion agent");

        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn status() -> Json<Value> {
    Json(json!({
        "service": "hiregenix-meet",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn version() -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "name": "hiregenix-meet"
    }))
}
