//! Call credential endpoint (GET /api/credentials).

use crate::api::error::{ApiError, ApiResult};
use crate::api::AppState;
use crate::video::{self, Credentials};
use axum::{extract::State, response::Json, routing::get, Router};
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/credentials", get(get_credentials))
        .with_state(state)
}

async fn get_credentials(State(state): State<AppState>) -> ApiResult<Json<Credentials>> {
    let stream = state.secrets.stream().map_err(ApiError::from)?;

    info!("Got a request for credentials");

    let credentials = video::issue_credentials(&stream)?;
    Ok(Json(credentials))
}
