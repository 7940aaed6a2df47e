//! Health and diagnostics endpoints.

use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTestResponse {
    message: &'static str,
    timestamp: String,
    environment: String,
    email_configured: bool,
}

/// `GET /api/test`
pub async fn api_test(State(state): State<AppState>) -> Json<ApiTestResponse> {
    Json(ApiTestResponse {
        message: "API test succeeded",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        environment: state.config().environment.clone(),
        email_configured: state.mailer().is_some(),
    })
}
