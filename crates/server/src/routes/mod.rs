//! HTTP route handlers for the order API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /api/test               - Diagnostics (environment, email configured)
//!
//! # Orders
//! GET  /api/orders             - List stored orders
//! POST /api/orders             - Store an order
//!
//! # Email
//! POST /api/send-order-email   - Send an order confirmation
//! ```
//!
//! Any other method on these paths answers `405` with a JSON error body.

pub mod diagnostics;
pub mod email;
pub mod orders;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    routing::{get, post},
};
use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(diagnostics::health).fallback(method_not_allowed))
        .route(
            "/api/test",
            get(diagnostics::api_test).fallback(method_not_allowed),
        )
        .route(
            "/api/orders",
            get(orders::list)
                .post(orders::create)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/send-order-email",
            post(email::send_order_email).fallback(method_not_allowed),
        )
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Unwrap a JSON body that must be an object.
///
/// Malformed JSON, a missing content type and non-object bodies all become
/// `400` so clients always get a JSON error back.
fn json_object(payload: std::result::Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>> {
    let Json(body) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    match body {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::BadRequest(
            "request body must be a JSON object".to_string(),
        )),
    }
}
