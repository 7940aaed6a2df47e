//! Order list route handlers.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use super::json_object;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::services::order_book::StoredOrder;
use crate::state::AppState;

/// Response for a stored order.
#[derive(Debug, Serialize)]
pub struct CreatedOrder {
    message: &'static str,
    order: StoredOrder,
}

/// `GET /api/orders`
pub async fn list(State(state): State<AppState>) -> Json<Vec<StoredOrder>> {
    Json(state.orders().list().await)
}

/// `POST /api/orders` with body `{"orderData": {...}}`.
#[tracing::instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedOrder>)> {
    let mut body = json_object(payload)?;

    let order_data = match body.remove("orderData") {
        Some(Value::Object(order_data)) => order_data,
        None | Some(Value::Null) => {
            return Err(AppError::BadRequest("orderData is required".to_string()));
        }
        Some(_) => {
            return Err(AppError::BadRequest(
                "orderData must be a JSON object".to_string(),
            ));
        }
    };

    let order = state.orders().create(order_data, Utc::now()).await;

    if let Some(Value::String(id)) = order.get("id") {
        add_breadcrumb("orders", "Order created", Some(&[("order_id", id.as_str())]));
    }

    Ok((
        StatusCode::CREATED,
        Json(CreatedOrder {
            message: "Order created",
            order,
        }),
    ))
}
