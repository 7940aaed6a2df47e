//! Order confirmation email route.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use elena_menu_core::Email;
use serde::Serialize;
use serde_json::Value;

use super::json_object;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::services::email::OrderSummary;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EmailSent {
    message: &'static str,
}

/// `POST /api/send-order-email` with body `{"email": "...", "orderData": {...}}`.
#[tracing::instrument(skip_all)]
pub async fn send_order_email(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<EmailSent>> {
    let mut body = json_object(payload)?;

    let email = match body.remove("email") {
        Some(Value::String(email)) if !email.trim().is_empty() => Some(email),
        _ => None,
    };
    let order_data = body.remove("orderData").filter(|data| !data.is_null());

    let (Some(email), Some(order_data)) = (email, order_data) else {
        return Err(AppError::BadRequest(
            "email and orderData are required".to_string(),
        ));
    };

    let to = Email::parse(&email)?;
    let mailer = state.mailer().ok_or(AppError::EmailNotConfigured)?;

    let order: OrderSummary = serde_json::from_value(order_data)
        .map_err(|e| AppError::BadRequest(format!("orderData is malformed: {e}")))?;

    add_breadcrumb(
        "email",
        "Sending order confirmation",
        Some(&[("domain", to.domain())]),
    );

    mailer.send_order_confirmation(&to, &order).await?;

    Ok(Json(EmailSent {
        message: "Order confirmation email sent",
    }))
}
