//! HTTP client for the order server.

use elena_menu_core::{Email, OrderData};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::CliError;

/// Error body returned by the order server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct CreatedOrder {
    order: Value,
}

/// Talks to `elena-menu-server`.
#[derive(Debug, Clone)]
pub struct OrderClient {
    http: Client,
    base_url: String,
}

impl OrderClient {
    /// Create a client for the server at `base_url` (e.g. `http://127.0.0.1:5000`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `POST /api/orders`, returning the order as stored by the server.
    ///
    /// # Errors
    ///
    /// Returns error if the server is unreachable or rejects the order.
    pub async fn create_order(&self, order: &OrderData) -> Result<Value, CliError> {
        let response = self
            .http
            .post(self.url("/api/orders"))
            .json(&json!({ "orderData": order }))
            .send()
            .await?;

        let created: CreatedOrder = check(response).await?.json().await?;
        Ok(created.order)
    }

    /// `POST /api/send-order-email`.
    ///
    /// # Errors
    ///
    /// Returns error if the server is unreachable or could not send the email.
    pub async fn send_order_email(&self, to: &Email, order: &OrderData) -> Result<(), CliError> {
        let response = self
            .http
            .post(self.url("/api/send-order-email"))
            .json(&json!({ "email": to, "orderData": order }))
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }
}

/// Turn a non-success response into [`CliError::Rejected`].
async fn check(response: Response) -> Result<Response, CliError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text).map_or(text, |body| body.error);

    Err(CliError::Rejected {
        status: status.as_u16(),
        message,
    })
}
