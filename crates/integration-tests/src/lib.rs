//! Integration tests for Elena's Menu.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p elena-menu-integration-tests
//! ```
//!
//! No external services are needed: the HTTP API is driven in-process through
//! `tower::ServiceExt::oneshot`, and cart persistence runs against temporary
//! directories.
//!
//! # Test Categories
//!
//! - `cart_persistence` - `CartStore` over `FileStorage`
//! - `orders_api` - Order list, email and diagnostics endpoints

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use elena_menu_core::{ItemId, MenuItem, Price};
use elena_menu_server::{
    app,
    config::{EmailConfig, ServerConfig},
    state::AppState,
};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

/// Server configuration with email disabled.
#[must_use]
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".parse().expect("valid ip"),
        port: 0,
        environment: "test".to_string(),
        email: None,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Email settings pointing at a port nothing listens on.
#[must_use]
pub fn unreachable_smtp() -> EmailConfig {
    EmailConfig {
        smtp_host: "127.0.0.1".to_string(),
        smtp_port: 1,
        smtp_username: "menu@example.com".to_string(),
        smtp_password: SecretString::from("auth-code"),
        from_address: "menu@example.com".to_string(),
        from_name: "Elena's Menu".to_string(),
    }
}

/// A router plus the state behind it.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Build the full application for `config`.
    ///
    /// # Panics
    ///
    /// Panics if the state cannot be built.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState::new(config).expect("Failed to build state");
        Self {
            router: app(state.clone()),
            state,
        }
    }

    /// Send a request and return the status and JSON body (`Null` if empty
    /// or not JSON).
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(path);
        let request = match body {
            Some(json) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}

/// A menu item priced in cents.
///
/// # Panics
///
/// Panics on an empty id or negative price.
#[must_use]
pub fn dish(id: &str, name: &str, cents: i64) -> MenuItem {
    MenuItem::new(
        ItemId::parse(id).expect("valid id"),
        name,
        Price::new(Decimal::new(cents, 2)).expect("valid price"),
    )
}
