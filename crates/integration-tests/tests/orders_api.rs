//! Integration tests for the order API.
//!
//! Requests go through the full router (CORS, tracing, request ids) via
//! `oneshot`, without binding a socket.

#![allow(clippy::unwrap_used)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use elena_menu_integration_tests::{TestApp, test_config, unreachable_smtp};
use elena_menu_server::middleware::REQUEST_ID_HEADER;
use serde_json::json;
use tower::ServiceExt;

// =============================================================================
// Health and diagnostics
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new(test_config());
    let response = app
        .router
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
}

#[tokio::test]
async fn test_api_test_reports_environment() {
    let app = TestApp::new(test_config());
    let (status, body) = app.send(Method::GET, "/api/test", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["environment"], "test");
    assert_eq!(body["emailConfigured"], false);
    assert!(body["message"].is_string());
    assert!(body["timestamp"].is_string());

    let mut config = test_config();
    config.email = Some(unreachable_smtp());
    let (_, body) = TestApp::new(config)
        .send(Method::GET, "/api/test", None)
        .await;
    assert_eq!(body["emailConfigured"], true);
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn test_create_then_list_orders() {
    let app = TestApp::new(test_config());

    let (status, list) = app.send(Method::GET, "/api/orders", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));

    let order_data = json!({
        "date": "2025-02-14 19:30",
        "items": [{"name": "Milk Tea", "price": 12.5, "quantity": 2}],
        "total": 25.0
    });
    let (status, created) = app
        .send(
            Method::POST,
            "/api/orders",
            Some(&json!({ "orderData": order_data })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(created["message"].is_string());
    let order = &created["order"];
    assert!(!order["id"].as_str().unwrap().is_empty());
    assert!(order["createdAt"].is_string());
    assert_eq!(order["total"], 25.0);
    assert_eq!(order["items"][0]["name"], "Milk Tea");

    let (_, list) = app.send(Method::GET, "/api/orders", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0], *order);
}

#[tokio::test]
async fn test_orders_listed_in_creation_order() {
    let app = TestApp::new(test_config());
    for n in 1..=3 {
        let (status, _) = app
            .send(
                Method::POST,
                "/api/orders",
                Some(&json!({ "orderData": { "n": n } })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, list) = app.send(Method::GET, "/api/orders", None).await;
    let ns: Vec<_> = list.as_array().unwrap().iter().map(|o| o["n"].clone()).collect();
    assert_eq!(ns, [json!(1), json!(2), json!(3)]);
}

#[tokio::test]
async fn test_create_order_requires_order_data() {
    let app = TestApp::new(test_config());

    for body in [json!({}), json!({"orderData": null}), json!({"orderData": "x"}), json!([1])] {
        let (status, error) = app.send(Method::POST, "/api/orders", Some(&body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert!(error["error"].is_string());
    }

    assert!(app.state.orders().is_empty().await);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new(test_config());
    let response = app
        .router
        .clone()
        .oneshot(
            Request::post("/api/orders")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"orderData\":"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unsupported_method() {
    let app = TestApp::new(test_config());

    let (status, body) = app.send(Method::DELETE, "/api/orders", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(body["error"].is_string());

    let (status, _) = app.send(Method::GET, "/api/send-order-email", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// Email
// =============================================================================

fn email_body(email: &str) -> serde_json::Value {
    json!({
        "email": email,
        "orderData": {
            "id": "ORDER000042",
            "items": [{"name": "Milk Tea", "price": 12.5, "quantity": 2}],
            "total": 25.0
        }
    })
}

#[tokio::test]
async fn test_email_requires_fields() {
    let app = TestApp::new(test_config());

    for body in [
        json!({}),
        json!({"email": "guest@example.com"}),
        json!({"orderData": {"items": []}}),
        json!({"email": "", "orderData": {"items": []}}),
    ] {
        let (status, error) = app
            .send(Method::POST, "/api/send-order-email", Some(&body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert!(error["error"].is_string());
    }
}

#[tokio::test]
async fn test_email_rejects_invalid_address() {
    let app = TestApp::new(test_config());
    let (status, _) = app
        .send(
            Method::POST,
            "/api/send-order-email",
            Some(&email_body("not-an-address")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_email_not_configured() {
    let app = TestApp::new(test_config());
    let (status, body) = app
        .send(
            Method::POST,
            "/api/send-order-email",
            Some(&email_body("guest@example.com")),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_email_smtp_failure() {
    let mut config = test_config();
    config.email = Some(unreachable_smtp());
    let app = TestApp::new(config);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/send-order-email",
            Some(&email_body("guest@example.com")),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to send email");
}

#[tokio::test]
async fn test_email_with_huge_line_total_still_answers() {
    let mut config = test_config();
    config.email = Some(unreachable_smtp());
    let app = TestApp::new(config);

    let body = json!({
        "email": "guest@example.com",
        "orderData": {
            "items": [{"name": "Gold Leaf", "price": 7e28, "quantity": 2}],
            "total": 7e28
        }
    });
    let (status, body) = app
        .send(Method::POST, "/api/send-order-email", Some(&body))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to send email");
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_cors_preflight() {
    let app = TestApp::new(test_config());
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/orders")
                .header(header::ORIGIN, "https://elena.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("POST"));
    assert!(methods.contains("DELETE"));
}

#[tokio::test]
async fn test_cors_header_on_simple_request() {
    let app = TestApp::new(test_config());
    let response = app
        .router
        .clone()
        .oneshot(
            Request::get("/api/orders")
                .header(header::ORIGIN, "https://elena.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
