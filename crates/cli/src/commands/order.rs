//! `menu order submit`

use chrono::Local;
use elena_menu_core::{CartStorage, CartStore, Email, OrderData};
use tracing::{info, warn};

use super::cart::ensure_saved;
use crate::client::OrderClient;
use crate::error::CliError;

/// Submit the cart as an order.
///
/// The order is posted to the server first; if that fails the cart is left
/// as it was. The confirmation email is best effort. The cart is cleared
/// once the server has stored the order.
///
/// # Errors
///
/// Returns error if the cart is empty, the email address is invalid, the
/// server rejects the order, or the cleared cart cannot be saved.
pub async fn submit<S: CartStorage>(
    store: &mut CartStore<S>,
    client: &OrderClient,
    email: Option<&str>,
) -> Result<OrderData, CliError> {
    let order = OrderData::from_snapshot(&store.snapshot(), &Local::now())?;
    let recipient = email.map(Email::parse).transpose()?;

    let stored = client.create_order(&order).await?;
    info!(
        order = %order.id,
        server_id = %stored["id"],
        items = order.item_count(),
        total = %order.total,
        "Order placed"
    );

    if let Some(to) = &recipient {
        match client.send_order_email(to, &order).await {
            Ok(()) => info!(to = %to, "Confirmation email sent"),
            Err(e) => warn!(to = %to, error = %e, "Could not send confirmation email"),
        }
    }

    store.clear();
    ensure_saved(store)?;
    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::net::SocketAddr;

    use elena_menu_core::{CART_SLOT, ItemId, MemoryStorage, MenuItem, Price};
    use elena_menu_server::{app, config::ServerConfig, state::AppState};
    use rust_decimal::Decimal;

    use super::*;

    /// Serve the real order API on an ephemeral port.
    async fn spawn_server() -> (SocketAddr, AppState) {
        let config = ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            environment: "test".to_string(),
            email: None,
            sentry_dsn: None,
            sentry_environment: None,
        };
        let state = AppState::new(config).unwrap();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let router = app(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        (addr, state)
    }

    fn tea_store() -> CartStore<MemoryStorage> {
        let mut store = CartStore::open(MemoryStorage::new(), CART_SLOT);
        let tea = MenuItem::new(
            ItemId::parse("tea").unwrap(),
            "Milk Tea",
            Price::new(Decimal::new(125, 1)).unwrap(),
        );
        store.add_item(tea.clone());
        store.add_item(tea);
        store
    }

    #[tokio::test]
    async fn test_submit_stores_order_and_clears_cart() {
        let (addr, state) = spawn_server().await;
        let client = OrderClient::new(&format!("http://{addr}"));
        let mut store = tea_store();

        let order = submit(&mut store, &client, None).await.unwrap();

        assert!(store.entries().is_empty());
        let stored = state.orders().list().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0]["id"], order.id.as_str());
        assert_eq!(stored[0]["total"], 25.0);
    }

    #[tokio::test]
    async fn test_email_failure_is_not_fatal() {
        // No EMAIL_PASS on the test server, so the email endpoint answers 500.
        let (addr, state) = spawn_server().await;
        let client = OrderClient::new(&format!("http://{addr}"));
        let mut store = tea_store();

        submit(&mut store, &client, Some("guest@example.com"))
            .await
            .unwrap();

        assert!(store.entries().is_empty());
        assert_eq!(state.orders().len().await, 1);
    }

    #[tokio::test]
    async fn test_unreachable_server_keeps_cart() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = OrderClient::new(&format!("http://{addr}"));
        let mut store = tea_store();

        let err = submit(&mut store, &client, None).await.unwrap_err();
        assert!(matches!(err, CliError::Http(_)));
        assert_eq!(store.total_item_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_cart_and_bad_email_rejected_before_sending() {
        let client = OrderClient::new("http://127.0.0.1:9");

        let mut empty = CartStore::open(MemoryStorage::new(), CART_SLOT);
        let err = submit(&mut empty, &client, None).await.unwrap_err();
        assert!(matches!(err, CliError::Order(_)));

        let mut store = tea_store();
        let err = submit(&mut store, &client, Some("not-an-email"))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidEmail(_)));
        assert_eq!(store.total_item_count(), 2);
    }
}
