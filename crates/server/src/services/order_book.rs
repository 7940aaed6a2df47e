//! In-memory order list.
//!
//! Orders are kept as loose JSON objects: whatever the client sent as
//! `orderData`, plus a server-assigned `id` and `createdAt`. Nothing is
//! written to disk; the list is gone when the process exits.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

/// A stored order as returned by `GET /api/orders`.
pub type StoredOrder = Map<String, Value>;

/// Process-wide list of received orders, in creation order.
#[derive(Debug, Default)]
pub struct OrderBook {
    orders: RwLock<Vec<StoredOrder>>,
}

impl OrderBook {
    /// Create an empty order book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an order and return the stored copy.
    ///
    /// The stored object is `{ id, ...order_data, createdAt }`: a fresh id is
    /// written first, so an `id` supplied by the client wins, while
    /// `createdAt` is always the server's.
    pub async fn create(&self, order_data: Map<String, Value>, now: DateTime<Utc>) -> StoredOrder {
        let mut order = StoredOrder::new();
        order.insert(
            "id".to_string(),
            Value::String(generate_order_id(now, &mut rand::rng())),
        );
        order.extend(order_data);
        order.insert(
            "createdAt".to_string(),
            Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );

        self.orders.write().await.push(order.clone());
        tracing::info!(order_id = ?order.get("id"), "Order stored");
        order
    }

    /// All stored orders, oldest first.
    pub async fn list(&self) -> Vec<StoredOrder> {
        self.orders.read().await.clone()
    }

    /// Number of stored orders.
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Returns `true` if no order has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

/// Millisecond timestamp in base 36 followed by a random base-36 suffix.
pub fn generate_order_id(now: DateTime<Utc>, rng: &mut impl Rng) -> String {
    let millis = now.timestamp_millis().unsigned_abs();
    let suffix: u64 = rng.random();
    format!("{}{}", to_base36(millis), to_base36(suffix))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        // value % 36 < 36, always a valid index
        #[allow(clippy::cast_possible_truncation, clippy::indexing_slicing)]
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_739_530_000_000), "m74n8y9s");
    }

    #[test]
    fn test_generate_order_id_prefix() {
        let now = Utc.timestamp_millis_opt(1_739_530_000_000).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let id = generate_order_id(now, &mut rng);

        assert!(id.starts_with("m74n8y9s"));
        assert!(id.len() > "m74n8y9s".len());
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_generate_order_id_unique() {
        let now = Utc::now();
        let mut rng = rand::rng();
        let a = generate_order_id(now, &mut rng);
        let b = generate_order_id(now, &mut rng);
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_create_adds_id_and_created_at() {
        let book = OrderBook::new();
        let now = Utc.with_ymd_and_hms(2025, 2, 14, 11, 30, 0).unwrap();

        let order = book
            .create(object(json!({"items": [], "total": 25.0})), now)
            .await;

        assert!(order["id"].as_str().unwrap().starts_with(&to_base36(
            now.timestamp_millis().unsigned_abs()
        )));
        assert_eq!(order["createdAt"], "2025-02-14T11:30:00.000Z");
        assert_eq!(order["total"], 25.0);
        assert_eq!(book.len().await, 1);
    }

    #[tokio::test]
    async fn test_client_id_overrides_generated_id() {
        let book = OrderBook::new();
        let order = book
            .create(
                object(json!({"id": "ORDER123456", "createdAt": "yesterday"})),
                Utc::now(),
            )
            .await;

        assert_eq!(order["id"], "ORDER123456");
        assert_ne!(order["createdAt"], "yesterday");
    }

    #[tokio::test]
    async fn test_list_preserves_creation_order() {
        let book = OrderBook::new();
        assert!(book.is_empty().await);

        for n in 1..=3 {
            book.create(object(json!({"n": n})), Utc::now()).await;
        }

        let listed: Vec<_> = book.list().await.iter().map(|o| o["n"].clone()).collect();
        assert_eq!(listed, [json!(1), json!(2), json!(3)]);
    }
}
