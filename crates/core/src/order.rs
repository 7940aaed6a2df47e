//! Order payloads built from a cart snapshot.
//!
//! This is the JSON the menu sends to the order list and to the confirmation
//! email endpoint:
//!
//! ```json
//! {
//!   "id": "ORDER123456",
//!   "date": "2025-02-14 19:30",
//!   "items": [{ "name": "Milk Tea", "price": 12.5, "quantity": 2 }],
//!   "total": 25.0
//! }
//! ```

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartSnapshot;
use crate::define_id;
use crate::types::Price;

define_id!(OrderNumber);

/// Errors raised when turning a cart into an order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// There is nothing to order.
    #[error("cannot place an order for an empty cart")]
    EmptyCart,
}

/// One ordered dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Dish name at the time of ordering.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Number ordered.
    pub quantity: u32,
}

impl OrderLine {
    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

/// A submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderData {
    /// Human-facing order number, e.g. `ORDER123456`.
    pub id: OrderNumber,
    /// Local time the order was placed, `YYYY-MM-DD HH:MM`.
    pub date: String,
    /// Ordered dishes in cart order.
    pub items: Vec<OrderLine>,
    /// Order total.
    pub total: Price,
}

impl OrderData {
    /// Build an order from a cart snapshot at time `now`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::EmptyCart`] if the snapshot has no entries.
    pub fn from_snapshot<Tz>(snapshot: &CartSnapshot, now: &DateTime<Tz>) -> Result<Self, OrderError>
    where
        Tz: TimeZone,
        Tz::Offset: core::fmt::Display,
    {
        if snapshot.entries.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let items = snapshot
            .entries
            .iter()
            .map(|entry| OrderLine {
                name: entry.item().name.clone(),
                price: entry.item().price,
                quantity: entry.quantity(),
            })
            .collect();

        Ok(Self {
            id: order_number(now.timestamp_millis()),
            date: now.format("%Y-%m-%d %H:%M").to_string(),
            items,
            total: snapshot.total_price,
        })
    }

    /// Total number of dishes.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

/// `ORDER` followed by the last six digits of a millisecond timestamp.
fn order_number(timestamp_millis: i64) -> OrderNumber {
    let digits = timestamp_millis.unsigned_abs() % 1_000_000;
    OrderNumber(format!("ORDER{digits:06}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{FixedOffset, Utc};
    use rust_decimal::Decimal;

    use super::*;
    use crate::cart::{CART_SLOT, CartStore};
    use crate::menu::MenuItem;
    use crate::storage::MemoryStorage;
    use crate::types::ItemId;

    fn snapshot_of(dishes: &[(&str, i64)]) -> CartSnapshot {
        let mut store = CartStore::open(MemoryStorage::new(), CART_SLOT);
        for (id, price) in dishes {
            store.add_item(MenuItem::new(
                ItemId::parse(*id).unwrap(),
                format!("Dish {id}"),
                Price::new(Decimal::from(*price)).unwrap(),
            ));
        }
        store.snapshot()
    }

    #[test]
    fn test_order_number_pads_to_six_digits() {
        assert_eq!(order_number(1_739_530_000_042).as_str(), "ORDER000042");
        assert_eq!(order_number(1_739_530_123_456).as_str(), "ORDER123456");
    }

    #[test]
    fn test_from_snapshot() {
        let snapshot = snapshot_of(&[("a", 10), ("a", 10), ("b", 5)]);
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2025, 2, 14, 19, 30, 5).unwrap();

        let order = OrderData::from_snapshot(&snapshot, &now).unwrap();

        assert_eq!(order.date, "2025-02-14 19:30");
        assert!(order.id.as_str().starts_with("ORDER"));
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.items[0].line_total().to_string(), "¥20.00");
        assert_eq!(order.total.to_string(), "¥25.00");
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn test_empty_cart_rejected() {
        let snapshot = snapshot_of(&[]);
        let result = OrderData::from_snapshot(&snapshot, &Utc::now());
        assert_eq!(result.unwrap_err(), OrderError::EmptyCart);
    }

    #[test]
    fn test_wire_shape() {
        let snapshot = snapshot_of(&[("tea", 12)]);
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
        let order = OrderData::from_snapshot(&snapshot, &now).unwrap();

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["date"], "2025-01-01 08:00");
        assert_eq!(value["items"][0]["name"], "Dish tea");
        assert_eq!(value["items"][0]["price"], 12.0);
        assert_eq!(value["total"], 12.0);
    }
}
