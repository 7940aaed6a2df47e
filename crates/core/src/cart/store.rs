//! The cart state manager.

use std::num::NonZeroU32;

use thiserror::Error;

use super::events::{CartEvent, Listeners, SubscriptionId};
use super::{Cart, CartEntry, CartSnapshot};
use crate::menu::MenuItem;
use crate::storage::{CartStorage, StorageError};
use crate::types::Price;

/// Default slot name for the persisted cart.
pub const CART_SLOT: &str = "menuApp_cart";

/// A failure mirroring the cart to or from storage.
///
/// Never returned by cart operations. The store logs it and keeps the most
/// recent one available through [`CartStore::last_persistence_error`].
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The slot could not be read at start-up.
    #[error("failed to read cart slot '{slot}': {source}")]
    Read { slot: String, source: StorageError },

    /// The slot held bytes that are not a valid cart.
    #[error("cart slot '{slot}' is corrupt: {source}")]
    Decode {
        slot: String,
        source: serde_json::Error,
    },

    /// The cart could not be serialized.
    #[error("failed to encode cart: {0}")]
    Encode(#[source] serde_json::Error),

    /// The slot could not be written after a change.
    #[error("failed to write cart slot '{slot}': {source}")]
    Write { slot: String, source: StorageError },
}

/// Owns the cart and keeps it mirrored into a storage slot.
///
/// The in-memory cart is authoritative. Every mutation is applied first,
/// then written to the slot, then announced to subscribers. Storage failures
/// are contained here: they are logged and recorded but never undo a change
/// or surface as an error to the caller.
///
/// ```
/// use elena_menu_core::{CartStore, ItemId, MemoryStorage, MenuItem, Price, CART_SLOT};
/// use rust_decimal::Decimal;
///
/// let mut store = CartStore::open(MemoryStorage::new(), CART_SLOT);
/// let tea = MenuItem::new(
///     ItemId::parse("tea").unwrap(),
///     "Milk Tea",
///     Price::new(Decimal::new(125, 1)).unwrap(),
/// );
///
/// store.add_item(tea.clone());
/// store.add_item(tea);
/// assert_eq!(store.total_item_count(), 2);
/// assert_eq!(store.total_price().to_string(), "¥25.00");
///
/// store.set_quantity("tea", 0);
/// assert!(store.entries().is_empty());
/// ```
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    slot: String,
    cart: Cart,
    listeners: Listeners,
    last_error: Option<PersistenceError>,
}

impl<S: CartStorage> CartStore<S> {
    /// Open a store over `storage`, restoring the cart saved in `slot`.
    ///
    /// A missing slot yields an empty cart. An unreadable or corrupt slot also
    /// yields an empty cart; the failure is logged and recorded. Nothing is
    /// written during `open`, so a saved cart is never overwritten before it
    /// has been loaded.
    pub fn open(storage: S, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let (cart, last_error) = match load(&storage, &slot) {
            Ok(cart) => {
                tracing::debug!(slot = %slot, entries = cart.len(), "Cart restored");
                (cart, None)
            }
            Err(e) => {
                tracing::warn!(slot = %slot, error = %e, "Starting with an empty cart");
                (Cart::new(), Some(e))
            }
        };

        Self {
            storage,
            slot,
            cart,
            listeners: Listeners::default(),
            last_error,
        }
    }

    /// Add one of `item`.
    ///
    /// If the item is already in the cart its quantity goes up by one and the
    /// stored item snapshot is left as it was.
    pub fn add_item(&mut self, item: MenuItem) {
        let item_id = item.id.clone();
        let quantity = self.cart.add(item);
        tracing::debug!(item_id = %item_id, quantity, "Item added to cart");
        self.commit(Some(CartEvent::ItemAdded { item_id, quantity }));
    }

    /// Remove an item's entry. Unknown ids are a no-op.
    pub fn remove_item(&mut self, item_id: &str) {
        let event = self.cart.remove(item_id).map(|entry| {
            tracing::debug!(item_id, "Item removed from cart");
            CartEvent::ItemRemoved {
                item_id: entry.item.id,
            }
        });
        self.commit(event);
    }

    /// Replace an item's quantity.
    ///
    /// Zero or negative quantities remove the item. Quantities above
    /// `u32::MAX` are clamped. Unknown ids are a no-op.
    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) {
        let quantity = if quantity <= 0 {
            None
        } else {
            NonZeroU32::new(u32::try_from(quantity).unwrap_or(u32::MAX))
        };

        let Some(quantity) = quantity else {
            self.remove_item(item_id);
            return;
        };

        let event = self.cart.set_quantity(item_id, quantity).map(|item_id| {
            tracing::debug!(item_id = %item_id, quantity = quantity.get(), "Cart quantity updated");
            CartEvent::QuantityChanged {
                item_id,
                quantity: quantity.get(),
            }
        });
        self.commit(event);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        tracing::debug!("Cart cleared");
        self.commit(Some(CartEvent::Cleared));
    }

    /// Sum of all quantities; 0 for an empty cart.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.cart.total_item_count()
    }

    /// Sum of `price * quantity` over the current entries; 0 for an empty cart.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.cart.total_price()
    }

    /// Current entries, for rendering.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        self.cart.entries()
    }

    /// The cart itself.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Owned copy of the entries and totals.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from(&self.cart)
    }

    /// Register a listener for cart changes.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CartEvent) + Send + 'static,
    {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// The most recent persistence failure, cleared by the next successful write.
    #[must_use]
    pub const fn last_persistence_error(&self) -> Option<&PersistenceError> {
        self.last_error.as_ref()
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// The slot this store persists to.
    #[must_use]
    pub fn slot(&self) -> &str {
        &self.slot
    }

    fn commit(&mut self, event: Option<CartEvent>) {
        self.persist();
        if let Some(event) = event {
            self.listeners.emit(&event);
        }
    }

    fn persist(&mut self) {
        let result = serde_json::to_vec(&self.cart)
            .map_err(PersistenceError::Encode)
            .and_then(|bytes| {
                self.storage
                    .write(&self.slot, &bytes)
                    .map_err(|source| PersistenceError::Write {
                        slot: self.slot.clone(),
                        source,
                    })
            });

        match result {
            Ok(()) => self.last_error = None,
            Err(e) => {
                tracing::error!(slot = %self.slot, error = %e, "Cart not saved; keeping in-memory cart");
                self.last_error = Some(e);
            }
        }
    }
}

fn load<S: CartStorage>(storage: &S, slot: &str) -> Result<Cart, PersistenceError> {
    let bytes = storage
        .read(slot)
        .map_err(|source| PersistenceError::Read {
            slot: slot.to_string(),
            source,
        })?;

    match bytes {
        Some(bytes) => serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Decode {
            slot: slot.to_string(),
            source,
        }),
        None => Ok(Cart::new()),
    }
}
