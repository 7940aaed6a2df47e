//! The shopping cart.
//!
//! [`Cart`] is the plain aggregate: an ordered list of [`CartEntry`] values,
//! unique by item id, each with a quantity of at least one. It is only
//! mutated through [`CartStore`], which also keeps it mirrored into durable
//! storage and notifies subscribers.

mod events;
mod store;

pub use events::{CartEvent, SubscriptionId};
pub use store::{CART_SLOT, CartStore, PersistenceError};

use std::collections::HashSet;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::menu::MenuItem;
use crate::types::{ItemId, Price};

/// Errors raised when building a [`Cart`] from raw entries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Two entries refer to the same item.
    #[error("cart contains item '{0}' more than once")]
    DuplicateItem(ItemId),
}

/// A menu item paired with how many of it were ordered.
///
/// The item is a snapshot taken when it was first added; later catalog
/// changes do not reach entries already in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    item: MenuItem,
    quantity: NonZeroU32,
}

impl CartEntry {
    /// Pair an item with a quantity.
    #[must_use]
    pub const fn new(item: MenuItem, quantity: NonZeroU32) -> Self {
        Self { item, quantity }
    }

    /// The item snapshot.
    #[must_use]
    pub const fn item(&self) -> &MenuItem {
        &self.item
    }

    /// The item's id.
    #[must_use]
    pub const fn item_id(&self) -> &ItemId {
        &self.item.id
    }

    /// How many of the item are in the cart (always at least one).
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// `price * quantity` for this entry.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.item.price * self.quantity.get()
    }
}

/// Ordered, id-unique collection of cart entries.
///
/// Serializes as a JSON array of entries. Deserialization rejects arrays that
/// repeat an item id or carry a zero quantity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartEntry>", into = "Vec<CartEntry>")]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Look up the entry for an item.
    #[must_use]
    pub fn get(&self, item_id: &str) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.item.id.as_str() == item_id)
    }

    /// Number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cart holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity.get())).sum()
    }

    /// Sum of all line totals, computed from the current entries.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Add one of `item`, returning the entry's new quantity.
    ///
    /// An existing entry keeps its original item snapshot.
    pub(crate) fn add(&mut self, item: MenuItem) -> u32 {
        if let Some(entry) = self.entry_mut(item.id.as_str()) {
            entry.quantity = entry.quantity.saturating_add(1);
            return entry.quantity.get();
        }
        self.entries.push(CartEntry::new(item, NonZeroU32::MIN));
        1
    }

    /// Remove and return an item's entry, keeping the order of the rest.
    pub(crate) fn remove(&mut self, item_id: &str) -> Option<CartEntry> {
        let index = self
            .entries
            .iter()
            .position(|e| e.item.id.as_str() == item_id)?;
        Some(self.entries.remove(index))
    }

    /// Replace an item's quantity, returning its id if the item is in the cart.
    pub(crate) fn set_quantity(&mut self, item_id: &str, quantity: NonZeroU32) -> Option<ItemId> {
        let entry = self.entry_mut(item_id)?;
        entry.quantity = quantity;
        Some(entry.item.id.clone())
    }

    /// Drop every entry.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    fn entry_mut(&mut self, item_id: &str) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| e.item.id.as_str() == item_id)
    }
}

impl TryFrom<Vec<CartEntry>> for Cart {
    type Error = CartError;

    fn try_from(entries: Vec<CartEntry>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.item_id()) {
                return Err(CartError::DuplicateItem(entry.item_id().clone()));
            }
        }
        Ok(Self { entries })
    }
}

impl From<Cart> for Vec<CartEntry> {
    fn from(cart: Cart) -> Self {
        cart.entries
    }
}

/// Owned copy of a cart and its totals, handed to order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Entries in cart order.
    pub entries: Vec<CartEntry>,
    /// Sum of quantities.
    pub total_items: u64,
    /// Sum of line totals.
    pub total_price: Price,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        Self {
            entries: cart.entries.clone(),
            total_items: cart.total_item_count(),
            total_price: cart.total_price(),
        }
    }
}
