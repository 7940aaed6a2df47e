//! `menu cart` commands.
//!
//! The cart lives in `{data_dir}/menuApp_cart.json` and is reopened for each
//! command, so consecutive invocations keep adding to the same cart.

use std::path::Path;

use elena_menu_core::{CART_SLOT, CartEvent, CartStorage, CartStore, FileStorage};
use tracing::{info, warn};

use super::catalog::Catalog;
use crate::error::CliError;

/// Open the file-backed cart and attach the change announcer.
pub fn open_store(data_dir: &Path) -> CartStore<FileStorage> {
    let mut store = CartStore::open(FileStorage::new(data_dir), CART_SLOT);
    if let Some(err) = store.last_persistence_error() {
        warn!(error = %err, "Starting with an empty cart");
    }
    store.subscribe(announce);
    store
}

/// Short confirmation for each cart change.
fn announce(event: &CartEvent) {
    match event {
        CartEvent::ItemAdded { item_id, quantity } => {
            info!("+1 {item_id} (now {quantity})");
        }
        CartEvent::ItemRemoved { item_id } => info!("Removed {item_id}"),
        CartEvent::QuantityChanged { item_id, quantity } => {
            info!("{item_id} set to {quantity}");
        }
        CartEvent::Cleared => info!("Cart cleared"),
    }
}

/// Fail if the last change did not reach storage.
pub fn ensure_saved<S: CartStorage>(store: &CartStore<S>) -> Result<(), CliError> {
    store
        .last_persistence_error()
        .map_or(Ok(()), |err| Err(CliError::NotSaved(err.to_string())))
}

/// `menu cart show`
pub fn show<S: CartStorage>(store: &CartStore<S>) {
    if store.entries().is_empty() {
        info!("Your cart is empty");
        return;
    }

    for entry in store.entries() {
        let item = entry.item();
        info!(
            "{:<16} {:<24} {} × {} = {}",
            item.id.as_str(),
            item.name,
            item.price,
            entry.quantity(),
            entry.line_total()
        );
    }
    info!(
        "{} item(s), total {}",
        store.total_item_count(),
        store.total_price()
    );
}

/// `menu cart add <ID>`
///
/// # Errors
///
/// Returns error if the dish is not on the menu or the cart cannot be saved.
pub fn add<S: CartStorage>(
    store: &mut CartStore<S>,
    catalog: &Catalog,
    id: &str,
) -> Result<(), CliError> {
    let item = catalog
        .get(id)
        .ok_or_else(|| CliError::UnknownItem(id.to_string()))?;
    store.add_item(item.clone());
    ensure_saved(store)
}

/// `menu cart remove <ID>`
///
/// # Errors
///
/// Returns error if the cart cannot be saved.
pub fn remove<S: CartStorage>(store: &mut CartStore<S>, id: &str) -> Result<(), CliError> {
    if store.cart().get(id).is_none() {
        info!("{id} is not in your cart");
    }
    store.remove_item(id);
    ensure_saved(store)
}

/// `menu cart set <ID> <QUANTITY>`
///
/// # Errors
///
/// Returns error if the cart cannot be saved.
pub fn set<S: CartStorage>(
    store: &mut CartStore<S>,
    id: &str,
    quantity: i64,
) -> Result<(), CliError> {
    if store.cart().get(id).is_none() {
        info!("{id} is not in your cart");
    }
    store.set_quantity(id, quantity);
    ensure_saved(store)
}

/// `menu cart clear`
///
/// # Errors
///
/// Returns error if the cart cannot be saved.
pub fn clear<S: CartStorage>(store: &mut CartStore<S>) -> Result<(), CliError> {
    store.clear();
    ensure_saved(store)
}
