//! Elena's Menu Core - menu, cart and order types.
//!
//! This crate is shared by every Elena's Menu component:
//! - `server` - Order list and confirmation email API
//! - `cli` - The `menu` command, a terminal front end for browsing and ordering
//!
//! # Architecture
//!
//! The cart lives here. [`CartStore`] owns the cart, applies the four cart
//! operations (add, remove, set quantity, clear), and mirrors the result into
//! a [`CartStorage`] slot after each one. Storage is injected, so the same
//! store runs against files, memory, or a test double. No networking happens
//! in this crate.
//!
//! # Modules
//!
//! - [`types`] - Validated wrappers for IDs, prices and emails
//! - [`menu`] - Catalog entries
//! - [`cart`] - Cart aggregate, store and change events
//! - [`storage`] - Slot storage trait and backends
//! - [`order`] - Order payloads built from a cart snapshot

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod menu;
pub mod order;
pub mod storage;
pub mod types;

pub use cart::{
    CART_SLOT, Cart, CartEntry, CartError, CartEvent, CartSnapshot, CartStore, PersistenceError,
    SubscriptionId,
};
pub use menu::MenuItem;
pub use order::{OrderData, OrderError, OrderLine, OrderNumber};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use types::*;
