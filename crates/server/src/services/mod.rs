//! Services behind the route handlers.
//!
//! - [`order_book`] - In-memory order list
//! - [`email`] - Order confirmation email via SMTP

pub mod email;
pub mod order_book;

pub use email::{EmailError, OrderMailer, OrderSummary};
pub use order_book::{OrderBook, StoredOrder};
