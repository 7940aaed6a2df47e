//! CLI error type.

use elena_menu_core::{EmailError, OrderError};
use thiserror::Error;

use crate::commands::catalog::CatalogError;

/// Errors that abort a `menu` command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The catalog file could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// No dish with this id in the catalog.
    #[error("no dish with id '{0}' on the menu")]
    UnknownItem(String),

    /// The cart cannot be turned into an order.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The recipient address is malformed.
    #[error("invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The order server could not be reached.
    #[error("request to order server failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The order server answered with an error.
    #[error("order server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The cart changed in memory but could not be saved.
    #[error("cart was not saved: {0}")]
    NotSaved(String),
}
