//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::email::{EmailError, OrderMailer};
use crate::services::order_book::OrderBook;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the order list, the mailer and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    orders: OrderBook,
    mailer: Option<OrderMailer>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// A mailer is built only when `config.email` is present.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP configuration is invalid.
    pub fn new(config: ServerConfig) -> Result<Self, EmailError> {
        let mailer = config.email.as_ref().map(OrderMailer::new).transpose()?;

        if mailer.is_none() {
            tracing::warn!("EMAIL_PASS not set; order confirmation emails are disabled");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                orders: OrderBook::new(),
                mailer,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the in-memory order list.
    #[must_use]
    pub fn orders(&self) -> &OrderBook {
        &self.inner.orders
    }

    /// Get the confirmation mailer, if email is configured.
    #[must_use]
    pub fn mailer(&self) -> Option<&OrderMailer> {
        self.inner.mailer.as_ref()
    }
}
