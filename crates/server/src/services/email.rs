//! Order confirmation email.
//!
//! Uses SMTP via lettre for delivery with Askama templates rendered as
//! plain text and HTML alternatives.

use askama::Template;
use elena_menu_core::{Email, Price};
use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use crate::config::EmailConfig;

const SUBJECT: &str = "Your order is confirmed - Elena's Menu";

/// HTML template for the order confirmation.
#[derive(Template)]
#[template(path = "email/order_confirmation.html")]
struct OrderConfirmationHtml<'a> {
    order_id: Option<&'a str>,
    lines: &'a [SummaryLine],
    total: Price,
}

/// Plain text template for the order confirmation.
#[derive(Template)]
#[template(path = "email/order_confirmation.txt")]
struct OrderConfirmationText<'a> {
    order_id: Option<&'a str>,
    lines: &'a [SummaryLine],
    total: Price,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// The part of an order the confirmation email needs.
///
/// Deserialized leniently from the client's `orderData`: unknown fields are
/// ignored and the total may arrive as `total` or `totalPrice`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub items: Vec<SummaryLine>,
    #[serde(default)]
    pub total: Option<Price>,
    #[serde(default)]
    pub total_price: Option<Price>,
}

/// One dish in the email.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryLine {
    pub name: String,
    pub price: Price,
    pub quantity: u32,
}

impl SummaryLine {
    /// `price * quantity`, saturating at [`Price::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

impl OrderSummary {
    /// The amount shown as the order total.
    ///
    /// A zero or missing `total` falls back to `totalPrice`, then to zero.
    #[must_use]
    pub fn total(&self) -> Price {
        self.total
            .filter(|total| !total.is_zero())
            .or(self.total_price)
            .unwrap_or(Price::ZERO)
    }

    /// Render the (text, html) bodies.
    ///
    /// # Errors
    ///
    /// Returns error if a template fails to render.
    pub fn render(&self) -> Result<(String, String), EmailError> {
        let order_id = self.id.as_deref();
        let total = self.total();

        let text = OrderConfirmationText {
            order_id,
            lines: &self.items,
            total,
        }
        .render()?;
        let html = OrderConfirmationHtml {
            order_id,
            lines: &self.items,
            total,
        }
        .render()?;

        Ok((text, html))
    }
}

/// Sends order confirmations over SMTP.
#[derive(Clone)]
pub struct OrderMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for OrderMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderMailer")
            .field("from", &self.from.to_string())
            .finish_non_exhaustive()
    }
}

impl OrderMailer {
    /// Create a mailer from configuration.
    ///
    /// No connection is made until the first message is sent.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be set up or the sender address
    /// is invalid.
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let builder = if config.implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        };

        let mailer = builder
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        let address: Address = config
            .from_address
            .parse()
            .map_err(|_| EmailError::InvalidAddress(config.from_address.clone()))?;

        Ok(Self {
            mailer,
            from: Mailbox::new(Some(config.from_name.clone()), address),
        })
    }

    /// Send the confirmation for `order` to `to`.
    ///
    /// # Errors
    ///
    /// Returns error if the email fails to send or a template fails to render.
    pub async fn send_order_confirmation(
        &self,
        to: &Email,
        order: &OrderSummary,
    ) -> Result<(), EmailError> {
        let (text, html) = order.render()?;
        self.send_multipart_email(to, SUBJECT, &text, &html).await
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        to: &Email,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(to
                .as_str()
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}
