//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SERVER_HOST` - Bind address (default: 127.0.0.1)
//! - `SERVER_PORT` - Listen port (default: 5000)
//! - `APP_ENV` - Environment name reported by `/api/test` (default: development)
//! - `EMAIL_PASS` - SMTP password / authorization code; email is disabled when unset
//! - `SMTP_HOST` - SMTP server (default: smtp.qq.com)
//! - `SMTP_PORT` - SMTP port (default: 465, implicit TLS; other ports use STARTTLS)
//! - `SMTP_USERNAME` - SMTP login, required when `EMAIL_PASS` is set
//! - `EMAIL_FROM` - Sender mailbox (default: `SMTP_USERNAME`)
//! - `EMAIL_FROM_NAME` - Sender display name (default: Elena's Menu)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_SMTP_HOST: &str = "smtp.qq.com";
const DEFAULT_SMTP_PORT: &str = "465";
const DEFAULT_FROM_NAME: &str = "Elena's Menu";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Environment name (development, production, ...)
    pub environment: String,
    /// SMTP settings; `None` disables confirmation emails
    pub email: Option<EmailConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// SMTP configuration for order confirmation emails.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct EmailConfig {
    /// SMTP server hostname
    pub smtp_host: String,
    /// SMTP server port
    pub smtp_port: u16,
    /// SMTP authentication username
    pub smtp_username: String,
    /// SMTP password or provider authorization code
    pub smtp_password: SecretString,
    /// Sender mailbox address
    pub from_address: String,
    /// Sender display name
    pub from_name: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .field("from_name", &self.from_name)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if
    /// `EMAIL_PASS` is set without `SMTP_USERNAME`.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("SERVER_HOST", "127.0.0.1")?;
        let port = parse_env("SERVER_PORT", "5000")?;
        let environment = get_env_or_default("APP_ENV", "development");
        let email = EmailConfig::from_env()?;

        Ok(Self {
            host,
            port,
            environment,
            email,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl EmailConfig {
    /// Email is enabled only when `EMAIL_PASS` is set.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(password) = get_optional_env("EMAIL_PASS") else {
            return Ok(None);
        };

        let smtp_username = get_required_env("SMTP_USERNAME")?;
        let from_address =
            get_optional_env("EMAIL_FROM").unwrap_or_else(|| smtp_username.clone());

        Ok(Some(Self {
            smtp_host: get_env_or_default("SMTP_HOST", DEFAULT_SMTP_HOST),
            smtp_port: parse_env("SMTP_PORT", DEFAULT_SMTP_PORT)?,
            smtp_username,
            smtp_password: SecretString::from(password),
            from_address,
            from_name: get_env_or_default("EMAIL_FROM_NAME", DEFAULT_FROM_NAME),
        }))
    }

    /// Port 465 speaks TLS from the first byte; anything else upgrades via STARTTLS.
    #[must_use]
    pub const fn implicit_tls(&self) -> bool {
        self.smtp_port == 465
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    get_optional_env(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
