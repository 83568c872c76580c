//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_WHATSAPP_NUMBER` - Order recipient in international format, digits only
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: <http://localhost:3000>)
//! - `STOREFRONT_CATALOG_PATH` - Product catalog JSON (default: crates/storefront/content/catalog.json)
//! - `STOREFRONT_STATIC_DIR` - Stylesheet directory (default: crates/storefront/static)
//! - `STOREFRONT_WHATSAPP_DISPLAY_NUMBER` - Number shown on pages (default: `+<number>`)
//! - `STOREFRONT_BUSINESS_NAME` - Greeting name in the order message (default: T-The-Plug)
//! - `STOREFRONT_ORDER_PREFIX` - Order reference prefix (default: TTP)
//! - `STOREFRONT_CURRENCY` - ISO 4217 code for prices (default: GHS)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use ttp_core::checkout::{self, CheckoutSettings, WHATSAPP_LINK_BASE};
use ttp_core::CurrencyCode;
use url::Url;

const DEFAULT_CATALOG_PATH: &str = "crates/storefront/content/catalog.json";
const DEFAULT_STATIC_DIR: &str = "crates/storefront/static";

/// E.164 numbers carry at most 15 digits.
const MAX_PHONE_DIGITS: usize = 15;
const MIN_PHONE_DIGITS: usize = 7;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Product catalog file
    pub catalog_path: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Currency all catalog prices are quoted in
    pub currency: CurrencyCode,
    /// WhatsApp checkout configuration
    pub whatsapp: WhatsAppConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

/// WhatsApp checkout configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppConfig {
    /// Recipient number, digits only (e.g. 233201234567)
    pub number: String,
    /// Human-friendly number shown on the cart page
    pub display_number: String,
    /// Name used in the order message greeting
    pub business_name: String,
    /// Order reference prefix
    pub order_prefix: String,
    /// Deep-link host
    pub link_base: String,
}

impl WhatsAppConfig {
    /// Settings consumed by the checkout builder.
    #[must_use]
    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            business_name: self.business_name.clone(),
            recipient: self.number.clone(),
            order_prefix: self.order_prefix.clone(),
            link_base: self.link_base.clone(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let host = env
            .or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| invalid("STOREFRONT_HOST", e))?;
        let port = env
            .or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| invalid("STOREFRONT_PORT", e))?;
        let base_url = Url::parse(&env.or_default("STOREFRONT_BASE_URL", "http://localhost:3000"))
            .map_err(|e| invalid("STOREFRONT_BASE_URL", e))?;
        let currency = env
            .or_default("STOREFRONT_CURRENCY", CurrencyCode::default().code())
            .parse::<CurrencyCode>()
            .map_err(|e| invalid("STOREFRONT_CURRENCY", e))?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog_path: env.or_default("STOREFRONT_CATALOG_PATH", DEFAULT_CATALOG_PATH).into(),
            static_dir: env.or_default("STOREFRONT_STATIC_DIR", DEFAULT_STATIC_DIR).into(),
            currency,
            whatsapp: WhatsAppConfig::from_env(&env)?,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_sample_rate(&env, "SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_sample_rate(&env, "SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (enables secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

impl WhatsAppConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let number = env.required("STOREFRONT_WHATSAPP_NUMBER")?;
        validate_phone_number(&number)
            .map_err(|reason| ConfigError::InvalidEnvVar("STOREFRONT_WHATSAPP_NUMBER".to_string(), reason))?;

        let order_prefix = env.or_default("STOREFRONT_ORDER_PREFIX", checkout::DEFAULT_ORDER_PREFIX);
        checkout::validate_prefix(&order_prefix).map_err(|e| invalid("STOREFRONT_ORDER_PREFIX", e))?;

        Ok(Self {
            display_number: env
                .optional("STOREFRONT_WHATSAPP_DISPLAY_NUMBER")
                .unwrap_or_else(|| format!("+{number}")),
            number,
            business_name: env.or_default("STOREFRONT_BUSINESS_NAME", checkout::DEFAULT_BUSINESS_NAME),
            order_prefix,
            link_base: WHATSAPP_LINK_BASE.to_string(),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with required/optional/default accessors.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

fn invalid(key: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

/// Check that a WhatsApp number is plain international digits.
fn validate_phone_number(number: &str) -> Result<(), String> {
    if !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err("must contain digits only (no '+', spaces or dashes)".to_string());
    }
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&number.len()) {
        return Err(format!(
            "must have {MIN_PHONE_DIGITS}-{MAX_PHONE_DIGITS} digits (got {})",
            number.len()
        ));
    }
    Ok(())
}

fn parse_sample_rate(env: &Env<'_>, key: &str, default: &str) -> Result<f32, ConfigError> {
    let rate = env
        .or_default(key, default)
        .parse::<f32>()
        .map_err(|e| invalid(key, e))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(invalid(key, "must be between 0.0 and 1.0"));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("STOREFRONT_WHATSAPP_NUMBER", "233201234567")]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.currency, CurrencyCode::GHS);
        assert_eq!(config.catalog_path, PathBuf::from(DEFAULT_CATALOG_PATH));
        assert_eq!(config.whatsapp.display_number, "+233201234567");
        assert_eq!(config.whatsapp.business_name, "T-The-Plug");
        assert_eq!(config.whatsapp.order_prefix, "TTP");
        assert!(!config.is_secure());
        assert!(config.sentry_dsn.is_none());
        assert!((config.sentry_sample_rate - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_number() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "STOREFRONT_WHATSAPP_NUMBER"));
    }

    #[test]
    fn test_blank_number_counts_as_missing() {
        let err = load(&[("STOREFRONT_WHATSAPP_NUMBER", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn test_rejects_formatted_number() {
        let err = load(&[("STOREFRONT_WHATSAPP_NUMBER", "+233 20 123 4567")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_WHATSAPP_NUMBER"));
    }

    #[test]
    fn test_rejects_short_number() {
        assert!(load(&[("STOREFRONT_WHATSAPP_NUMBER", "12345")]).is_err());
    }

    #[test]
    fn test_rejects_bad_prefix() {
        let err = load(&[
            ("STOREFRONT_WHATSAPP_NUMBER", "233201234567"),
            ("STOREFRONT_ORDER_PREFIX", "TT P"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_ORDER_PREFIX"));
    }

    #[test]
    fn test_rejects_bad_port_and_currency() {
        assert!(load(&[
            ("STOREFRONT_WHATSAPP_NUMBER", "233201234567"),
            ("STOREFRONT_PORT", "http"),
        ])
        .is_err());
        assert!(load(&[
            ("STOREFRONT_WHATSAPP_NUMBER", "233201234567"),
            ("STOREFRONT_CURRENCY", "DOGE"),
        ])
        .is_err());
    }

    #[test]
    fn test_rejects_out_of_range_sample_rate() {
        let err = load(&[
            ("STOREFRONT_WHATSAPP_NUMBER", "233201234567"),
            ("SENTRY_TRACES_SAMPLE_RATE", "1.5"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "SENTRY_TRACES_SAMPLE_RATE"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_WHATSAPP_NUMBER", "233201234567"),
            ("STOREFRONT_WHATSAPP_DISPLAY_NUMBER", "+233 20 123 4567"),
            ("STOREFRONT_BASE_URL", "https://tthe-plug.com"),
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_ORDER_PREFIX", "TTP2"),
            ("STOREFRONT_CURRENCY", "usd"),
        ])
        .unwrap();

        assert!(config.is_secure());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.whatsapp.display_number, "+233 20 123 4567");
        assert_eq!(config.currency, CurrencyCode::USD);

        let settings = config.whatsapp.checkout_settings();
        assert_eq!(settings.order_prefix, "TTP2");
        assert_eq!(settings.recipient, "233201234567");
        assert_eq!(settings.contact_link(), "https://wa.me/233201234567");
    }
}
