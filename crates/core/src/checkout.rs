//! WhatsApp checkout: order references, message text and deep links.
//!
//! Checkout has no backend. The summary is rendered into a fixed-layout text
//! message, percent-encoded into a `wa.me` link, and the browser is sent there.
//! Nothing is confirmed or recorded beyond the generated link.

use core::fmt;
use core::str::FromStr;

use rand::Rng;
use serde::Serialize;

use crate::summary::OrderSummary;

/// Default deep-link host.
pub const WHATSAPP_LINK_BASE: &str = "https://wa.me";

/// Default business name used in the greeting line.
pub const DEFAULT_BUSINESS_NAME: &str = "T-The-Plug";

/// Default order reference prefix.
pub const DEFAULT_ORDER_PREFIX: &str = "TTP";

const ORDER_NUMBER_MIN: u32 = 10_000;
const ORDER_NUMBER_MAX: u32 = 99_999;

/// Errors raised when parsing an [`OrderReference`] or validating a prefix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderReferenceError {
    #[error("order reference must look like PREFIX-NNNNN")]
    MissingSeparator,
    #[error("invalid order prefix {0:?}: use ASCII letters and digits only")]
    InvalidPrefix(String),
    #[error("invalid order number {0:?}: expected five digits")]
    InvalidNumber(String),
}

/// Reference string embedded in a checkout message, e.g. `TTP-48213`.
///
/// References are random, not checked for uniqueness and not stored. They only
/// let staff match a WhatsApp message with the server log line written when
/// the link was generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OrderReference {
    prefix: String,
    number: u32,
}

impl OrderReference {
    /// Draw a new reference with a uniformly random five-digit number.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPrefix` if `prefix` is empty or not ASCII alphanumeric.
    pub fn generate<R: Rng>(prefix: &str, rng: &mut R) -> Result<Self, OrderReferenceError> {
        validate_prefix(prefix)?;
        Ok(Self {
            prefix: prefix.to_owned(),
            number: rng.random_range(ORDER_NUMBER_MIN..=ORDER_NUMBER_MAX),
        })
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }
}

impl fmt::Display for OrderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:05}", self.prefix, self.number)
    }
}

impl FromStr for OrderReference {
    type Err = OrderReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, digits) = s
            .split_once('-')
            .ok_or(OrderReferenceError::MissingSeparator)?;
        validate_prefix(prefix)?;

        if digits.len() != 5 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OrderReferenceError::InvalidNumber(digits.to_owned()));
        }
        let number = digits
            .parse::<u32>()
            .map_err(|_| OrderReferenceError::InvalidNumber(digits.to_owned()))?;

        Ok(Self {
            prefix: prefix.to_owned(),
            number,
        })
    }
}

/// Check that an order prefix is non-empty ASCII alphanumeric.
///
/// # Errors
///
/// Returns `InvalidPrefix` otherwise.
pub fn validate_prefix(prefix: &str) -> Result<(), OrderReferenceError> {
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(OrderReferenceError::InvalidPrefix(prefix.to_owned()));
    }
    Ok(())
}

/// Store-wide checkout settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    /// Name used in the greeting line.
    pub business_name: String,
    /// WhatsApp number in international format, digits only.
    pub recipient: String,
    /// Order reference prefix.
    pub order_prefix: String,
    /// Deep-link host, normally [`WHATSAPP_LINK_BASE`].
    pub link_base: String,
}

impl CheckoutSettings {
    /// Settings with the default greeting, prefix and link host.
    #[must_use]
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            business_name: DEFAULT_BUSINESS_NAME.to_owned(),
            recipient: recipient.into(),
            order_prefix: DEFAULT_ORDER_PREFIX.to_owned(),
            link_base: WHATSAPP_LINK_BASE.to_owned(),
        }
    }

    /// Link to open a plain chat with the store.
    #[must_use]
    pub fn contact_link(&self) -> String {
        format!("{}/{}", self.link_base.trim_end_matches('/'), self.recipient)
    }
}

/// Render the checkout message for a summary.
///
/// Layout, one item line per retained summary line:
///
/// ```text
/// Hi T-The-Plug! I'd like to place an order.
/// Order ID: TTP-12345
/// Items:
/// - Oreo Overload (x2)
/// Total: GHS 70.00
/// ```
#[must_use]
pub fn compose_message(
    summary: &OrderSummary,
    reference: &OrderReference,
    business_name: &str,
) -> String {
    let mut lines = Vec::with_capacity(summary.lines().len() + 4);
    lines.push(format!("Hi {business_name}! I'd like to place an order."));
    lines.push(format!("Order ID: {reference}"));
    lines.push("Items:".to_owned());
    lines.extend(
        summary
            .lines()
            .iter()
            .map(|line| format!("- {} (x{})", line.name, line.quantity)),
    );
    lines.push(format!("Total: {}", summary.display_total()));
    lines.join("\n")
}

/// Build `<base>/<recipient>?text=<percent-encoded message>`.
#[must_use]
pub fn whatsapp_link(link_base: &str, recipient: &str, message: &str) -> String {
    format!(
        "{}/{}?text={}",
        link_base.trim_end_matches('/'),
        recipient,
        urlencoding::encode(message)
    )
}

/// Everything produced by a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    pub reference: OrderReference,
    pub message: String,
    pub url: String,
}

/// Prepare a checkout for `summary`.
///
/// Returns `Ok(None)` when the summary has no lines; an empty cart never
/// produces a link.
///
/// # Errors
///
/// Returns `InvalidPrefix` if the configured order prefix is malformed.
pub fn prepare_checkout<R: Rng>(
    summary: &OrderSummary,
    settings: &CheckoutSettings,
    rng: &mut R,
) -> Result<Option<CheckoutRequest>, OrderReferenceError> {
    if summary.is_empty() {
        return Ok(None);
    }

    let reference = OrderReference::generate(&settings.order_prefix, rng)?;
    let message = compose_message(summary, &reference, &settings.business_name);
    let url = whatsapp_link(&settings.link_base, &settings.recipient, &message);

    Ok(Some(CheckoutRequest {
        reference,
        message,
        url,
    }))
}
