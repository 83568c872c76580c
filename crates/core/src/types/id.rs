//! Product identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProductId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductIdError {
    /// The input string is empty or only whitespace.
    #[error("product id cannot be empty")]
    Empty,
    /// The input has leading or trailing whitespace.
    #[error("product id cannot start or end with whitespace")]
    SurroundingWhitespace,
    /// The input string is too long.
    #[error("product id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// Identifier of a catalog product (e.g. `oreo-delight`).
///
/// Cart entries hold a `ProductId` rather than a copy of the product, so an
/// id may outlive the product it names. Anything a client posts is accepted
/// via [`ProductId::new`]; [`ProductId::parse`] is for sources that must be
/// well-formed, such as the catalog file.
///
/// ```
/// use ttp_core::ProductId;
///
/// assert!(ProductId::parse("lotus-biscoff").is_ok());
/// assert!(ProductId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Maximum length of a well-formed product id.
    pub const MAX_LENGTH: usize = 128;

    /// Wrap any string as a product id without validation.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a well-formed product id.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank, has surrounding whitespace, or
    /// is longer than [`Self::MAX_LENGTH`].
    pub fn parse(s: &str) -> Result<Self, ProductIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ProductIdError::Empty);
        }
        if trimmed.len() != s.len() {
            return Err(ProductIdError::SurroundingWhitespace);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(ProductIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(s.to_owned()))
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_slug() {
        let id = ProductId::parse("oreo-delight").unwrap();
        assert_eq!(id.as_str(), "oreo-delight");
    }

    #[test]
    fn test_parse_rejects_surrounding_whitespace() {
        assert_eq!(
            ProductId::parse("  oreo-delight "),
            Err(ProductIdError::SurroundingWhitespace)
        );
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(ProductId::parse(""), Err(ProductIdError::Empty));
        assert_eq!(ProductId::parse(" \t"), Err(ProductIdError::Empty));
    }

    #[test]
    fn test_parse_rejects_too_long() {
        let long = "x".repeat(ProductId::MAX_LENGTH + 1);
        assert!(matches!(
            ProductId::parse(&long),
            Err(ProductIdError::TooLong { .. })
        ));
    }

    #[test]
    fn test_new_accepts_anything() {
        let id = ProductId::new("");
        assert_eq!(id.as_str(), "");
    }

    #[test]
    fn test_serde_transparent() {
        let id = ProductId::new("lotus-biscoff");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"lotus-biscoff\"");
        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
