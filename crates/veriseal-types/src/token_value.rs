//! validated single-use token payload.
//!
//! token values are opaque strings chosen by the registrant and encoded
//! into the QR symbol. the only structural requirement is non-emptiness
//! after trimming; everything else is up to whoever prints the labels.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::product::ProductId;

/// prefix used for server-generated token values.
pub const GENERATED_TOKEN_PREFIX: &str = "vrs-";

/// number of random bytes in a generated token (48 hex chars).
const GENERATED_TOKEN_BYTES: usize = 24;

/// a validated token value.
///
/// token values are guaranteed non-empty and free of leading/trailing
/// whitespace. they are globally unique among active tokens, but that
/// invariant lives in the store, not here.
///
/// # Example
/// ```
/// use veriseal_types::TokenValue;
///
/// let token: TokenValue = "QR-001".parse().unwrap();
/// assert_eq!(token.as_str(), "QR-001");
/// assert!("   ".parse::<TokenValue>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenValue(String);

impl TokenValue {
    /// create a new token value, rejecting blank input.
    ///
    /// surrounding whitespace is trimmed before validation so that
    /// `" QR-001 "` and `"QR-001"` name the same token.
    pub fn new(s: impl Into<String>) -> Result<Self, TokenValueError> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TokenValueError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// generate a new random token value (`vrs-` + 48 hex chars).
    pub fn generate() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        let bytes: [u8; GENERATED_TOKEN_BYTES] = rng.random();
        Self(format!("{}{}", GENERATED_TOKEN_PREFIX, hex::encode(bytes)))
    }

    /// get the full token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// consume the value and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// get a short prefix for display in logs.
    ///
    /// token values are single-use credentials; logging the full value
    /// would let anyone reading the logs replay a not-yet-scanned code.
    pub fn prefix(&self) -> String {
        let head: String = self.0.chars().take(8).collect();
        if head.len() < self.0.len() {
            format!("{}…", head)
        } else {
            head
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenValue {
    type Err = TokenValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TokenValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// error type for invalid token values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenValueError {
    /// token value is empty or whitespace-only.
    #[error("token value must not be blank")]
    Empty,
}

// serde implementation - deserialize with validation
impl<'de> Deserialize<'de> for TokenValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for TokenValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

/// an active token row: a token value bound to a product identity.
///
/// tokens exist exactly from registration until their first successful
/// verification consumes them; they are never updated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// unique identifier (also the registration order).
    pub id: u64,

    /// the payload encoded in the QR symbol.
    pub value: TokenValue,

    /// the product unit this token authenticates.
    pub product_id: ProductId,

    /// when this token was registered.
    pub created_at: DateTime<Utc>,
}
