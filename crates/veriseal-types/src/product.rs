//! durable product identity.
//!
//! a product identity carries the human-facing attributes of one
//! physical unit. provenance rows key off the product identity, so it
//! must outlive the token that originally authenticated the unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// unique product identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct ProductId(pub u64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a registered product identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// unique identifier.
    pub id: ProductId,

    /// human-facing product name.
    pub name: String,

    /// when the unit was manufactured.
    pub manufacture_date: Option<DateTime<Utc>>,

    /// when the unit expires.
    pub expiry_date: Option<DateTime<Utc>>,

    /// free-text descriptive notes.
    pub notes: Option<String>,

    /// optional label/product image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<u8>>,

    /// when this identity was registered.
    pub created_at: DateTime<Utc>,
}

/// attributes for a product identity about to be registered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProduct {
    /// human-facing product name. must not be blank.
    pub name: String,

    /// when the unit was manufactured.
    #[serde(default)]
    pub manufacture_date: Option<DateTime<Utc>>,

    /// when the unit expires.
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,

    /// free-text descriptive notes.
    #[serde(default)]
    pub notes: Option<String>,

    /// optional label/product image.
    #[serde(default)]
    pub image: Option<Vec<u8>>,
}

impl NewProduct {
    /// create a new product description with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named() {
        let p = NewProduct::named("Cola-500ml");
        assert_eq!(p.name, "Cola-500ml");
        assert!(p.manufacture_date.is_none());
        assert!(p.notes.is_none());
    }

    #[test]
    fn test_product_serializes_without_empty_image() {
        let product = Product {
            id: ProductId(1),
            name: "Cola-500ml".to_string(),
            manufacture_date: None,
            expiry_date: None,
            notes: None,
            image: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("image").is_none());
        assert_eq!(json["name"], "Cola-500ml");
    }
}
