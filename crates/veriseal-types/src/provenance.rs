//! append-only provenance records.
//!
//! provenance rows reference a product identity, never a token. a row
//! whose originating token has been consumed is expected, not an
//! integrity violation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::product::ProductId;
use crate::score::Score;

/// a location where a verified product surfaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSighting {
    /// unique identifier.
    pub id: u64,

    /// the product identity this sighting is attached to.
    pub product_id: ProductId,

    /// free-text location description.
    pub location: String,

    /// when the sighting was recorded.
    pub created_at: DateTime<Utc>,
}

/// a consumer rating for a verified product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    /// unique identifier.
    pub id: u64,

    /// the product identity this rating is attached to.
    pub product_id: ProductId,

    /// the rating score (1..=5).
    pub score: Score,

    /// when the rating was recorded.
    pub created_at: DateTime<Utc>,
}
