//! http handlers for veriseal api endpoints.

mod admin_auth;
mod error;
mod health;
mod products;
mod provenance;
mod verify;

pub use admin_auth::{AdminAuthError, AdminContext, hash_token};
pub use error::ApiError;
pub use health::health;
pub use products::{list_tokens, register_product};
pub use provenance::{attach_location, attach_rating, product_rating, search_locations};
pub use verify::{scan, verify};
