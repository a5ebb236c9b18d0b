//! core types for veriseal - a product authentication server.
//!
//! this crate provides the fundamental data structures used throughout veriseal:
//! - [`TokenValue`]: validated single-use token payload bound to a product unit
//! - [`Product`]: durable product identity, independent of any token's lifecycle
//! - [`Score`], [`LocationSighting`], [`Rating`]: provenance records
//! - [`VerifyOutcome`]: result of a verification attempt
//! - [`Config`]: application configuration

mod config;
mod outcome;
mod product;
mod provenance;
mod score;
mod token_value;

pub use config::{AdminConfig, Config, DatabaseConfig, SqliteConfig};
pub use outcome::{RejectReason, VerifyOutcome};
pub use product::{NewProduct, Product, ProductId};
pub use provenance::{LocationSighting, Rating};
pub use score::{Score, ScoreError};
pub use token_value::{Token, TokenValue, TokenValueError, GENERATED_TOKEN_PREFIX};
