//! database entity models for sea-orm.
//!
//! these entities map to database tables and handle conversion
//! to/from the domain types in veriseal-types.

pub mod location;
pub mod product;
pub mod rating;
pub mod token;
