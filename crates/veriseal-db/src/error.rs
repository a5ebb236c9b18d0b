//! error type for the database layer.

/// errors produced by database operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// failed to connect to the database.
    #[error("database connection failed: {0}")]
    Connection(String),

    /// failed to run migrations.
    #[error("database migration failed: {0}")]
    Migration(String),

    /// a token with this value is already registered and active.
    #[error("token value is already registered")]
    DuplicateToken,

    /// a required field was blank or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// a location sighting was submitted with a blank location.
    #[error("location must not be blank")]
    EmptyLocation,

    /// the backing store call itself failed. no partial state change
    /// has happened: a failed consume has not removed the row.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}
