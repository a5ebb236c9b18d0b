//! database layer for veriseal.
//!
//! this crate provides persistent storage for:
//! - Products (durable identities)
//! - Tokens (single-use, physically deleted on consumption)
//! - Locations and Ratings (append-only provenance)
//!
//! the one operation with real concurrency teeth is [`Database::consume_token`]:
//! verification and consumption are a single atomic check-and-delete, never a
//! check followed by a delete.

#![warn(missing_docs)]

mod entity;
mod error;
mod migration;

pub use error::Error;

use std::future::Future;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database as SeaOrmDatabase, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait,
    sea_query::{Expr, Func},
};
use sea_orm_migration::MigratorTrait;

use veriseal_types::{
    Config, LocationSighting, NewProduct, Product, ProductId, Rating, Score, Token, TokenValue,
};

/// result type for database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// database trait for veriseal storage operations.
///
/// this trait abstracts over different database backends (sqlite, postgresql).
/// token rows are physically removed on consumption; provenance rows are
/// append-only and are never touched again after insertion.
pub trait Database: Send + Sync {
    // ─── Health Check ─────────────────────────────────────────────────────────

    /// ping the database to verify connectivity.
    fn ping(&self) -> impl Future<Output = Result<()>> + Send;

    // ─── Registration ─────────────────────────────────────────────────────────

    /// register a product identity and bind a fresh token to it.
    ///
    /// the product row and the token row are written in one transaction:
    /// a duplicate token value returns [`Error::DuplicateToken`] and leaves
    /// no orphan product behind. the duplicate check rides on the unique
    /// index, so two concurrent registrations of the same value cannot
    /// both succeed.
    fn register_product(
        &self,
        product: &NewProduct,
        token_value: &TokenValue,
    ) -> impl Future<Output = Result<(Product, Token)>> + Send;

    // ─── Verification ─────────────────────────────────────────────────────────

    /// atomically consume a token if it is present.
    ///
    /// if a row with this value exists, remove it and return the bound
    /// product identity; otherwise return `None`. across all concurrent
    /// calls for the same value, at most one returns `Some`. a returned
    /// error means the row was not removed.
    fn consume_token(
        &self,
        value: &TokenValue,
    ) -> impl Future<Output = Result<Option<ProductId>>> + Send;

    /// check whether a token value is currently active.
    ///
    /// administrative read only. never use this in the verification path:
    /// an exists check followed by a delete reintroduces the double-spend
    /// race that [`Database::consume_token`] exists to prevent.
    fn token_exists(&self, value: &TokenValue) -> impl Future<Output = Result<bool>> + Send;

    /// list all active tokens with their products, in registration order.
    fn list_active_tokens(&self) -> impl Future<Output = Result<Vec<(Product, Token)>>> + Send;

    /// get a product identity by id. products outlive their tokens.
    fn get_product(&self, id: ProductId)
    -> impl Future<Output = Result<Option<Product>>> + Send;

    // ─── Provenance ───────────────────────────────────────────────────────────

    /// append a location sighting for a product identity.
    ///
    /// the caller is responsible for only passing product ids obtained
    /// from a successful verification; no token re-check happens here
    /// (the token is usually gone already, by design).
    fn add_location(
        &self,
        product_id: ProductId,
        location: &str,
    ) -> impl Future<Output = Result<LocationSighting>> + Send;

    /// append a rating for a product identity.
    fn add_rating(
        &self,
        product_id: ProductId,
        score: Score,
    ) -> impl Future<Output = Result<Rating>> + Send;

    /// search location sightings by case-insensitive substring.
    fn search_locations(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<LocationSighting>>> + Send;

    /// list all ratings for a product identity.
    fn list_ratings(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<Vec<Rating>>> + Send;

    /// arithmetic mean of all ratings for a product identity.
    ///
    /// `None` when no ratings exist. never reported as 0.
    fn average_rating(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<Option<f64>>> + Send;
}

/// the main database implementation using sea-orm.
#[derive(Clone)]
pub struct VerisealDb {
    conn: DatabaseConnection,
}

impl VerisealDb {
    /// create a new database connection from config and run migrations.
    pub async fn new(config: &Config) -> Result<Self> {
        let url = Self::build_connection_url(&config.database)?;
        let conn: DatabaseConnection = SeaOrmDatabase::connect(&url)
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let db = Self { conn };

        // enable WAL mode for sqlite if configured
        if config.database.db_type == "sqlite" && config.database.sqlite.write_ahead_log {
            db.enable_wal_mode().await?;
        }

        db.migrate().await?;
        Ok(db)
    }

    /// enable write-ahead logging mode for sqlite.
    ///
    /// WAL mode allows concurrent reads during writes. must be called
    /// before any writes.
    async fn enable_wal_mode(&self) -> Result<()> {
        use sea_orm::ConnectionTrait;
        self.conn
            .execute_unprepared("PRAGMA journal_mode=WAL")
            .await
            .map_err(|e| Error::Connection(format!("failed to enable WAL mode: {}", e)))?;
        tracing::info!("sqlite WAL mode enabled");
        Ok(())
    }

    /// get the current sqlite journal mode.
    #[cfg(test)]
    async fn get_journal_mode(&self) -> Result<String> {
        use sea_orm::{ConnectionTrait, FromQueryResult};

        #[derive(FromQueryResult)]
        struct JournalMode {
            journal_mode: String,
        }

        let result = self
            .conn
            .query_one(sea_orm::Statement::from_string(
                sea_orm::DatabaseBackend::Sqlite,
                "PRAGMA journal_mode".to_string(),
            ))
            .await
            .map_err(|e| Error::Connection(e.to_string()))?
            .map(|row| JournalMode::from_query_result(&row, ""));

        match result {
            Some(Ok(mode)) => Ok(mode.journal_mode),
            Some(Err(e)) => Err(Error::Connection(e.to_string())),
            None => Ok(String::new()),
        }
    }

    /// build a sea-orm compatible connection url from config.
    fn build_connection_url(config: &veriseal_types::DatabaseConfig) -> Result<String> {
        match config.db_type.as_str() {
            "sqlite" => {
                let path = if config.connection_string.starts_with("sqlite:") {
                    config.connection_string.clone()
                } else {
                    format!("sqlite:{}", config.connection_string)
                };
                // add ?mode=rwc to create the file if it doesn't exist
                if path.contains('?') {
                    Ok(path)
                } else {
                    Ok(format!("{}?mode=rwc", path))
                }
            }
            "postgres" | "postgresql" => Ok(config.connection_string.clone()),
            other => Err(Error::InvalidInput(format!(
                "unsupported database type: {}",
                other
            ))),
        }
    }

    /// create an in-memory sqlite database for testing.
    pub async fn new_in_memory() -> Result<Self> {
        let conn: DatabaseConnection = SeaOrmDatabase::connect("sqlite::memory:")
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let db = Self { conn };
        db.migrate().await?;
        Ok(db)
    }

    /// run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        migration::Migrator::up(&self.conn, None)
            .await
            .map_err(|e| Error::Migration(e.to_string()))?;
        Ok(())
    }
}

impl Database for VerisealDb {
    async fn ping(&self) -> Result<()> {
        use sea_orm::ConnectionTrait;
        self.conn
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;
        Ok(())
    }

    async fn register_product(
        &self,
        product: &NewProduct,
        token_value: &TokenValue,
    ) -> Result<(Product, Token)> {
        if product.name.trim().is_empty() {
            return Err(Error::InvalidInput("product name must not be blank".into()));
        }

        let txn = self.conn.begin().await?;

        let product_model: entity::product::ActiveModel = product.into();
        let product_row = product_model.insert(&txn).await?;
        let product: Product = product_row.into();

        let token_model = entity::token::new_row(token_value, product.id);
        let token_row = match token_model.insert(&txn).await {
            Ok(row) => row,
            // unique index hit: another active token holds this value.
            // the transaction rolls back on drop, so no orphan product.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(Error::DuplicateToken);
            }
            Err(e) => return Err(e.into()),
        };

        txn.commit().await?;

        let token = token_row.into_token()?;
        tracing::debug!(
            product_id = %token.product_id,
            token = %token.value.prefix(),
            "registered product token"
        );
        Ok((product, token))
    }

    async fn consume_token(&self, value: &TokenValue) -> Result<Option<ProductId>> {
        // the binding is immutable, so reading it first is safe; the
        // conditional DELETE below is the linearization point. it is
        // keyed by the row id, not the value: a consumed value may be
        // re-registered as a new row, and deleting by value here could
        // destroy that fresh binding while reporting the stale one.
        let Some(row) = entity::token::Entity::find()
            .filter(entity::token::Column::Value.eq(value.as_str()))
            .one(&self.conn)
            .await?
        else {
            return Ok(None);
        };

        let result = entity::token::Entity::delete_many()
            .filter(entity::token::Column::Id.eq(row.id))
            .exec(&self.conn)
            .await?;

        if result.rows_affected == 0 {
            // another caller consumed the token between our read and delete.
            return Ok(None);
        }

        tracing::debug!(token = %value.prefix(), "token consumed");
        Ok(Some(ProductId(row.product_id as u64)))
    }

    async fn token_exists(&self, value: &TokenValue) -> Result<bool> {
        let result = entity::token::Entity::find()
            .filter(entity::token::Column::Value.eq(value.as_str()))
            .one(&self.conn)
            .await?;
        Ok(result.is_some())
    }

    async fn list_active_tokens(&self) -> Result<Vec<(Product, Token)>> {
        let rows = entity::token::Entity::find()
            .find_also_related(entity::product::Entity)
            .order_by_asc(entity::token::Column::Id)
            .all(&self.conn)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (token_row, product_row) in rows {
            let product = product_row.ok_or_else(|| {
                Error::InvalidInput(format!(
                    "token {} references a missing product",
                    token_row.id
                ))
            })?;
            out.push((product.into(), token_row.into_token()?));
        }
        Ok(out)
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        let result = entity::product::Entity::find_by_id(id.0 as i64)
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn add_location(
        &self,
        product_id: ProductId,
        location: &str,
    ) -> Result<LocationSighting> {
        let location = location.trim();
        if location.is_empty() {
            return Err(Error::EmptyLocation);
        }

        let model = entity::location::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            product_id: sea_orm::ActiveValue::Set(product_id.0 as i64),
            location: sea_orm::ActiveValue::Set(location.to_string()),
            created_at: sea_orm::ActiveValue::Set(chrono::Utc::now()),
        };
        let row = model.insert(&self.conn).await?;
        Ok(row.into())
    }

    async fn add_rating(&self, product_id: ProductId, score: Score) -> Result<Rating> {
        let model = entity::rating::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            product_id: sea_orm::ActiveValue::Set(product_id.0 as i64),
            score: sea_orm::ActiveValue::Set(i16::from(score.value())),
            created_at: sea_orm::ActiveValue::Set(chrono::Utc::now()),
        };
        let row = model.insert(&self.conn).await?;
        row.into_rating()
    }

    async fn search_locations(&self, query: &str) -> Result<Vec<LocationSighting>> {
        let pattern = format!("%{}%", query.to_lowercase());
        let rows = entity::location::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(entity::location::Column::Location)))
                    .like(pattern),
            )
            .order_by_asc(entity::location::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_ratings(&self, product_id: ProductId) -> Result<Vec<Rating>> {
        let rows = entity::rating::Entity::find()
            .filter(entity::rating::Column::ProductId.eq(product_id.0 as i64))
            .order_by_asc(entity::rating::Column::Id)
            .all(&self.conn)
            .await?;
        rows.into_iter().map(|r| r.into_rating()).collect()
    }

    async fn average_rating(&self, product_id: ProductId) -> Result<Option<f64>> {
        let ratings = self.list_ratings(product_id).await?;
        if ratings.is_empty() {
            return Ok(None);
        }
        let sum: u32 = ratings.iter().map(|r| u32::from(r.score.value())).sum();
        Ok(Some(f64::from(sum) / ratings.len() as f64))
    }
}
