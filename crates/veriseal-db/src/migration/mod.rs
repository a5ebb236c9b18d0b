//! database migrations for veriseal.

pub use sea_orm_migration::prelude::*;

mod m20260829_000001_create_products;
mod m20260829_000002_create_tokens;
mod m20260829_000003_create_locations;
mod m20260829_000004_create_ratings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260829_000001_create_products::Migration),
            Box::new(m20260829_000002_create_tokens::Migration),
            Box::new(m20260829_000003_create_locations::Migration),
            Box::new(m20260829_000004_create_ratings::Migration),
        ]
    }
}
