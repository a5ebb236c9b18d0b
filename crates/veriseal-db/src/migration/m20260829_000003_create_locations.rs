//! create locations table migration.
//!
//! locations reference products, not tokens: a sighting must remain
//! queryable after the originating token row is consumed.

use sea_orm_migration::prelude::*;

use super::m20260829_000001_create_products::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Locations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Locations::ProductId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Locations::Location).text().not_null())
                    .col(
                        ColumnDef::new(Locations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_locations_product")
                            .from(Locations::Table, Locations::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // index on product_id for per-product provenance lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_locations_product_id")
                    .table(Locations::Table)
                    .col(Locations::ProductId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Locations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Locations {
    #[sea_orm(iden = "locations")]
    Table,
    Id,
    ProductId,
    Location,
    CreatedAt,
}
