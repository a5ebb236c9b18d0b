//! create ratings table migration.

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
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ratings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ratings::ProductId).big_integer().not_null())
                    .col(ColumnDef::new(Ratings::Score).small_integer().not_null())
                    .col(
                        ColumnDef::new(Ratings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_product")
                            .from(Ratings::Table, Ratings::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // index on product_id for average-rating queries
        manager
            .create_index(
                Index::create()
                    .name("idx_ratings_product_id")
                    .table(Ratings::Table)
                    .col(Ratings::ProductId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ratings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ratings {
    #[sea_orm(iden = "ratings")]
    Table,
    Id,
    ProductId,
    Score,
    CreatedAt,
}
