//! rating entity for database storage.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use veriseal_types::{ProductId, Rating, Score};

/// rating database model. append-only.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub product_id: i64,
    pub score: i16,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// convert into the domain rating type.
    ///
    /// stored scores were validated at attachment time; a row outside
    /// the range indicates outside tampering with the table.
    pub fn into_rating(self) -> Result<Rating, crate::Error> {
        let score = u8::try_from(self.score)
            .ok()
            .and_then(|v| Score::new(v).ok())
            .ok_or_else(|| {
                crate::Error::InvalidInput(format!("stored score {} out of range", self.score))
            })?;
        Ok(Rating {
            id: self.id as u64,
            product_id: ProductId(self.product_id as u64),
            score,
            created_at: self.created_at,
        })
    }
}
