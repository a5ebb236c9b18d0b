//! location sighting entity for database storage.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use veriseal_types::{LocationSighting, ProductId};

/// location sighting database model. append-only.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub product_id: i64,
    pub location: String,
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

impl From<Model> for LocationSighting {
    fn from(model: Model) -> Self {
        LocationSighting {
            id: model.id as u64,
            product_id: ProductId(model.product_id as u64),
            location: model.location,
            created_at: model.created_at,
        }
    }
}
