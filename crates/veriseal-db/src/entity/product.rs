//! product entity for database storage.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use veriseal_types::{NewProduct, Product, ProductId};

/// product database model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub manufacture_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    #[sea_orm(column_type = "Blob", nullable)]
    pub image: Option<Vec<u8>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::token::Entity")]
    Tokens,
    #[sea_orm(has_many = "super::location::Entity")]
    Locations,
    #[sea_orm(has_many = "super::rating::Entity")]
    Ratings,
}

impl Related<super::token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tokens.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Locations.def()
    }
}

impl Related<super::rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Product {
            id: ProductId(model.id as u64),
            name: model.name,
            manufacture_date: model.manufacture_date,
            expiry_date: model.expiry_date,
            notes: model.notes,
            image: model.image,
            created_at: model.created_at,
        }
    }
}

impl From<&NewProduct> for ActiveModel {
    fn from(product: &NewProduct) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(product.name.trim().to_string()),
            manufacture_date: Set(product.manufacture_date),
            expiry_date: Set(product.expiry_date),
            notes: Set(product.notes.clone()),
            image: Set(product.image.clone()),
            created_at: Set(Utc::now()),
        }
    }
}
