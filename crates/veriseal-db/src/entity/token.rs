//! token entity for database storage.
//!
//! token rows are the only rows that are ever physically deleted:
//! consumption removes the row, and the absence of a row is the
//! "already verified or never issued" state.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use veriseal_types::{ProductId, Token, TokenValue};

/// token database model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub value: String,
    pub product_id: i64,
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
    /// convert into the domain token type.
    ///
    /// stored values were validated at registration time; a row that
    /// fails validation here indicates outside tampering with the table.
    pub fn into_token(self) -> Result<Token, crate::Error> {
        let value = TokenValue::new(self.value)
            .map_err(|e| crate::Error::InvalidInput(e.to_string()))?;
        Ok(Token {
            id: self.id as u64,
            value,
            product_id: ProductId(self.product_id as u64),
            created_at: self.created_at,
        })
    }
}

/// build an insertable row for a fresh token binding.
pub fn new_row(value: &TokenValue, product_id: ProductId) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        value: Set(value.as_str().to_string()),
        product_id: Set(product_id.0 as i64),
        created_at: Set(Utc::now()),
    }
}
