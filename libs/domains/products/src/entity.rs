use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;

use crate::models::{CreateProduct, Product, UpdateProduct};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub category: Option<String>,
    pub stock_quantity: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            category: model.category,
            stock_quantity: model.stock_quantity,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// id and timestamps come from column defaults
impl From<CreateProduct> for ActiveModel {
    fn from(input: CreateProduct) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            category: Set(input.category),
            stock_quantity: Set(input.stock_quantity),
            created_at: NotSet,
            updated_at: NotSet,
        }
    }
}

impl ActiveModel {
    /// Full replacement of the mutable columns of row `id`.
    pub fn replacing(id: i64, input: UpdateProduct) -> Self {
        ActiveModel {
            id: Unchanged(id),
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            category: Set(input.category),
            stock_quantity: Set(input.stock_quantity),
            created_at: NotSet,
            updated_at: Set(chrono::Utc::now().into()),
        }
    }
}
