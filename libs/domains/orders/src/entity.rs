use sea_orm::entity::prelude::*;

use crate::models::{Order, OrderStatus};

/// Sea-ORM Entity for the orders table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub status: OrderStatus,
    pub order_date: DateTimeWithTimeZone,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_amount: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Order {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            status: model.status,
            order_date: model.order_date.into(),
            total_amount: model.total_amount,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
