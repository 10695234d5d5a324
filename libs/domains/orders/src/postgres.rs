use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::BaseRepository;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select};

use crate::{
    entity::{self, Column},
    error::OrderResult,
    models::{Order, OrderSort, OrderStatus},
    repository::OrderRepository,
};

#[derive(Clone)]
pub struct PgOrderRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn list(&self, query: Select<entity::Entity>) -> OrderResult<Vec<Order>> {
        let models = query.order_by_asc(Column::Id).all(self.base.db()).await?;
        Ok(models.into_iter().map(Order::from).collect())
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find_all(&self) -> OrderResult<Vec<Order>> {
        self.list(entity::Entity::find()).await
    }

    async fn find_by_id(&self, id: i64) -> OrderResult<Option<Order>> {
        Ok(self.base.find_by_id(id).await?.map(Order::from))
    }

    async fn find_by_user(&self, user_id: i64, sort: Option<OrderSort>) -> OrderResult<Vec<Order>> {
        let query = entity::Entity::find().filter(Column::UserId.eq(user_id));
        let query = match sort {
            Some(OrderSort::Asc) => query.order_by_asc(Column::OrderDate),
            Some(OrderSort::Desc) => query.order_by_desc(Column::OrderDate),
            None => query,
        };
        self.list(query).await
    }

    async fn find_by_status(&self, status: OrderStatus) -> OrderResult<Vec<Order>> {
        self.list(entity::Entity::find().filter(Column::Status.eq(status)))
            .await
    }

    async fn find_by_user_and_status(
        &self,
        user_id: i64,
        status: OrderStatus,
    ) -> OrderResult<Vec<Order>> {
        self.list(
            entity::Entity::find()
                .filter(Column::UserId.eq(user_id))
                .filter(Column::Status.eq(status)),
        )
        .await
    }

    async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> OrderResult<Vec<Order>> {
        self.list(entity::Entity::find().filter(Column::OrderDate.between(start, end)))
            .await
    }

    async fn find_by_min_total(&self, min_amount: Decimal) -> OrderResult<Vec<Order>> {
        self.list(entity::Entity::find().filter(Column::TotalAmount.gte(min_amount)))
            .await
    }
}
