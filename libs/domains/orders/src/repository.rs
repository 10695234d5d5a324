use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::OrderResult;
use crate::models::{Order, OrderSort, OrderStatus};

/// Read-only repository for orders
///
/// Lists come back in ascending `id` order unless a sort is requested.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_all(&self) -> OrderResult<Vec<Order>>;

    async fn find_by_id(&self, id: i64) -> OrderResult<Option<Order>>;

    /// With a sort, orders by `order_date` and then `id`
    async fn find_by_user(&self, user_id: i64, sort: Option<OrderSort>) -> OrderResult<Vec<Order>>;

    async fn find_by_status(&self, status: OrderStatus) -> OrderResult<Vec<Order>>;

    async fn find_by_user_and_status(
        &self,
        user_id: i64,
        status: OrderStatus,
    ) -> OrderResult<Vec<Order>>;

    /// Both bounds inclusive
    async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> OrderResult<Vec<Order>>;

    async fn find_by_min_total(&self, min_amount: Decimal) -> OrderResult<Vec<Order>>;
}

/// In-memory implementation (for development/testing)
///
/// Orders are written elsewhere, so rows are seeded through [`insert`](Self::insert).
#[derive(Debug, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<BTreeMap<i64, Order>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Seed an order and return its assigned id
    pub async fn insert(
        &self,
        user_id: i64,
        status: OrderStatus,
        order_date: DateTime<Utc>,
        total_amount: Decimal,
    ) -> i64 {
        let now = Utc::now();
        let order = Order {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id,
            status,
            order_date,
            total_amount,
            created_at: now,
            updated_at: now,
        };
        let id = order.id;
        self.orders.write().await.insert(id, order);
        id
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<Order>
    where
        F: Fn(&Order) -> bool,
    {
        let orders = self.orders.read().await;
        orders.values().filter(|o| predicate(*o)).cloned().collect()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_all(&self) -> OrderResult<Vec<Order>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn find_by_id(&self, id: i64) -> OrderResult<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: i64, sort: Option<OrderSort>) -> OrderResult<Vec<Order>> {
        let mut orders = self.filtered(|o| o.user_id == user_id).await;
        match sort {
            Some(OrderSort::Asc) => orders.sort_by_key(|o| (o.order_date, o.id)),
            Some(OrderSort::Desc) => {
                orders.sort_by(|a, b| b.order_date.cmp(&a.order_date).then(a.id.cmp(&b.id)))
            }
            None => {}
        }
        Ok(orders)
    }

    async fn find_by_status(&self, status: OrderStatus) -> OrderResult<Vec<Order>> {
        Ok(self.filtered(|o| o.status == status).await)
    }

    async fn find_by_user_and_status(
        &self,
        user_id: i64,
        status: OrderStatus,
    ) -> OrderResult<Vec<Order>> {
        Ok(self
            .filtered(|o| o.user_id == user_id && o.status == status)
            .await)
    }

    async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> OrderResult<Vec<Order>> {
        Ok(self
            .filtered(|o| o.order_date >= start && o.order_date <= end)
            .await)
    }

    async fn find_by_min_total(&self, min_amount: Decimal) -> OrderResult<Vec<Order>> {
        Ok(self.filtered(|o| o.total_amount >= min_amount).await)
    }
}
