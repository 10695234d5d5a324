use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{OrderError, OrderResult};
use crate::models::{Order, OrderSort, OrderStatus};
use crate::repository::OrderRepository;

/// Read-only queries over [`OrderRepository`]
pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
}

impl<R: OrderRepository> Clone for OrderService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> OrderResult<Vec<Order>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> OrderResult<Order> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_by_user(&self, user_id: i64, sort: Option<OrderSort>) -> OrderResult<Vec<Order>> {
        self.repository.find_by_user(user_id, sort).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_status(&self, status: OrderStatus) -> OrderResult<Vec<Order>> {
        self.repository.find_by_status(status).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_user_and_status(
        &self,
        user_id: i64,
        status: OrderStatus,
    ) -> OrderResult<Vec<Order>> {
        self.repository.find_by_user_and_status(user_id, status).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> OrderResult<Vec<Order>> {
        if start > end {
            return Err(OrderError::Validation(
                "start must not be after end".to_string(),
            ));
        }
        self.repository.find_by_date_range(start, end).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_min_total(&self, min_amount: Decimal) -> OrderResult<Vec<Order>> {
        self.repository.find_by_min_total(min_amount).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryOrderRepository, MockOrderRepository};
    use chrono::{Duration, TimeZone};

    #[tokio::test]
    async fn test_get_missing_order_is_not_found() {
        let service = OrderService::new(InMemoryOrderRepository::new());
        assert!(matches!(
            service.get_by_id(12).await,
            Err(OrderError::NotFound(12))
        ));
    }

    #[tokio::test]
    async fn test_inverted_date_range_never_reaches_repository() {
        let mut mock_repo = MockOrderRepository::new();
        mock_repo.expect_find_by_date_range().never();

        let service = OrderService::new(mock_repo);
        let end = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let result = service.list_by_date_range(end + Duration::seconds(1), end).await;

        assert!(matches!(result, Err(OrderError::Validation(_))));
    }

    #[tokio::test]
    async fn test_single_instant_range_is_allowed() {
        let repo = InMemoryOrderRepository::new();
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
        repo.insert(1, OrderStatus::Confirmed, at, Decimal::TEN).await;
        let service = OrderService::new(repo);

        let found = service.list_by_date_range(at, at).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_status_filters() {
        let repo = InMemoryOrderRepository::new();
        let at = Utc::now();
        repo.insert(1, OrderStatus::Delivered, at, Decimal::ONE).await;
        repo.insert(2, OrderStatus::Delivered, at, Decimal::ONE).await;
        repo.insert(2, OrderStatus::Pending, at, Decimal::ONE).await;
        let service = OrderService::new(repo);

        assert_eq!(service.list_by_status(OrderStatus::Delivered).await.unwrap().len(), 2);
        assert_eq!(
            service
                .list_by_user_and_status(2, OrderStatus::Pending)
                .await
                .unwrap()
                .len(),
            1
        );
        assert!(service.list_by_status(OrderStatus::Shipped).await.unwrap().is_empty());
    }
}
