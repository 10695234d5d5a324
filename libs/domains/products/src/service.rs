//! Product Service - Business logic layer

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Existence checks precede every mutation, and stock arithmetic is
/// delegated to the repository's atomic `adjust_stock`.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_all_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_all().await
    }

    /// `Ok(None)` when the id is unknown
    #[instrument(skip(self))]
    pub async fn get_product_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        self.repository.find_by_id(id).await
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Full replace of name, description, price, category and stock
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        if !self.repository.exists_by_id(id).await? {
            return Err(ProductError::NotFound(id));
        }

        self.repository
            .replace(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(ProductError::NotFound(id));
        }

        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_products_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        self.repository.find_by_category(category).await
    }

    /// Inclusive on both ends
    #[instrument(skip(self))]
    pub async fn get_products_by_price_range(
        &self,
        min_price: Decimal,
        max_price: Decimal,
    ) -> ProductResult<Vec<Product>> {
        if min_price > max_price {
            return Err(ProductError::Validation(format!(
                "minPrice ({}) must not exceed maxPrice ({})",
                min_price, max_price
            )));
        }

        self.repository
            .find_by_price_between(min_price, max_price)
            .await
    }

    /// Products with `stock_quantity > 0`
    #[instrument(skip(self))]
    pub async fn get_available_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_in_stock().await
    }

    #[instrument(skip(self))]
    pub async fn search_products(&self, term: &str) -> ProductResult<Vec<Product>> {
        self.repository.search_name_or_description(term).await
    }

    /// In-stock products priced at or below `max_price`
    #[instrument(skip(self))]
    pub async fn get_products_under_price(&self, max_price: Decimal) -> ProductResult<Vec<Product>> {
        self.repository.find_in_stock_under_price(max_price).await
    }

    #[instrument(skip(self))]
    pub async fn get_products_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        self.repository.find_by_name_ignore_case(name).await
    }

    /// Apply a signed stock delta.
    ///
    /// `Ok(false)` when the product does not exist or the result would be
    /// negative; stock is left untouched in both cases.
    #[instrument(skip(self))]
    pub async fn update_stock_quantity(&self, id: i64, quantity: i32) -> ProductResult<bool> {
        let applied = self.repository.adjust_stock(id, quantity).await?;
        if !applied {
            tracing::info!(product_id = id, delta = quantity, "Stock update rejected");
        }
        Ok(applied)
    }

    #[instrument(skip(self))]
    pub async fn product_exists(&self, id: i64) -> ProductResult<bool> {
        self.repository.exists_by_id(id).await
    }

    /// `true` iff the product exists and has at least `quantity` in stock
    #[instrument(skip(self))]
    pub async fn is_product_available(&self, id: i64, quantity: i32) -> ProductResult<bool> {
        Ok(self
            .repository
            .find_by_id(id)
            .await?
            .is_some_and(|p| p.can_fulfil(quantity)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryProductRepository, MockProductRepository};
    use mockall::predicate::eq;

    fn widget(stock: i32) -> CreateProduct {
        CreateProduct {
            name: "Widget".to_string(),
            description: Some("A useful widget".to_string()),
            price: Decimal::new(999, 2),
            category: Some("tools".to_string()),
            stock_quantity: stock,
        }
    }

    fn service() -> ProductService<InMemoryProductRepository> {
        ProductService::new(InMemoryProductRepository::new())
    }

    #[tokio::test]
    async fn test_widget_stock_scenario() {
        let service = service();
        let widget = service.create_product(widget(10)).await.unwrap();

        assert!(service.is_product_available(widget.id, 5).await.unwrap());

        assert!(!service.update_stock_quantity(widget.id, -15).await.unwrap());
        let current = service.get_product_by_id(widget.id).await.unwrap().unwrap();
        assert_eq!(current.stock_quantity, 10);

        assert!(service.update_stock_quantity(widget.id, -10).await.unwrap());
        let current = service.get_product_by_id(widget.id).await.unwrap().unwrap();
        assert_eq!(current.stock_quantity, 0);

        let available = service.get_available_products().await.unwrap();
        assert!(available.iter().all(|p| p.id != widget.id));
    }

    #[tokio::test]
    async fn test_positive_delta_restocks() {
        let service = service();
        let product = service.create_product(widget(3)).await.unwrap();

        assert!(service.update_stock_quantity(product.id, 5).await.unwrap());
        let current = service.get_product_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(current.stock_quantity, 8);
        assert!(service.is_product_available(product.id, 8).await.unwrap());
    }

    #[tokio::test]
    async fn test_created_id_is_stable_across_reads() {
        let service = service();
        let created = service.create_product(widget(1)).await.unwrap();

        let first = service.get_product_by_id(created.id).await.unwrap().unwrap();
        let second = service.get_product_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(first.id, created.id);
        assert_eq!(second.id, created.id);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let service = service();
        let mut input = widget(1);
        input.name = "  ".to_string();

        let result = service.create_product(input).await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
        assert!(service.get_all_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_is_full_replace() {
        let service = service();
        let created = service.create_product(widget(4)).await.unwrap();

        let updated = service
            .update_product(
                created.id,
                UpdateProduct {
                    name: "Widget v2".to_string(),
                    description: None,
                    price: Decimal::new(1299, 2),
                    category: None,
                    stock_quantity: 7,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Widget v2");
        assert_eq!(updated.description, None);
        assert_eq!(updated.category, None);
        assert_eq!(updated.stock_quantity, 7);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_does_not_touch_datastore() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_exists_by_id()
            .with(eq(404))
            .returning(|_| Ok(false));
        mock_repo.expect_replace().never();

        let service = ProductService::new(mock_repo);
        let result = service.update_product(404, widget(1).into()).await;

        assert!(matches!(result, Err(ProductError::NotFound(404))));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_exists_by_id().returning(|_| Ok(false));
        mock_repo.expect_delete().never();

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.delete_product(5).await,
            Err(ProductError::NotFound(5))
        ));
    }

    #[tokio::test]
    async fn test_datastore_fault_is_not_absence() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|_| Err(ProductError::Database(sea_orm::DbErr::Custom("connection reset".into()))));

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.get_product_by_id(1).await,
            Err(ProductError::Database(_))
        ));
        assert!(service.is_product_available(1, 1).await.is_err());
    }

    #[tokio::test]
    async fn test_price_range_is_inclusive() {
        let service = service();
        for (name, cents) in [("low", 1000), ("mid", 2500), ("high", 5000), ("over", 5001)] {
            let mut input = widget(1);
            input.name = name.to_string();
            input.price = Decimal::new(cents, 2);
            service.create_product(input).await.unwrap();
        }

        let found = service
            .get_products_by_price_range(Decimal::new(1000, 2), Decimal::new(5000, 2))
            .await
            .unwrap();
        let names: Vec<_> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["low", "mid", "high"]);
    }

    #[tokio::test]
    async fn test_price_range_rejects_inverted_bounds() {
        let service = service();
        let result = service
            .get_products_by_price_range(Decimal::TEN, Decimal::ONE)
            .await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_under_price_requires_stock() {
        let service = service();
        let in_stock = service.create_product(widget(2)).await.unwrap();
        let mut sold_out = widget(0);
        sold_out.name = "Sold out".to_string();
        service.create_product(sold_out).await.unwrap();

        let found = service
            .get_products_under_price(Decimal::new(999, 2))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, in_stock.id);
    }

    #[tokio::test]
    async fn test_search_is_case_sensitive_but_name_lookup_is_not() {
        let service = service();
        service.create_product(widget(1)).await.unwrap();

        assert_eq!(service.search_products("useful").await.unwrap().len(), 1);
        assert!(service.search_products("WIDGET").await.unwrap().is_empty());
        assert_eq!(service.get_products_by_name("wIdGe").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_category_is_exact_match() {
        let service = service();
        service.create_product(widget(1)).await.unwrap();

        assert_eq!(service.get_products_by_category("tools").await.unwrap().len(), 1);
        assert!(service.get_products_by_category("Tools").await.unwrap().is_empty());
        assert!(service.get_products_by_category("tool").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_availability_of_missing_product_is_false() {
        let service = service();
        assert!(!service.is_product_available(99, 0).await.unwrap());
        assert!(!service.product_exists(99).await.unwrap());
        assert!(!service.update_stock_quantity(99, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_decrements_never_go_negative() {
        let service = service();
        let product = service.create_product(widget(10)).await.unwrap();

        let handles: Vec<_> = (0..25)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.update_stock_quantity(product.id, -1).await })
            })
            .collect();

        let mut applied = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() {
                applied += 1;
            }
        }

        assert_eq!(applied, 10);
        let current = service.get_product_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(current.stock_quantity, 0);
    }
}
