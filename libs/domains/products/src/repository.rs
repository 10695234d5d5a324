use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
///
/// Every list is returned in ascending `id` order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    async fn exists_by_id(&self, id: i64) -> ProductResult<bool>;

    /// Persist a new product and return it with its generated id
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Overwrite every mutable field. `None` when no row has this id.
    async fn replace(&self, id: i64, input: UpdateProduct) -> ProductResult<Option<Product>>;

    /// `false` when no row has this id
    async fn delete(&self, id: i64) -> ProductResult<bool>;

    async fn find_by_category(&self, category: &str) -> ProductResult<Vec<Product>>;

    /// `min <= price <= max`
    async fn find_by_price_between(&self, min: Decimal, max: Decimal)
    -> ProductResult<Vec<Product>>;

    /// `stock_quantity > 0`
    async fn find_in_stock(&self) -> ProductResult<Vec<Product>>;

    /// Case-sensitive substring match on name or description
    async fn search_name_or_description(&self, term: &str) -> ProductResult<Vec<Product>>;

    /// `price <= max AND stock_quantity > 0`
    async fn find_in_stock_under_price(&self, max: Decimal) -> ProductResult<Vec<Product>>;

    /// Case-insensitive substring match on name
    async fn find_by_name_ignore_case(&self, name: &str) -> ProductResult<Vec<Product>>;

    /// Atomically apply `stock_quantity += delta` when the result stays
    /// non-negative. Returns whether the row was changed; a missing id is
    /// `false`.
    async fn adjust_stock(&self, id: i64, delta: i32) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i64, Product>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<Product>
    where
        F: Fn(&Product) -> bool,
    {
        let products = self.products.read().await;
        products.values().filter(|p| predicate(*p)).cloned().collect()
    }
}

/// Matches how `NUMERIC(10, 2)` rounds on insert
fn to_cents(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> ProductResult<bool> {
        let products = self.products.read().await;
        Ok(products.contains_key(&id))
    }

    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: input.name,
            description: input.description,
            price: to_cents(input.price),
            category: input.category,
            stock_quantity: input.stock_quantity,
            created_at: now,
            updated_at: now,
        };

        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn replace(&self, id: i64, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;

        let Some(product) = products.get_mut(&id) else {
            return Ok(None);
        };

        product.name = input.name;
        product.description = input.description;
        product.price = to_cents(input.price);
        product.category = input.category;
        product.stock_quantity = input.stock_quantity;
        product.updated_at = Utc::now();

        tracing::info!(product_id = id, "Updated product");
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        Ok(self
            .filtered(|p| p.category.as_deref() == Some(category))
            .await)
    }

    async fn find_by_price_between(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|p| p.price >= min && p.price <= max).await)
    }

    async fn find_in_stock(&self) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(Product::in_stock).await)
    }

    async fn search_name_or_description(&self, term: &str) -> ProductResult<Vec<Product>> {
        Ok(self
            .filtered(|p| {
                p.name.contains(term)
                    || p.description.as_deref().is_some_and(|d| d.contains(term))
            })
            .await)
    }

    async fn find_in_stock_under_price(&self, max: Decimal) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|p| p.price <= max && p.in_stock()).await)
    }

    async fn find_by_name_ignore_case(&self, name: &str) -> ProductResult<Vec<Product>> {
        let needle = name.to_lowercase();
        Ok(self
            .filtered(|p| p.name.to_lowercase().contains(&needle))
            .await)
    }

    async fn adjust_stock(&self, id: i64, delta: i32) -> ProductResult<bool> {
        // Check and write under one lock
        let mut products = self.products.write().await;

        let Some(product) = products.get_mut(&id) else {
            return Ok(false);
        };

        match product.stock_quantity.checked_add(delta) {
            Some(updated) if updated >= 0 => {
                product.stock_quantity = updated;
                product.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
