use async_trait::async_trait;
use database::BaseRepository;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Select,
};

use crate::{
    entity::{self, Column},
    error::ProductResult,
    models::{CreateProduct, Product, UpdateProduct, escape_like},
    repository::ProductRepository,
};

#[derive(Clone)]
pub struct PgProductRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn list(&self, query: Select<entity::Entity>) -> ProductResult<Vec<Product>> {
        let models = query.order_by_asc(Column::Id).all(self.base.db()).await?;
        Ok(models.into_iter().map(Product::from).collect())
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        self.list(entity::Entity::find()).await
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Product::from))
    }

    async fn exists_by_id(&self, id: i64) -> ProductResult<bool> {
        Ok(self.base.exists_by_id(id).await?)
    }

    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = self.base.insert(active_model).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn replace(&self, id: i64, input: UpdateProduct) -> ProductResult<Option<Product>> {
        // UPDATE ... WHERE id = $1 RETURNING *
        match self
            .base
            .update(entity::ActiveModel::replacing(id, input))
            .await
        {
            Ok(model) => {
                tracing::info!(product_id = id, "Updated product");
                Ok(Some(model.into()))
            }
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;

        if rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        self.list(entity::Entity::find().filter(Column::Category.eq(category)))
            .await
    }

    async fn find_by_price_between(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> ProductResult<Vec<Product>> {
        self.list(entity::Entity::find().filter(Column::Price.between(min, max)))
            .await
    }

    async fn find_in_stock(&self) -> ProductResult<Vec<Product>> {
        self.list(entity::Entity::find().filter(Column::StockQuantity.gt(0)))
            .await
    }

    async fn search_name_or_description(&self, term: &str) -> ProductResult<Vec<Product>> {
        let pattern = format!("%{}%", escape_like(term));
        self.list(
            entity::Entity::find().filter(
                Condition::any()
                    .add(Column::Name.like(pattern.as_str()))
                    .add(Column::Description.like(pattern.as_str())),
            ),
        )
        .await
    }

    async fn find_in_stock_under_price(&self, max: Decimal) -> ProductResult<Vec<Product>> {
        self.list(
            entity::Entity::find()
                .filter(Column::Price.lte(max))
                .filter(Column::StockQuantity.gt(0)),
        )
        .await
    }

    async fn find_by_name_ignore_case(&self, name: &str) -> ProductResult<Vec<Product>> {
        // LOWER(name) matches the idx_products_name_lower index
        use sea_orm::sea_query::ExprTrait;

        let pattern = format!("%{}%", escape_like(&name.to_lowercase()));
        self.list(
            entity::Entity::find()
                .filter(Expr::expr(Func::lower(Expr::col(Column::Name))).like(pattern)),
        )
        .await
    }

    async fn adjust_stock(&self, id: i64, delta: i32) -> ProductResult<bool> {
        use sea_orm::sea_query::ExprTrait;

        // Single conditional UPDATE so concurrent adjustments cannot overdraw.
        // The guard runs in BIGINT so a result past i32::MAX is a miss, not an error.
        let result = entity::Entity::update_many()
            .col_expr(
                Column::StockQuantity,
                Expr::col(Column::StockQuantity).add(delta),
            )
            .col_expr(Column::UpdatedAt, Expr::current_timestamp())
            .filter(Expr::col(Column::Id).eq(id))
            .filter(
                Expr::col(Column::StockQuantity)
                    .cast_as("bigint")
                    .add(i64::from(delta))
                    .between(0i64, i64::from(i32::MAX)),
            )
            .exec(self.base.db())
            .await?;

        let applied = result.rows_affected == 1;
        if applied {
            tracing::info!(product_id = id, delta, "Adjusted stock");
        } else {
            tracing::debug!(product_id = id, delta, "Stock adjustment rejected");
        }
        Ok(applied)
    }
}
