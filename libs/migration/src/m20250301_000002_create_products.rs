use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Products::Name, 255))
                    .col(text_null(Products::Description))
                    .col(ColumnDef::new(Products::Price).decimal_len(10, 2).not_null())
                    .col(string_len_null(Products::Category, 100))
                    .col(integer(Products::StockQuantity).default(0))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Products::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        let db = manager.get_connection();

        db.execute_unprepared(
            r#"
            ALTER TABLE products
                ADD CONSTRAINT products_stock_quantity_non_negative CHECK (stock_quantity >= 0),
                ADD CONSTRAINT products_price_non_negative CHECK (price >= 0)
            "#,
        )
        .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_category")
                    .table(Products::Table)
                    .col(Products::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_price")
                    .table(Products::Table)
                    .col(Products::Price)
                    .to_owned(),
            )
            .await?;

        // Case-insensitive name lookups
        db.execute_unprepared("CREATE INDEX idx_products_name_lower ON products (LOWER(name))")
            .await?;

        db.execute_unprepared(
            r#"
            CREATE TRIGGER products_touch_updated_at
                BEFORE UPDATE ON products
                FOR EACH ROW
                EXECUTE FUNCTION util.touch_updated_at()
            "#,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS products_touch_updated_at ON products")
            .await?;

        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Description,
    Price,
    Category,
    StockQuantity,
    CreatedAt,
    UpdatedAt,
}
