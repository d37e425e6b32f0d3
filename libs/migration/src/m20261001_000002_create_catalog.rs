use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Collections::Table)
                    .if_not_exists()
                    .col(pk_uuid(Collections::Id))
                    .col(string_len(Collections::Title, 255))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_uuid(Products::Id))
                    .col(string_len(Products::Title, 255))
                    .col(string_len(Products::Slug, 255))
                    .col(text_null(Products::Description))
                    .col(decimal_len(Products::UnitPrice, 6, 2))
                    .col(integer(Products::Inventory))
                    .col(
                        timestamp_with_time_zone(Products::LastUpdate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(uuid(Products::CollectionId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_collection")
                            .from(Products::Table, Products::CollectionId)
                            .to(Collections::Table, Collections::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        let db = manager.get_connection();

        db.execute_unprepared(
            r#"
            ALTER TABLE products
                ADD CONSTRAINT ck_products_unit_price CHECK (unit_price >= 1),
                ADD CONSTRAINT ck_products_inventory CHECK (inventory >= 0)
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            CREATE TRIGGER products_touch_last_update
                BEFORE UPDATE ON products
                FOR EACH ROW
                EXECUTE FUNCTION util.touch_last_update()
            "#,
        )
        .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_collection_id")
                    .table(Products::Table)
                    .col(Products::CollectionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_unit_price")
                    .table(Products::Table)
                    .col(Products::UnitPrice)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(pk_uuid(Reviews::Id))
                    .col(uuid(Reviews::ProductId))
                    .col(string_len(Reviews::Name, 255))
                    .col(text(Reviews::Description))
                    .col(date(Reviews::Date).default(Expr::current_date()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_product")
                            .from(Reviews::Table, Reviews::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_product_id")
                    .table(Reviews::Table)
                    .col(Reviews::ProductId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Collections::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Collections {
    Table,
    Id,
    Title,
}

#[derive(DeriveIden)]
pub enum Products {
    Table,
    Id,
    Title,
    Slug,
    Description,
    UnitPrice,
    Inventory,
    LastUpdate,
    CollectionId,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    ProductId,
    Name,
    Description,
    Date,
}
