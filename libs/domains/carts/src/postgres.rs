use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    RuntimeErr,
};
use uuid::Uuid;

use crate::{
    entity::{cart, cart_item, product},
    error::{CartError, CartResult},
    models::{AddCartItem, Cart, CartItem},
    repository::CartRepository,
};

/// Postgres `numeric_value_out_of_range`; a merged quantity past `smallint`.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

fn is_numeric_out_of_range(err: &DbErr) -> bool {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .and_then(|db_err| db_err.code())
            .is_some_and(|code| code == NUMERIC_VALUE_OUT_OF_RANGE),
        _ => false,
    }
}

pub struct PgCartRepository {
    base: BaseRepository<cart::Entity>,
}

impl PgCartRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn db(&self) -> &DatabaseConnection {
        self.base.db()
    }

    /// Items matching `condition` joined with their product in one query.
    async fn items_where(
        &self,
        condition: sea_orm::Condition,
    ) -> CartResult<Vec<CartItem>> {
        let rows = cart_item::Entity::find()
            .filter(condition)
            .find_also_related(product::Entity)
            .order_by_asc(cart_item::Column::Id)
            .all(self.db())
            .await?;

        rows.into_iter()
            .map(|(item, product)| {
                let product = product.ok_or(CartError::UnknownProduct(item.product_id))?;
                Ok(item.into_cart_item(product))
            })
            .collect()
    }

    async fn scoped_item(&self, cart_id: Uuid, id: Uuid) -> CartResult<Option<CartItem>> {
        let items = self
            .items_where(
                sea_orm::Condition::all()
                    .add(cart_item::Column::CartId.eq(cart_id))
                    .add(cart_item::Column::Id.eq(id)),
            )
            .await?;
        Ok(items.into_iter().next())
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn create_cart(&self) -> CartResult<Cart> {
        let model = self.base.insert(cart::ActiveModel::create()).await?;

        tracing::info!(cart_id = %model.id, "Created cart");
        Ok(Cart::new(model.id, model.created_at.into(), Vec::new()))
    }

    async fn get_cart(&self, id: Uuid) -> CartResult<Option<Cart>> {
        let Some(model) = self.base.find_by_id(id).await? else {
            return Ok(None);
        };
        let items = self.list_items(id).await?;
        Ok(Some(Cart::new(model.id, model.created_at.into(), items)))
    }

    async fn delete_cart(&self, id: Uuid) -> CartResult<bool> {
        let rows = self.base.delete_by_id(id).await?;
        if rows > 0 {
            tracing::info!(cart_id = %id, "Deleted cart");
        }
        Ok(rows > 0)
    }

    async fn cart_exists(&self, id: Uuid) -> CartResult<bool> {
        let count = cart::Entity::find_by_id(id).count(self.db()).await?;
        Ok(count > 0)
    }

    async fn product_exists(&self, product_id: Uuid) -> CartResult<bool> {
        let count = product::Entity::find_by_id(product_id)
            .count(self.db())
            .await?;
        Ok(count > 0)
    }

    async fn list_items(&self, cart_id: Uuid) -> CartResult<Vec<CartItem>> {
        self.items_where(sea_orm::Condition::all().add(cart_item::Column::CartId.eq(cart_id)))
            .await
    }

    async fn get_item(&self, cart_id: Uuid, id: Uuid) -> CartResult<Option<CartItem>> {
        self.scoped_item(cart_id, id).await
    }

    async fn add_item(&self, cart_id: Uuid, input: AddCartItem) -> CartResult<CartItem> {
        let item = cart_item::ActiveModel {
            id: Set(Uuid::now_v7()),
            cart_id: Set(cart_id),
            product_id: Set(input.product_id),
            quantity: Set(input.quantity),
        };

        // A second add of the same product bumps the existing row.
        let on_conflict = OnConflict::columns([cart_item::Column::CartId, cart_item::Column::ProductId])
            .value(
                cart_item::Column::Quantity,
                Expr::cust("cart_items.quantity + EXCLUDED.quantity"),
            )
            .to_owned();

        cart_item::Entity::insert(item)
            .on_conflict(on_conflict)
            .exec(self.db())
            .await
            .map_err(|e| {
                if is_numeric_out_of_range(&e) {
                    CartError::Validation(format!("quantity exceeds {}", i16::MAX))
                } else {
                    CartError::Database(e)
                }
            })?;

        let items = self
            .items_where(
                sea_orm::Condition::all()
                    .add(cart_item::Column::CartId.eq(cart_id))
                    .add(cart_item::Column::ProductId.eq(input.product_id)),
            )
            .await?;
        let item = items
            .into_iter()
            .next()
            .ok_or_else(|| CartError::Internal("cart item missing after upsert".to_string()))?;

        tracing::info!(cart_id = %cart_id, cart_item_id = %item.id, "Added cart item");
        Ok(item)
    }

    async fn update_item(&self, cart_id: Uuid, id: Uuid, quantity: i16) -> CartResult<CartItem> {
        let result = cart_item::Entity::update_many()
            .col_expr(cart_item::Column::Quantity, Expr::value(quantity))
            .filter(cart_item::Column::Id.eq(id))
            .filter(cart_item::Column::CartId.eq(cart_id))
            .exec(self.db())
            .await?;
        if result.rows_affected == 0 {
            return Err(CartError::ItemNotFound(id));
        }

        tracing::info!(cart_item_id = %id, "Updated cart item");
        self.scoped_item(cart_id, id)
            .await?
            .ok_or(CartError::ItemNotFound(id))
    }

    async fn delete_item(&self, cart_id: Uuid, id: Uuid) -> CartResult<bool> {
        let result = cart_item::Entity::delete_many()
            .filter(cart_item::Column::Id.eq(id))
            .filter(cart_item::Column::CartId.eq(cart_id))
            .exec(self.db())
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(cart_item_id = %id, "Deleted cart item");
        }
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn cart_is_read_with_items_and_products() {
        let cart_id = Uuid::new_v4();
        let cart_row = cart::Model {
            id: cart_id,
            created_at: Utc::now().into(),
        };
        let product_row = product::Model {
            id: Uuid::now_v7(),
            title: "Coffee".to_string(),
            unit_price: dec!(4.25),
        };
        let item_row = cart_item::Model {
            id: Uuid::now_v7(),
            cart_id,
            product_id: product_row.id,
            quantity: 2,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![cart_row]])
            .append_query_results([vec![(item_row, product_row)]])
            .into_connection();
        let repo = PgCartRepository::new(db);

        let cart = repo.get_cart(cart_id).await.unwrap().unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product.title, "Coffee");
        assert_eq!(cart.total_price.to_string(), "8.50");
    }

    #[tokio::test]
    async fn updating_item_of_another_cart_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PgCartRepository::new(db);

        let result = repo.update_item(Uuid::new_v4(), Uuid::now_v7(), 3).await;
        assert!(matches!(result, Err(CartError::ItemNotFound(_))));
    }

    #[test]
    fn out_of_range_is_recognised_by_sqlstate_only() {
        let err = DbErr::Custom("value out of range for type smallint".to_string());
        assert!(!is_numeric_out_of_range(&err));
        assert!(!is_numeric_out_of_range(&DbErr::RecordNotInserted));
    }

    #[tokio::test]
    async fn upsert_failure_without_sqlstate_stays_a_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("out of range".to_string())])
            .append_exec_errors([DbErr::Custom("out of range".to_string())])
            .into_connection();
        let repo = PgCartRepository::new(db);

        let result = repo
            .add_item(
                Uuid::new_v4(),
                AddCartItem {
                    product_id: Uuid::now_v7(),
                    quantity: 1,
                },
            )
            .await;

        assert!(matches!(result, Err(CartError::Database(_))));
    }
}
