use async_trait::async_trait;
use axum_helpers::PageRequest;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity::{collection, order_item, product, review},
    error::{CatalogError, CatalogResult},
    models::{
        Collection, CreateCollection, CreateProduct, Product, ProductFilter, ProductSortField,
        Review, UpdateCollection, UpdateProduct, UpdateReview, money,
    },
    repository::{CollectionRepository, ProductRepository, ReviewRepository},
};

pub struct PgCollectionRepository {
    base: BaseRepository<collection::Entity>,
}

impl PgCollectionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn products_count(&self, id: Uuid) -> CatalogResult<u64> {
        let count = product::Entity::find()
            .filter(product::Column::CollectionId.eq(id))
            .count(self.base.db())
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl CollectionRepository for PgCollectionRepository {
    async fn list(&self) -> CatalogResult<Vec<Collection>> {
        let counts: Vec<(Uuid, i64)> = product::Entity::find()
            .select_only()
            .column(product::Column::CollectionId)
            .column_as(Expr::cust("COUNT(products.id)"), "products_count")
            .group_by(product::Column::CollectionId)
            .into_tuple()
            .all(self.base.db())
            .await?;

        let models = collection::Entity::find()
            .order_by_asc(collection::Column::Id)
            .all(self.base.db())
            .await?;

        Ok(models
            .into_iter()
            .map(|model| {
                let count = counts
                    .iter()
                    .find(|(collection_id, _)| *collection_id == model.id)
                    .map_or(0, |(_, n)| *n as u64);
                model.into_collection(count)
            })
            .collect())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Collection>> {
        let Some(model) = self.base.find_by_id(id).await? else {
            return Ok(None);
        };
        let count = self.products_count(id).await?;
        Ok(Some(model.into_collection(count)))
    }

    async fn create(&self, input: CreateCollection) -> CatalogResult<Collection> {
        let active_model: collection::ActiveModel = input.into();
        let model = self.base.insert(active_model).await?;

        tracing::info!(collection_id = %model.id, "Created collection");
        Ok(model.into_collection(0))
    }

    async fn update(&self, id: Uuid, input: UpdateCollection) -> CatalogResult<Collection> {
        let model = self
            .base
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::CollectionNotFound(id))?;

        let model = match input.title {
            Some(title) => {
                self.base
                    .update(collection::ActiveModel {
                        id: Set(model.id),
                        title: Set(title),
                    })
                    .await?
            }
            None => model,
        };

        let count = self.products_count(id).await?;
        tracing::info!(collection_id = %id, "Updated collection");
        Ok(model.into_collection(count))
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let rows = self.base.delete_by_id(id).await?;
        if rows > 0 {
            tracing::info!(collection_id = %id, "Deleted collection");
        }
        Ok(rows > 0)
    }
}

pub struct PgProductRepository {
    base: BaseRepository<product::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

/// `LIKE` pattern matching `term` anywhere, with its wildcards taken literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '!' | '%' | '_') {
            pattern.push('!');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn sort_column(field: ProductSortField) -> product::Column {
    match field {
        ProductSortField::UnitPrice => product::Column::UnitPrice,
        ProductSortField::LastUpdate => product::Column::LastUpdate,
        ProductSortField::Title => product::Column::Title,
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Product>, u64)> {
        let mut query = product::Entity::find();

        if let Some(collection_id) = filter.collection_id {
            query = query.filter(product::Column::CollectionId.eq(collection_id));
        }
        if let Some(gt) = filter.unit_price_gt {
            query = query.filter(product::Column::UnitPrice.gt(gt));
        }
        if let Some(lt) = filter.unit_price_lt {
            query = query.filter(product::Column::UnitPrice.lt(lt));
        }
        if let Some(term) = &filter.search {
            let pattern = contains_pattern(term);
            query = query.filter(Expr::cust_with_values(
                "(products.title ILIKE ? ESCAPE '!' OR products.description ILIKE ? ESCAPE '!')",
                [pattern.clone(), pattern],
            ));
        }

        for ordering in &filter.ordering {
            let order = if ordering.descending {
                Order::Desc
            } else {
                Order::Asc
            };
            query = query.order_by(sort_column(ordering.field), order);
        }
        query = query.order_by_asc(product::Column::Id);

        let count = query.clone().count(self.base.db()).await?;
        let models = query
            .limit(page.limit())
            .offset(page.offset())
            .all(self.base.db())
            .await?;

        Ok((models.into_iter().map(Product::from).collect(), count))
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Product::from))
    }

    async fn create(&self, input: CreateProduct) -> CatalogResult<Product> {
        let active_model: product::ActiveModel = input.into();
        let model = self.base.insert(active_model).await?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        let mut product: Product = self
            .base
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?
            .into();

        product.apply_update(input);

        let model = self
            .base
            .update(product::ActiveModel {
                id: Set(product.id),
                title: Set(product.title),
                slug: Set(product.slug),
                description: Set(product.description),
                unit_price: Set(money(product.unit_price)),
                inventory: Set(product.inventory),
                last_update: Set(product.last_update.into()),
                collection_id: Set(product.collection_id),
            })
            .await?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let rows = self.base.delete_by_id(id).await?;
        if rows > 0 {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(rows > 0)
    }

    async fn collection_exists(&self, collection_id: Uuid) -> CatalogResult<bool> {
        let count = collection::Entity::find_by_id(collection_id)
            .count(self.base.db())
            .await?;
        Ok(count > 0)
    }

    async fn count_order_items(&self, id: Uuid) -> CatalogResult<u64> {
        let count = order_item::Entity::find()
            .filter(order_item::Column::ProductId.eq(id))
            .count(self.base.db())
            .await?;
        Ok(count)
    }
}

pub struct PgReviewRepository {
    base: BaseRepository<review::Entity>,
}

impl PgReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn find_scoped(&self, product_id: Uuid, id: Uuid) -> CatalogResult<Option<review::Model>> {
        let model = review::Entity::find_by_id(id)
            .filter(review::Column::ProductId.eq(product_id))
            .one(self.base.db())
            .await?;
        Ok(model)
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn list(&self, product_id: Uuid) -> CatalogResult<Vec<Review>> {
        let models = review::Entity::find()
            .filter(review::Column::ProductId.eq(product_id))
            .order_by_asc(review::Column::Id)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Review::from).collect())
    }

    async fn get(&self, product_id: Uuid, id: Uuid) -> CatalogResult<Option<Review>> {
        Ok(self.find_scoped(product_id, id).await?.map(Review::from))
    }

    async fn create(&self, review: Review) -> CatalogResult<Review> {
        let model = self.base.insert(review.into()).await?;

        tracing::info!(review_id = %model.id, product_id = %model.product_id, "Created review");
        Ok(model.into())
    }

    async fn update(
        &self,
        product_id: Uuid,
        id: Uuid,
        input: UpdateReview,
    ) -> CatalogResult<Review> {
        let mut review: Review = self
            .find_scoped(product_id, id)
            .await?
            .ok_or(CatalogError::ReviewNotFound(id))?
            .into();

        review.apply_update(input);
        let model = self.base.update(review.into()).await?;

        tracing::info!(review_id = %id, "Updated review");
        Ok(model.into())
    }

    async fn delete(&self, product_id: Uuid, id: Uuid) -> CatalogResult<bool> {
        let result = review::Entity::delete_many()
            .filter(review::Column::Id.eq(id))
            .filter(review::Column::ProductId.eq(product_id))
            .exec(self.base.db())
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(review_id = %id, "Deleted review");
        }
        Ok(result.rows_affected > 0)
    }

    async fn product_exists(&self, product_id: Uuid) -> CatalogResult<bool> {
        let count = product::Entity::find_by_id(product_id)
            .count(self.base.db())
            .await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        [("num_items", Value::BigInt(Some(n)))].into_iter().collect()
    }

    fn product_model(collection_id: Uuid) -> product::Model {
        product::Model {
            id: Uuid::now_v7(),
            title: "Green Tea".to_string(),
            slug: "green-tea".to_string(),
            description: None,
            unit_price: dec!(10),
            inventory: 4,
            last_update: Utc::now().into(),
            collection_id,
        }
    }

    #[tokio::test]
    async fn get_collection_includes_products_count() {
        let model = collection::Model {
            id: Uuid::now_v7(),
            title: "Beverages".to_string(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model.clone()]])
            .append_query_results([vec![count_row(3)]])
            .into_connection();
        let repo = PgCollectionRepository::new(db);

        let collection = repo.get_by_id(model.id).await.unwrap().unwrap();
        assert_eq!(collection.title, "Beverages");
        assert_eq!(collection.products_count, 3);
    }

    #[tokio::test]
    async fn product_row_maps_money_fields() {
        let model = product_model(Uuid::now_v7());
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model.clone()]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo.get_by_id(model.id).await.unwrap().unwrap();
        assert_eq!(product.unit_price.to_string(), "10.00");
        assert_eq!(product.price_with_tax.to_string(), "11.00");
    }

    #[tokio::test]
    async fn order_item_count_reads_aggregate() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(2)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert_eq!(repo.count_order_items(Uuid::now_v7()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn list_counts_before_paging() {
        let collection_id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(11)]])
            .append_query_results([vec![product_model(collection_id)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let filter = ProductFilter {
            collection_id: Some(collection_id),
            ..Default::default()
        };
        let page = PageRequest::parse(Some("2")).unwrap();
        let (products, count) = repo.list(filter, page).await.unwrap();

        assert_eq!(count, 11);
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn search_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("tea"), "%tea%");
        assert_eq!(contains_pattern("50%"), "%50!%%");
        assert_eq!(contains_pattern("a_b!"), "%a!_b!!%");
    }

    #[tokio::test]
    async fn search_binds_escaped_pattern() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(0)]])
            .append_query_results([Vec::<product::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db.clone());

        let filter = ProductFilter {
            search: Some("_".to_string()),
            ..Default::default()
        };
        let (products, count) = repo.list(filter, PageRequest::default()).await.unwrap();
        assert_eq!(count, 0);
        assert!(products.is_empty());

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("ESCAPE '!'"), "{log}");
        assert!(log.contains("%!_%"), "{log}");
    }
}
