use async_trait::async_trait;
use axum_helpers::PageRequest;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Collection, CreateCollection, CreateProduct, Product, ProductFilter, ProductSortField, Review,
    UpdateCollection, UpdateProduct, UpdateReview,
};

/// Persistence for collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// All collections with their product counts
    async fn list(&self) -> CatalogResult<Vec<Collection>>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Collection>>;

    async fn create(&self, input: CreateCollection) -> CatalogResult<Collection>;

    async fn update(&self, id: Uuid, input: UpdateCollection) -> CatalogResult<Collection>;

    /// Returns whether a row was removed
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// Persistence for products.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// One page of matching products plus the total match count
    async fn list(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Product>, u64)>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    async fn create(&self, input: CreateProduct) -> CatalogResult<Product>;

    async fn update(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product>;

    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;

    async fn collection_exists(&self, collection_id: Uuid) -> CatalogResult<bool>;

    /// Order items referencing the product
    async fn count_order_items(&self, id: Uuid) -> CatalogResult<u64>;
}

/// Persistence for reviews. Every call is scoped to one product.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn list(&self, product_id: Uuid) -> CatalogResult<Vec<Review>>;

    async fn get(&self, product_id: Uuid, id: Uuid) -> CatalogResult<Option<Review>>;

    async fn create(&self, review: Review) -> CatalogResult<Review>;

    async fn update(
        &self,
        product_id: Uuid,
        id: Uuid,
        input: UpdateReview,
    ) -> CatalogResult<Review>;

    async fn delete(&self, product_id: Uuid, id: Uuid) -> CatalogResult<bool>;

    async fn product_exists(&self, product_id: Uuid) -> CatalogResult<bool>;
}

#[derive(Debug, Default)]
struct CatalogStore {
    collections: HashMap<Uuid, (Uuid, String)>,
    products: HashMap<Uuid, Product>,
    reviews: HashMap<Uuid, Review>,
    /// order item id -> product id
    order_items: HashMap<Uuid, Uuid>,
}

impl CatalogStore {
    fn collection(&self, id: Uuid) -> Option<Collection> {
        self.collections.get(&id).map(|(id, title)| Collection {
            id: *id,
            title: title.clone(),
            products_count: self
                .products
                .values()
                .filter(|p| p.collection_id == *id)
                .count() as u64,
        })
    }
}

/// In-memory catalog for development and tests.
///
/// One store backs all three repository traits so the delete guards see
/// the same rows the handlers write.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    store: Arc<RwLock<CatalogStore>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an order item for `product_id`; orders have no write API.
    pub async fn record_order_item(&self, product_id: Uuid) -> Uuid {
        let id = Uuid::now_v7();
        self.store.write().await.order_items.insert(id, product_id);
        id
    }
}

fn compare_products(a: &Product, b: &Product, filter: &ProductFilter) -> Ordering {
    for ordering in &filter.ordering {
        let cmp = match ordering.field {
            ProductSortField::UnitPrice => a.unit_price.cmp(&b.unit_price),
            ProductSortField::LastUpdate => a.last_update.cmp(&b.last_update),
            ProductSortField::Title => a.title.cmp(&b.title),
        };
        let cmp = if ordering.descending { cmp.reverse() } else { cmp };
        if cmp != Ordering::Equal {
            return cmp;
        }
    }
    a.id.cmp(&b.id)
}

#[async_trait]
impl CollectionRepository for InMemoryCatalog {
    async fn list(&self) -> CatalogResult<Vec<Collection>> {
        let store = self.store.read().await;
        let mut ids: Vec<Uuid> = store.collections.keys().copied().collect();
        ids.sort();
        Ok(ids.into_iter().filter_map(|id| store.collection(id)).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Collection>> {
        Ok(self.store.read().await.collection(id))
    }

    async fn create(&self, input: CreateCollection) -> CatalogResult<Collection> {
        let mut store = self.store.write().await;
        let id = Uuid::now_v7();
        store.collections.insert(id, (id, input.title));

        tracing::info!(collection_id = %id, "Created collection");
        store
            .collection(id)
            .ok_or_else(|| CatalogError::Internal("collection vanished after insert".to_string()))
    }

    async fn update(&self, id: Uuid, input: UpdateCollection) -> CatalogResult<Collection> {
        let mut store = self.store.write().await;
        let (_, title) = store
            .collections
            .get_mut(&id)
            .ok_or(CatalogError::CollectionNotFound(id))?;
        if let Some(new_title) = input.title {
            *title = new_title;
        }

        tracing::info!(collection_id = %id, "Updated collection");
        store.collection(id).ok_or(CatalogError::CollectionNotFound(id))
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut store = self.store.write().await;
        if store.products.values().any(|p| p.collection_id == id) {
            return Err(CatalogError::CollectionHasProducts {
                id,
                products: store.products.values().filter(|p| p.collection_id == id).count() as u64,
            });
        }

        let removed = store.collections.remove(&id).is_some();
        if removed {
            tracing::info!(collection_id = %id, "Deleted collection");
        }
        Ok(removed)
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn list(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Product>, u64)> {
        let store = self.store.read().await;

        let mut matching: Vec<Product> = store
            .products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| compare_products(a, b, &filter));

        let count = matching.len() as u64;
        let results = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok((results, count))
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        Ok(self.store.read().await.products.get(&id).cloned())
    }

    async fn create(&self, input: CreateProduct) -> CatalogResult<Product> {
        let mut store = self.store.write().await;
        if !store.collections.contains_key(&input.collection_id) {
            return Err(CatalogError::UnknownCollection(input.collection_id));
        }

        let product = Product::new(input);
        store.products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        let mut store = self.store.write().await;
        if let Some(collection_id) = input.collection_id {
            if !store.collections.contains_key(&collection_id) {
                return Err(CatalogError::UnknownCollection(collection_id));
            }
        }

        let product = store
            .products
            .get_mut(&id)
            .ok_or(CatalogError::ProductNotFound(id))?;
        product.apply_update(input);

        tracing::info!(product_id = %id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut store = self.store.write().await;
        let order_items = store.order_items.values().filter(|p| **p == id).count() as u64;
        if order_items > 0 {
            return Err(CatalogError::ProductHasOrderItems { id, order_items });
        }

        let removed = store.products.remove(&id).is_some();
        if removed {
            store.reviews.retain(|_, r| r.product_id != id);
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(removed)
    }

    async fn collection_exists(&self, collection_id: Uuid) -> CatalogResult<bool> {
        Ok(self.store.read().await.collections.contains_key(&collection_id))
    }

    async fn count_order_items(&self, id: Uuid) -> CatalogResult<u64> {
        let store = self.store.read().await;
        Ok(store.order_items.values().filter(|p| **p == id).count() as u64)
    }
}

#[async_trait]
impl ReviewRepository for InMemoryCatalog {
    async fn list(&self, product_id: Uuid) -> CatalogResult<Vec<Review>> {
        let store = self.store.read().await;
        let mut reviews: Vec<Review> = store
            .reviews
            .values()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        reviews.sort_by_key(|r| r.id);
        Ok(reviews)
    }

    async fn get(&self, product_id: Uuid, id: Uuid) -> CatalogResult<Option<Review>> {
        let store = self.store.read().await;
        Ok(store
            .reviews
            .get(&id)
            .filter(|r| r.product_id == product_id)
            .cloned())
    }

    async fn create(&self, review: Review) -> CatalogResult<Review> {
        let mut store = self.store.write().await;
        if !store.products.contains_key(&review.product_id) {
            return Err(CatalogError::ProductNotFound(review.product_id));
        }
        store.reviews.insert(review.id, review.clone());

        tracing::info!(review_id = %review.id, product_id = %review.product_id, "Created review");
        Ok(review)
    }

    async fn update(
        &self,
        product_id: Uuid,
        id: Uuid,
        input: UpdateReview,
    ) -> CatalogResult<Review> {
        let mut store = self.store.write().await;
        let review = store
            .reviews
            .get_mut(&id)
            .filter(|r| r.product_id == product_id)
            .ok_or(CatalogError::ReviewNotFound(id))?;
        review.apply_update(input);

        tracing::info!(review_id = %id, "Updated review");
        Ok(review.clone())
    }

    async fn delete(&self, product_id: Uuid, id: Uuid) -> CatalogResult<bool> {
        let mut store = self.store.write().await;
        let owned = store
            .reviews
            .get(&id)
            .is_some_and(|r| r.product_id == product_id);
        if owned {
            store.reviews.remove(&id);
            tracing::info!(review_id = %id, "Deleted review");
        }
        Ok(owned)
    }

    async fn product_exists(&self, product_id: Uuid) -> CatalogResult<bool> {
        Ok(self.store.read().await.products.contains_key(&product_id))
    }
}
