use axum_helpers::PageRequest;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Collection, CreateCollection, CreateProduct, CreateReview, Product, ProductFilter, Review,
    UpdateCollection, UpdateProduct, UpdateReview,
};
use crate::repository::{CollectionRepository, ProductRepository, ReviewRepository};

fn validate(input: &impl Validate) -> CatalogResult<()> {
    input
        .validate()
        .map_err(|e| CatalogError::Validation(e.to_string()))
}

/// Collection use cases.
#[derive(Clone)]
pub struct CollectionService<R: CollectionRepository> {
    repository: Arc<R>,
}

impl<R: CollectionRepository> CollectionService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_collections(&self) -> CatalogResult<Vec<Collection>> {
        self.repository.list().await
    }

    pub async fn get_collection(&self, id: Uuid) -> CatalogResult<Collection> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::CollectionNotFound(id))
    }

    pub async fn create_collection(&self, input: CreateCollection) -> CatalogResult<Collection> {
        validate(&input)?;
        self.repository.create(input).await
    }

    /// Full replacement; every field is required.
    pub async fn replace_collection(
        &self,
        id: Uuid,
        input: CreateCollection,
    ) -> CatalogResult<Collection> {
        validate(&input)?;
        self.repository.update(id, input.into()).await
    }

    pub async fn update_collection(
        &self,
        id: Uuid,
        input: UpdateCollection,
    ) -> CatalogResult<Collection> {
        validate(&input)?;
        self.repository.update(id, input).await
    }

    /// Refuses while any product still belongs to the collection.
    pub async fn delete_collection(&self, id: Uuid) -> CatalogResult<()> {
        let collection = self.get_collection(id).await?;
        if collection.products_count > 0 {
            return Err(CatalogError::CollectionHasProducts {
                id,
                products: collection.products_count,
            });
        }

        if !self.repository.delete(id).await? {
            return Err(CatalogError::CollectionNotFound(id));
        }
        Ok(())
    }
}

/// Product use cases.
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// One page of products plus the total match count.
    ///
    /// A page past the last one fails with [`CatalogError::InvalidPage`].
    pub async fn list_products(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Product>, u64)> {
        let (products, count) = self.repository.list(filter, page).await?;
        page.ensure_within(count)
            .map_err(|_| CatalogError::InvalidPage)?;
        Ok((products, count))
    }

    pub async fn get_product(&self, id: Uuid) -> CatalogResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))
    }

    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<Product> {
        validate(&input)?;
        self.ensure_collection(input.collection_id).await?;
        self.repository.create(input).await
    }

    pub async fn replace_product(&self, id: Uuid, input: CreateProduct) -> CatalogResult<Product> {
        validate(&input)?;
        self.write_product(id, input.into()).await
    }

    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        validate(&input)?;
        self.write_product(id, input).await
    }

    async fn write_product(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        self.get_product(id).await?;
        if let Some(collection_id) = input.collection_id {
            self.ensure_collection(collection_id).await?;
        }
        self.repository.update(id, input).await
    }

    /// Refuses while any order item references the product.
    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<()> {
        self.get_product(id).await?;

        let order_items = self.repository.count_order_items(id).await?;
        if order_items > 0 {
            return Err(CatalogError::ProductHasOrderItems { id, order_items });
        }

        if !self.repository.delete(id).await? {
            return Err(CatalogError::ProductNotFound(id));
        }
        Ok(())
    }

    async fn ensure_collection(&self, collection_id: Uuid) -> CatalogResult<()> {
        if !self.repository.collection_exists(collection_id).await? {
            return Err(CatalogError::UnknownCollection(collection_id));
        }
        Ok(())
    }
}

/// Review use cases, always scoped to the product in the path.
#[derive(Clone)]
pub struct ReviewService<R: ReviewRepository> {
    repository: Arc<R>,
}

impl<R: ReviewRepository> ReviewService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_reviews(&self, product_id: Uuid) -> CatalogResult<Vec<Review>> {
        self.repository.list(product_id).await
    }

    pub async fn get_review(&self, product_id: Uuid, id: Uuid) -> CatalogResult<Review> {
        self.repository
            .get(product_id, id)
            .await?
            .ok_or(CatalogError::ReviewNotFound(id))
    }

    pub async fn create_review(
        &self,
        product_id: Uuid,
        input: CreateReview,
    ) -> CatalogResult<Review> {
        validate(&input)?;
        if !self.repository.product_exists(product_id).await? {
            return Err(CatalogError::ProductNotFound(product_id));
        }
        self.repository.create(Review::new(product_id, input)).await
    }

    pub async fn replace_review(
        &self,
        product_id: Uuid,
        id: Uuid,
        input: CreateReview,
    ) -> CatalogResult<Review> {
        validate(&input)?;
        self.repository.update(product_id, id, input.into()).await
    }

    pub async fn update_review(
        &self,
        product_id: Uuid,
        id: Uuid,
        input: UpdateReview,
    ) -> CatalogResult<Review> {
        validate(&input)?;
        self.repository.update(product_id, id, input).await
    }

    pub async fn delete_review(&self, product_id: Uuid, id: Uuid) -> CatalogResult<()> {
        if !self.repository.delete(product_id, id).await? {
            return Err(CatalogError::ReviewNotFound(id));
        }
        Ok(())
    }
}
