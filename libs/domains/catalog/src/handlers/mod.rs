pub mod collections;
pub mod products;
pub mod reviews;

use axum::Router;
use core_proc_macros::ApiResource;
use utoipa::OpenApi;

use crate::entity::{collection, product, review};
use crate::repository::{CollectionRepository, ProductRepository, ReviewRepository};
use crate::service::{CollectionService, ProductService, ReviewService};

/// Catalog endpoints relative to the API root.
#[derive(OpenApi)]
#[openapi(nest(
    (path = collection::Model::URL, api = collections::ApiDoc),
    (path = product::Model::URL, api = products::ApiDoc),
    (path = review::Model::URL, api = reviews::ApiDoc)
))]
pub struct ApiDoc;

/// Collections, products and product reviews under one router.
pub fn router<C, P, R>(
    collections: CollectionService<C>,
    products: ProductService<P>,
    reviews: ReviewService<R>,
) -> Router
where
    C: CollectionRepository + 'static,
    P: ProductRepository + 'static,
    R: ReviewRepository + 'static,
{
    Router::new()
        .nest(collection::Model::URL, collections::router(collections))
        .nest(product::Model::URL, products::router(products))
        .nest(review::Model::URL, reviews::router(reviews))
}
