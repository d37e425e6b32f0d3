use axum::Router;
use domain_catalog::{
    CollectionService, PgCollectionRepository, PgProductRepository, PgReviewRepository,
    ProductService, ReviewService, handlers,
};

pub fn router(state: &crate::state::AppState) -> Router {
    handlers::router(
        CollectionService::new(PgCollectionRepository::new(state.db.clone())),
        ProductService::new(PgProductRepository::new(state.db.clone())),
        ReviewService::new(PgReviewRepository::new(state.db.clone())),
    )
}
