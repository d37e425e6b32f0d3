pub mod carts;
pub mod items;

use axum::Router;
use core_proc_macros::ApiResource;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity::{cart, cart_item};
use crate::repository::CartRepository;
use crate::service::CartService;

#[derive(OpenApi)]
#[openapi(nest(
    (path = cart::Model::URL, api = carts::ApiDoc),
    (path = cart_item::Model::URL, api = items::ApiDoc)
))]
pub struct ApiDoc;

/// Carts and their nested items, sharing one service.
pub fn router<R: CartRepository + 'static>(service: CartService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .nest(cart::Model::URL, carts::router(shared_service.clone()))
        .nest(cart_item::Model::URL, items::router(shared_service))
}
