use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, UuidPath,
    errors::{
        handlers::method_not_allowed,
        responses::{BadRequestUuidResponse, InternalServerErrorResponse, NotFoundResponse},
    },
};
use core_proc_macros::ApiResource;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity::cart;
use crate::error::CartResult;
use crate::models::{Cart, CartItem, SimpleProduct};
use crate::repository::CartRepository;
use crate::service::CartService;

#[derive(OpenApi)]
#[openapi(
    paths(create_cart, get_cart, delete_cart),
    components(schemas(Cart, CartItem, SimpleProduct)),
    tags(
        (name = cart::Model::TAG, description = "Anonymous shopping carts")
    )
)]
pub struct ApiDoc;

pub fn router<R: CartRepository + 'static>(service: Arc<CartService<R>>) -> Router {
    Router::new()
        .route("/", post(create_cart))
        .route("/{id}", get(get_cart).delete(delete_cart))
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(service)
}

/// Start an empty cart
#[utoipa::path(
    post,
    path = "",
    tag = cart::Model::TAG,
    responses(
        (status = 201, description = "Cart created", body = Cart),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_cart<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
) -> CartResult<impl IntoResponse> {
    let cart = service.create_cart().await?;
    Ok((StatusCode::CREATED, Json(cart)))
}

/// A cart with its items and total
#[utoipa::path(
    get,
    path = "/{id}",
    tag = cart::Model::TAG,
    params(("id" = Uuid, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Cart found", body = Cart),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_cart<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    UuidPath(id): UuidPath,
) -> CartResult<Json<Cart>> {
    Ok(Json(service.get_cart(id).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = cart::Model::TAG,
    params(("id" = Uuid, Path, description = "Cart ID")),
    responses(
        (status = 204, description = "Cart deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_cart<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> CartResult<StatusCode> {
    service.delete_cart(id).await?;

    AuditEvent::new(
        None,
        "cart.delete",
        Some(format!("{}:{}", cart::Model::NAME, id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .log();

    Ok(StatusCode::NO_CONTENT)
}
