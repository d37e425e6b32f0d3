use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    NestedUuidPath, UuidPath, ValidatedJson,
    errors::{
        handlers::method_not_allowed,
        responses::{
            BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
            NotFoundResponse,
        },
    },
};
use core_proc_macros::ApiResource;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity::cart_item;
use crate::error::CartResult;
use crate::models::{AddCartItem, CartItem, UpdateCartItem};
use crate::repository::CartRepository;
use crate::service::CartService;

#[derive(OpenApi)]
#[openapi(
    paths(list_items, add_item, get_item, update_item, delete_item),
    components(schemas(CartItem, AddCartItem, UpdateCartItem)),
    tags(
        (name = cart_item::Model::TAG, description = "Items of one cart")
    )
)]
pub struct ApiDoc;

/// Routes relative to `/carts/{cart_pk}/items`.
///
/// `POST` takes [`AddCartItem`], `PATCH` takes [`UpdateCartItem`]; there is no `PUT`.
pub fn router<R: CartRepository + 'static>(service: Arc<CartService<R>>) -> Router {
    Router::new()
        .route("/", get(list_items).post(add_item))
        .route("/{id}", get(get_item).patch(update_item).delete(delete_item))
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(service)
}

#[utoipa::path(
    get,
    path = "",
    tag = cart_item::Model::TAG,
    params(("cart_pk" = Uuid, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Items of the cart", body = Vec<CartItem>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    UuidPath(cart_id): UuidPath,
) -> CartResult<Json<Vec<CartItem>>> {
    Ok(Json(service.list_items(cart_id).await?))
}

/// Add a product to the cart
///
/// Adding a product already in the cart increases its quantity.
#[utoipa::path(
    post,
    path = "",
    tag = cart_item::Model::TAG,
    params(("cart_pk" = Uuid, Path, description = "Cart ID")),
    request_body = AddCartItem,
    responses(
        (status = 201, description = "Item added or merged", body = CartItem),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_item<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    UuidPath(cart_id): UuidPath,
    ValidatedJson(input): ValidatedJson<AddCartItem>,
) -> CartResult<impl IntoResponse> {
    let item = service.add_item(cart_id, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = cart_item::Model::TAG,
    params(
        ("cart_pk" = Uuid, Path, description = "Cart ID"),
        ("id" = Uuid, Path, description = "Cart item ID")
    ),
    responses(
        (status = 200, description = "Cart item found", body = CartItem),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    NestedUuidPath(cart_id, id): NestedUuidPath,
) -> CartResult<Json<CartItem>> {
    Ok(Json(service.get_item(cart_id, id).await?))
}

/// Change the quantity of a cart item
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = cart_item::Model::TAG,
    params(
        ("cart_pk" = Uuid, Path, description = "Cart ID"),
        ("id" = Uuid, Path, description = "Cart item ID")
    ),
    request_body = UpdateCartItem,
    responses(
        (status = 200, description = "Cart item updated", body = CartItem),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    NestedUuidPath(cart_id, id): NestedUuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCartItem>,
) -> CartResult<Json<CartItem>> {
    Ok(Json(service.update_item(cart_id, id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = cart_item::Model::TAG,
    params(
        ("cart_pk" = Uuid, Path, description = "Cart ID"),
        ("id" = Uuid, Path, description = "Cart item ID")
    ),
    responses(
        (status = 204, description = "Cart item removed"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    NestedUuidPath(cart_id, id): NestedUuidPath,
) -> CartResult<StatusCode> {
    service.delete_item(cart_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
