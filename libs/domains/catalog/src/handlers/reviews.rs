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

use crate::entity::review;
use crate::error::CatalogResult;
use crate::models::{CreateReview, Review, UpdateReview};
use crate::repository::ReviewRepository;
use crate::service::ReviewService;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_reviews,
        create_review,
        get_review,
        replace_review,
        update_review,
        delete_review,
    ),
    components(schemas(Review, CreateReview, UpdateReview)),
    tags(
        (name = review::Model::TAG, description = "Product reviews")
    )
)]
pub struct ApiDoc;

/// Routes relative to `/products/{product_pk}/reviews`.
pub fn router<R: ReviewRepository + 'static>(service: ReviewService<R>) -> Router {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route(
            "/{id}",
            get(get_review)
                .put(replace_review)
                .patch(update_review)
                .delete(delete_review),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(Arc::new(service))
}

/// Reviews of one product
#[utoipa::path(
    get,
    path = "",
    tag = review::Model::TAG,
    params(("product_pk" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Reviews of the product", body = Vec<Review>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_reviews<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    UuidPath(product_id): UuidPath,
) -> CatalogResult<Json<Vec<Review>>> {
    Ok(Json(service.list_reviews(product_id).await?))
}

/// Review a product; the product is taken from the path
#[utoipa::path(
    post,
    path = "",
    tag = review::Model::TAG,
    params(("product_pk" = Uuid, Path, description = "Product ID")),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_review<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    UuidPath(product_id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateReview>,
) -> CatalogResult<impl IntoResponse> {
    let review = service.create_review(product_id, input).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = review::Model::TAG,
    params(
        ("product_pk" = Uuid, Path, description = "Product ID"),
        ("id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review found", body = Review),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_review<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    NestedUuidPath(product_id, id): NestedUuidPath,
) -> CatalogResult<Json<Review>> {
    Ok(Json(service.get_review(product_id, id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = review::Model::TAG,
    params(
        ("product_pk" = Uuid, Path, description = "Product ID"),
        ("id" = Uuid, Path, description = "Review ID")
    ),
    request_body = CreateReview,
    responses(
        (status = 200, description = "Review replaced", body = Review),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn replace_review<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    NestedUuidPath(product_id, id): NestedUuidPath,
    ValidatedJson(input): ValidatedJson<CreateReview>,
) -> CatalogResult<Json<Review>> {
    Ok(Json(service.replace_review(product_id, id, input).await?))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = review::Model::TAG,
    params(
        ("product_pk" = Uuid, Path, description = "Product ID"),
        ("id" = Uuid, Path, description = "Review ID")
    ),
    request_body = UpdateReview,
    responses(
        (status = 200, description = "Review updated", body = Review),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_review<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    NestedUuidPath(product_id, id): NestedUuidPath,
    ValidatedJson(input): ValidatedJson<UpdateReview>,
) -> CatalogResult<Json<Review>> {
    Ok(Json(service.update_review(product_id, id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = review::Model::TAG,
    params(
        ("product_pk" = Uuid, Path, description = "Product ID"),
        ("id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_review<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    NestedUuidPath(product_id, id): NestedUuidPath,
) -> CatalogResult<StatusCode> {
    service.delete_review(product_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
