use axum::{
    Json, Router,
    extract::{OriginalUri, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, AuditEvent, AuditOutcome, Page, PageRequest, UuidPath, ValidatedJson,
    errors::{
        handlers::method_not_allowed,
        responses::{
            BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
            MethodNotAllowedResponse, NotFoundResponse,
        },
    },
};
use core_proc_macros::ApiResource;
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity::product;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateProduct, Product, ProductFilter, ProductQuery, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        replace_product,
        update_product,
        delete_product,
    ),
    components(schemas(Product, CreateProduct, UpdateProduct)),
    tags(
        (name = product::Model::TAG, description = "Product catalog")
    )
)]
pub struct ApiDoc;

pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .put(replace_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(Arc::new(service))
}

/// List products, ten per page
///
/// Filters combine with AND. `search` matches title or description.
#[utoipa::path(
    get,
    path = "",
    tag = product::Model::TAG,
    params(ProductQuery),
    responses(
        (status = 200, description = "One page of products", body = Page<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Page<Product>>, AppError> {
    let page = PageRequest::parse(query.page.as_deref())?;
    let (products, count) = service
        .list_products(ProductFilter::from(&query), page)
        .await?;

    Ok(Json(Page::new(products, count, page, &uri)))
}

#[utoipa::path(
    post,
    path = "",
    tag = product::Model::TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> CatalogResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = product::Model::TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Product>> {
    Ok(Json(service.get_product(id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = product::Model::TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product replaced", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn replace_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> CatalogResult<Json<Product>> {
    Ok(Json(service.replace_product(id, input).await?))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = product::Model::TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> CatalogResult<Json<Product>> {
    Ok(Json(service.update_product(id, input).await?))
}

/// Delete a product that no order item references
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = product::Model::TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 405, response = MethodNotAllowedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> CatalogResult<StatusCode> {
    let resource = Some(format!("{}:{}", product::Model::NAME, id));

    match service.delete_product(id).await {
        Ok(()) => {
            AuditEvent::new(None, "product.delete", resource, AuditOutcome::Success)
                .with_request(&headers)
                .log();
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err @ CatalogError::ProductHasOrderItems { order_items, .. }) => {
            AuditEvent::new(None, "product.delete", resource, AuditOutcome::Denied)
                .with_request(&headers)
                .with_details(json!({ "order_items": order_items }))
                .log();
            Err(err)
        }
        Err(err) => Err(err),
    }
}
