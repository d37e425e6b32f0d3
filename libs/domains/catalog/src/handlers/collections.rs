use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, UuidPath, ValidatedJson,
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

use crate::entity::collection;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Collection, CreateCollection, UpdateCollection};
use crate::repository::CollectionRepository;
use crate::service::CollectionService;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_collections,
        create_collection,
        get_collection,
        replace_collection,
        update_collection,
        delete_collection,
    ),
    components(schemas(Collection, CreateCollection, UpdateCollection)),
    tags(
        (name = collection::Model::TAG, description = "Product collections")
    )
)]
pub struct ApiDoc;

pub fn router<R: CollectionRepository + 'static>(service: CollectionService<R>) -> Router {
    Router::new()
        .route("/", get(list_collections).post(create_collection))
        .route(
            "/{id}",
            get(get_collection)
                .put(replace_collection)
                .patch(update_collection)
                .delete(delete_collection),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(Arc::new(service))
}

/// List all collections with their product counts
#[utoipa::path(
    get,
    path = "",
    tag = collection::Model::TAG,
    responses(
        (status = 200, description = "All collections", body = Vec<Collection>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_collections<R: CollectionRepository>(
    State(service): State<Arc<CollectionService<R>>>,
) -> CatalogResult<Json<Vec<Collection>>> {
    Ok(Json(service.list_collections().await?))
}

/// Create a collection
#[utoipa::path(
    post,
    path = "",
    tag = collection::Model::TAG,
    request_body = CreateCollection,
    responses(
        (status = 201, description = "Collection created", body = Collection),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_collection<R: CollectionRepository>(
    State(service): State<Arc<CollectionService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCollection>,
) -> CatalogResult<impl IntoResponse> {
    let collection = service.create_collection(input).await?;
    Ok((StatusCode::CREATED, Json(collection)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = collection::Model::TAG,
    params(("id" = Uuid, Path, description = "Collection ID")),
    responses(
        (status = 200, description = "Collection found", body = Collection),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_collection<R: CollectionRepository>(
    State(service): State<Arc<CollectionService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Collection>> {
    Ok(Json(service.get_collection(id).await?))
}

/// Replace a collection
#[utoipa::path(
    put,
    path = "/{id}",
    tag = collection::Model::TAG,
    params(("id" = Uuid, Path, description = "Collection ID")),
    request_body = CreateCollection,
    responses(
        (status = 200, description = "Collection replaced", body = Collection),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn replace_collection<R: CollectionRepository>(
    State(service): State<Arc<CollectionService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateCollection>,
) -> CatalogResult<Json<Collection>> {
    Ok(Json(service.replace_collection(id, input).await?))
}

/// Partially update a collection
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = collection::Model::TAG,
    params(("id" = Uuid, Path, description = "Collection ID")),
    request_body = UpdateCollection,
    responses(
        (status = 200, description = "Collection updated", body = Collection),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_collection<R: CollectionRepository>(
    State(service): State<Arc<CollectionService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCollection>,
) -> CatalogResult<Json<Collection>> {
    Ok(Json(service.update_collection(id, input).await?))
}

/// Delete a collection that holds no products
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = collection::Model::TAG,
    params(("id" = Uuid, Path, description = "Collection ID")),
    responses(
        (status = 204, description = "Collection deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 405, response = MethodNotAllowedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_collection<R: CollectionRepository>(
    State(service): State<Arc<CollectionService<R>>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> CatalogResult<StatusCode> {
    let resource = Some(format!("{}:{}", collection::Model::NAME, id));

    match service.delete_collection(id).await {
        Ok(()) => {
            AuditEvent::new(None, "collection.delete", resource, AuditOutcome::Success)
                .with_request(&headers)
                .log();
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err @ CatalogError::CollectionHasProducts { products, .. }) => {
            AuditEvent::new(None, "collection.delete", resource, AuditOutcome::Denied)
                .with_request(&headers)
                .with_details(json!({ "products": products }))
                .log();
            Err(err)
        }
        Err(err) => Err(err),
    }
}
