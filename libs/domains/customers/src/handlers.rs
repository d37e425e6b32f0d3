use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, AuthUser, UuidPath, ValidatedJson,
    errors::{
        handlers::method_not_allowed,
        responses::{
            BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
            NotFoundResponse, UnauthorizedResponse,
        },
    },
};
use core_proc_macros::ApiResource;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity::customer;
use crate::error::CustomerResult;
use crate::models::{CreateCustomer, Customer, Membership, UpdateCustomer};
use crate::repository::CustomerRepository;
use crate::service::CustomerService;

#[derive(OpenApi)]
#[openapi(
    paths(create_customer, get_customer, update_customer, get_me, update_me),
    components(schemas(Customer, CreateCustomer, UpdateCustomer, Membership)),
    tags(
        (name = customer::Model::TAG, description = "Customer profiles")
    )
)]
pub struct ApiDoc;

/// Customer routes mounted at `/customers`.
///
/// The `/me` routes need an [`AuthUser`], so the app must run the JWT
/// middleware in front of this router.
pub fn router<R: CustomerRepository + 'static>(service: CustomerService<R>) -> Router {
    let routes = Router::new()
        .route("/", post(create_customer))
        .route("/me", get(get_me).put(update_me))
        .route("/{id}", get(get_customer).put(update_customer))
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(Arc::new(service));

    Router::new().nest(customer::Model::URL, routes)
}

#[utoipa::path(
    post,
    path = "",
    tag = customer::Model::TAG,
    request_body = CreateCustomer,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_customer<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateCustomer>,
) -> CustomerResult<impl IntoResponse> {
    let customer = service.create_customer(input).await?;

    AuditEvent::new(
        Some(customer.user_id.to_string()),
        "customer.create",
        Some(format!("{}:{}", customer::Model::NAME, customer.id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .log();

    Ok((StatusCode::CREATED, Json(customer)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = customer::Model::TAG,
    params(("id" = Uuid, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer found", body = Customer),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_customer<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    UuidPath(id): UuidPath,
) -> CustomerResult<Json<Customer>> {
    Ok(Json(service.get_customer(id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = customer::Model::TAG,
    params(("id" = Uuid, Path, description = "Customer ID")),
    request_body = UpdateCustomer,
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_customer<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCustomer>,
) -> CustomerResult<Json<Customer>> {
    Ok(Json(service.update_customer(id, input).await?))
}

/// Profile of the calling user
///
/// Created with default values on first access.
#[utoipa::path(
    get,
    path = "/me",
    tag = customer::Model::TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile of the caller", body = Customer),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_me<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    user: AuthUser,
) -> CustomerResult<Json<Customer>> {
    Ok(Json(service.me(user.id).await?))
}

/// Update the profile of the calling user
#[utoipa::path(
    put,
    path = "/me",
    tag = customer::Model::TAG,
    security(("bearer_auth" = [])),
    request_body = UpdateCustomer,
    responses(
        (status = 200, description = "Profile updated", body = Customer),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_me<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<UpdateCustomer>,
) -> CustomerResult<Json<Customer>> {
    Ok(Json(service.update_me(user.id, input).await?))
}
