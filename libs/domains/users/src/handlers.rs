use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, AuthUser, TokenPair, ValidatedJson,
    errors::{
        handlers::method_not_allowed,
        responses::{
            BadRequestValidationResponse, InternalServerErrorResponse, UnauthorizedResponse,
        },
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{AccessToken, CreateUser, TokenCreate, TokenRefresh, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Mount point of the auth routes
pub const AUTH_URL: &str = "/auth";

const TAG: &str = "Auth";

#[derive(OpenApi)]
#[openapi(
    paths(register, me, create_tokens, refresh_token),
    components(schemas(UserResponse, CreateUser, TokenCreate, TokenRefresh, TokenPair, AccessToken)),
    tags(
        (name = TAG, description = "User registration and JWT issuance")
    )
)]
pub struct ApiDoc;

/// Auth routes mounted at [`AUTH_URL`].
///
/// `/users/me` needs the JWT middleware in front of this router.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let routes = Router::new()
        .route("/users", post(register))
        .route("/users/me", get(me))
        .route("/jwt/create", post(create_tokens))
        .route("/jwt/refresh", post(refresh_token))
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(Arc::new(service));

    Router::new().nest(AUTH_URL, routes)
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.register(input).await?;

    AuditEvent::new(
        Some(user.id.to_string()),
        "user.register",
        Some(format!("user:{}", user.id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .log();

    Ok((StatusCode::CREATED, Json(user)))
}

/// The authenticated user
#[utoipa::path(
    get,
    path = "/users/me",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn me<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    user: AuthUser,
) -> UserResult<Json<UserResponse>> {
    Ok(Json(service.get_user(user.id).await?))
}

/// Exchange username and password for a token pair
#[utoipa::path(
    post,
    path = "/jwt/create",
    tag = TAG,
    request_body = TokenCreate,
    responses(
        (status = 200, description = "Access and refresh tokens", body = TokenPair),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_tokens<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<TokenCreate>,
) -> UserResult<Json<TokenPair>> {
    let username = input.username.clone();

    match service.create_tokens(input).await {
        Ok((user, tokens)) => {
            AuditEvent::new(
                Some(user.id.to_string()),
                "user.login",
                Some(format!("user:{}", user.id)),
                AuditOutcome::Success,
            )
            .with_request(&headers)
            .log();
            Ok(Json(tokens))
        }
        Err(err @ UserError::InvalidCredentials) => {
            AuditEvent::new(None, "user.login", None, AuditOutcome::Failure)
                .with_request(&headers)
                .with_details(serde_json::json!({ "username": username }))
                .log();
            Err(err)
        }
        Err(err) => Err(err),
    }
}

/// Trade a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/jwt/refresh",
    tag = TAG,
    request_body = TokenRefresh,
    responses(
        (status = 200, description = "New access token", body = AccessToken),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn refresh_token<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<TokenRefresh>,
) -> UserResult<Json<AccessToken>> {
    Ok(Json(service.refresh_access(input).await?))
}
