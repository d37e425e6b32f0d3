//! UUID path parameter extractors.

use crate::errors::{ErrorCode, error_response};
use axum::{
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Single UUID path parameter, e.g. `/products/{id}`.
///
/// ```ignore
/// async fn get_product(UuidPath(id): UuidPath) -> String {
///     format!("Product ID: {}", id)
/// }
/// ```
pub struct UuidPath(pub Uuid);

/// Parent and child UUIDs of a nested route, e.g. `/carts/{cart_pk}/items/{id}`.
///
/// The first segment is the parent, the second the child.
pub struct NestedUuidPath(pub Uuid, pub Uuid);

fn parse(raw: &str) -> Result<Uuid, Response> {
    Uuid::parse_str(raw).map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid UUID: {}", raw),
            ErrorCode::InvalidUuid,
        )
    })
}

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        parse(&id).map(UuidPath)
    }
}

impl<S> FromRequestParts<S> for NestedUuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((parent, child)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        Ok(NestedUuidPath(parse(&parent)?, parse(&child)?))
    }
}
