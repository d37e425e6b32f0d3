use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Cart {0} not found")]
    CartNotFound(Uuid),

    #[error("Cart item {0} not found")]
    ItemNotFound(Uuid),

    /// The body named a product that does not exist.
    #[error("No product with the given ID was found.")]
    UnknownProduct(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CartResult<T> = Result<T, CartError>;

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::CartNotFound(_) | CartError::ItemNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            CartError::UnknownProduct(_) | CartError::Validation(_) => {
                AppError::BadRequest(err.to_string())
            }
            CartError::Database(e) => AppError::Database(e),
            CartError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn unknown_product_is_a_bad_request() {
        let err = CartError::UnknownProduct(Uuid::now_v7());
        assert_eq!(err.to_string(), "No product with the given ID was found.");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_cart_is_not_found() {
        let response = CartError::CartNotFound(Uuid::new_v4()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
