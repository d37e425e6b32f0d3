use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Collection {0} not found")]
    CollectionNotFound(Uuid),

    #[error("Product {0} not found")]
    ProductNotFound(Uuid),

    #[error("Review {0} not found")]
    ReviewNotFound(Uuid),

    /// A product body referenced a collection that does not exist.
    #[error("Invalid pk \"{0}\" - object does not exist.")]
    UnknownCollection(Uuid),

    #[error("Collection cannot be deleted because it includes one or more products.")]
    CollectionHasProducts { id: Uuid, products: u64 },

    #[error("Product cannot be deleted because it is associated with an order item.")]
    ProductHasOrderItems { id: Uuid, order_items: u64 },

    #[error("Invalid page.")]
    InvalidPage,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CollectionNotFound(_)
            | CatalogError::ProductNotFound(_)
            | CatalogError::ReviewNotFound(_)
            | CatalogError::InvalidPage => AppError::NotFound(err.to_string()),
            CatalogError::UnknownCollection(_) | CatalogError::Validation(_) => {
                AppError::BadRequest(err.to_string())
            }
            CatalogError::CollectionHasProducts { .. } | CatalogError::ProductHasOrderItems { .. } => {
                AppError::MethodNotAllowed(err.to_string())
            }
            CatalogError::Database(e) => AppError::Database(e),
            CatalogError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
