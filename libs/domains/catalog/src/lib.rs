//! Catalog Domain
//!
//! Collections, products and product reviews.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /collections, /products, /products/{product_pk}/reviews
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, delete guards, pagination bounds
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Traits + in-memory and PostgreSQL implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Domain types, request bodies, list filters
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{
//!     handlers, CollectionService, InMemoryCatalog, ProductService, ReviewService,
//! };
//!
//! let catalog = InMemoryCatalog::new();
//! let router = handlers::router(
//!     CollectionService::new(catalog.clone()),
//!     ProductService::new(catalog.clone()),
//!     ReviewService::new(catalog),
//! );
//! ```
//!
//! Deleting a collection that still has products, or a product referenced by
//! an order item, fails with `405 Method Not Allowed`.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use core_proc_macros::ApiResource;
pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use models::{
    Collection, CreateCollection, CreateProduct, CreateReview, Product, ProductFilter,
    ProductOrdering, ProductQuery, ProductSortField, Review, TAX_RATE, UpdateCollection,
    UpdateProduct, UpdateReview,
};
pub use postgres::{PgCollectionRepository, PgProductRepository, PgReviewRepository};
pub use repository::{CollectionRepository, InMemoryCatalog, ProductRepository, ReviewRepository};
pub use service::{CollectionService, ProductService, ReviewService};
