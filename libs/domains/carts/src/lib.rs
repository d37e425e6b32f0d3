//! Carts Domain
//!
//! Anonymous carts identified by a random id, and their items.
//!
//! ```text
//! POST   /carts                      → Cart
//! GET    /carts/{id}                 → Cart { items[], total_price }
//! DELETE /carts/{id}
//! GET    /carts/{cart_pk}/items      → [CartItem]
//! POST   /carts/{cart_pk}/items      ← AddCartItem
//! PATCH  /carts/{cart_pk}/items/{id} ← UpdateCartItem
//! DELETE /carts/{cart_pk}/items/{id}
//! ```
//!
//! The cart of an item always comes from the path; adding a product the
//! cart already holds merges the quantities.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_carts::{handlers, CartService, InMemoryCartRepository};
//!
//! let router = handlers::router(CartService::new(InMemoryCartRepository::new()));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use core_proc_macros::ApiResource;
pub use error::{CartError, CartResult};
pub use handlers::ApiDoc;
pub use models::{AddCartItem, Cart, CartItem, SimpleProduct, UpdateCartItem};
pub use postgres::PgCartRepository;
pub use repository::{CartRepository, InMemoryCartRepository};
pub use service::CartService;
