//! Customers Domain
//!
//! One customer profile per user. The profile of the caller lives at
//! `/customers/me` and is created with defaults the first time it is read
//! or written.
//!
//! ```text
//! POST /customers        ← CreateCustomer
//! GET  /customers/{id}
//! PUT  /customers/{id}   ← UpdateCustomer
//! GET  /customers/me     (access token)
//! PUT  /customers/me     ← UpdateCustomer (access token)
//! ```
//!
//! `PgCustomerRepository` relies on the unique index on `customers.user_id`:
//! concurrent first requests race on `INSERT .. ON CONFLICT DO NOTHING` and
//! then all read the same row.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use core_proc_macros::ApiResource;
pub use error::{CustomerError, CustomerResult};
pub use handlers::ApiDoc;
pub use models::{CreateCustomer, Customer, Membership, UpdateCustomer};
pub use postgres::PgCustomerRepository;
pub use repository::{CustomerRepository, InMemoryCustomerRepository};
pub use service::CustomerService;
