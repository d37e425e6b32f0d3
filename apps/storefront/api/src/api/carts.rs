use axum::Router;
use domain_carts::{CartService, PgCartRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgCartRepository::new(state.db.clone());
    handlers::router(CartService::new(repository))
}
