use axum::Router;
use domain_orders::{OrderService, PgOrderRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgOrderRepository::new(state.db.clone());
    handlers::router(OrderService::new(repository))
}
