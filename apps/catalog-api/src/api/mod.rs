use axum::Router;

pub mod health;
pub mod orders;
pub mod products;
pub mod user_preferences;

/// API routes without the `/api` prefix, which `create_router` adds.
///
/// Every sub-router already carries its service state.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .nest("/user-preferences", user_preferences::router(state))
        .nest("/orders", orders::router(state))
}

/// `/ready`, which pings the database.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
