//! Shared application state, cloned into every router that needs it.

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL pool; clones share the same connections
    pub db: DatabaseConnection,
}
