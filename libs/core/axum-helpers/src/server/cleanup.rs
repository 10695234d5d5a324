//! Resource cleanup run during graceful shutdown.

use tracing::{error, info};

/// Close the SeaORM pool, logging the outcome.
///
/// The pool also closes on drop; closing explicitly lets in-flight
/// connections finish inside the shutdown timeout.
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(()) => info!(pool = name, "PostgreSQL pool closed"),
        Err(e) => error!(pool = name, error = %e, "Error closing PostgreSQL pool"),
    }
}
