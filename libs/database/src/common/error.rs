#[cfg(feature = "postgres")]
use sea_orm::{DbErr, SqlErr};

/// Errors raised while probing the database.
///
/// Query errors inside repositories stay as `DbErr` and are mapped by each
/// domain's own error type.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] DbErr),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

/// True when the statement violated a foreign key constraint.
#[cfg(feature = "postgres")]
pub fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}
