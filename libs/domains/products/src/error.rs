use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => {
                AppError::NotFound(format!("Product with id {} not found", id))
            }
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use sea_orm::RuntimeErr;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ProductError::NotFound(1), StatusCode::NOT_FOUND),
            (
                ProductError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ProductError::Database(DbErr::Custom("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_lost_connection_is_503() {
        let err = ProductError::from(DbErr::Conn(RuntimeErr::Internal("connection refused".into())));
        let (status, body) = AppError::from(err).to_parts();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.error, "DATABASE_UNAVAILABLE");
    }

    #[test]
    fn test_db_err_is_a_fault_not_absence() {
        let err: ProductError = DbErr::Custom("connection reset".into()).into();
        assert!(matches!(err, ProductError::Database(_)));
    }
}
