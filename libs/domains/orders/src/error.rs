use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => AppError::NotFound(format!("Order with id {} not found", id)),
            OrderError::Validation(msg) => AppError::BadRequest(msg),
            OrderError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for OrderError {
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
            (OrderError::NotFound(1), StatusCode::NOT_FOUND),
            (OrderError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (
                OrderError::Database(DbErr::Conn(RuntimeErr::Internal("refused".into()))),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                OrderError::Database(DbErr::Custom("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
