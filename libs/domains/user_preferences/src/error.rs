use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserPreferencesError {
    #[error("User preference not found: {0}")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("User does not exist: {0}")]
    UnknownUser(i64),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type UserPreferencesResult<T> = Result<T, UserPreferencesError>;

impl From<UserPreferencesError> for AppError {
    fn from(err: UserPreferencesError) -> Self {
        match err {
            UserPreferencesError::NotFound(id) => {
                AppError::NotFound(format!("User preference with id {} not found", id))
            }
            UserPreferencesError::Validation(msg) => AppError::BadRequest(msg),
            UserPreferencesError::UnknownUser(user_id) => {
                AppError::UnprocessableEntity(format!("User {} does not exist", user_id))
            }
            UserPreferencesError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for UserPreferencesError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
