use axum::{
    http::{Method, StatusCode, Uri},
    response::Response,
};

use super::{ErrorCode, error_response};

/// Router fallback: JSON 404 for unknown routes.
pub async fn not_found(method: Method, uri: Uri) -> Response {
    tracing::debug!(%method, %uri, "No route matched");
    error_response(
        StatusCode::NOT_FOUND,
        format!("No route for {method} {}", uri.path()),
        ErrorCode::NotFound,
    )
}

/// JSON 405 for a known path hit with the wrong method.
pub async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::MethodNotAllowed.default_message(),
        ErrorCode::MethodNotAllowed,
    )
}
