//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog API.
//!
//! - **[`server`]**: router assembly with OpenAPI UIs, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: [`AppError`] and the JSON [`ErrorResponse`] with error codes
//! - **[`extractors`]**: [`IdPath`], [`QueryParams`], [`PathParams`], [`ValidatedJson`]

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, close_postgres,
    create_production_app, create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{cors_layer_from_config, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, PathParams, QueryParams, ValidatedJson};
