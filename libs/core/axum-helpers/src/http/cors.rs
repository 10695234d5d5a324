use axum::http::{HeaderValue, Method, header};
use core_config::{Environment, server::ServerConfig};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
];

/// CORS restricted to `origins`, with the methods the catalog API exposes.
fn restricted_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600))
}

/// Pick the CORS layer for `CORS_ALLOWED_ORIGIN` and the environment.
///
/// A wildcard (`*` or unset) is accepted in development and rejected in
/// production, where an explicit origin list is required.
pub fn cors_layer_from_config(config: &ServerConfig, environment: &Environment) -> io::Result<CorsLayer> {
    if config.cors_is_wildcard() {
        if environment.is_production() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "CORS_ALLOWED_ORIGIN must list explicit origins in production. Example: CORS_ALLOWED_ORIGIN=https://shop.example.com",
            ));
        }
        warn!("CORS_ALLOWED_ORIGIN not restricted, allowing any origin");
        return Ok(CorsLayer::permissive());
    }

    let origins = config
        .cors_allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {e}"),
            )
        })?;

    info!(origins = ?config.cors_allowed_origins, "CORS configured");
    Ok(restricted_layer(origins))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(origins: &[&str]) -> ServerConfig {
        ServerConfig {
            cors_allowed_origins: origins.iter().map(|s| s.to_string()).collect(),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn test_wildcard_allowed_in_development() {
        assert!(cors_layer_from_config(&config_with(&[]), &Environment::Development).is_ok());
        assert!(cors_layer_from_config(&config_with(&["*"]), &Environment::Development).is_ok());
    }

    #[test]
    fn test_wildcard_rejected_in_production() {
        let err = cors_layer_from_config(&config_with(&["*"]), &Environment::Production).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("CORS_ALLOWED_ORIGIN"));
    }

    #[test]
    fn test_explicit_origins_in_production() {
        let config = config_with(&["https://shop.example.com"]);
        assert!(cors_layer_from_config(&config, &Environment::Production).is_ok());
    }

    #[test]
    fn test_invalid_origin_value() {
        let config = config_with(&["https://bad\norigin"]);
        assert!(cors_layer_from_config(&config, &Environment::Production).is_err());
    }
}
