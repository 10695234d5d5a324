//! PostgreSQL plumbing shared by the catalog domains.
//!
//! - [`postgres`]: pool configuration, connect with retry, migrations, health probes
//! - [`repository`]: [`BaseRepository`], the thin SeaORM wrapper every `Pg*Repository` builds on
//! - [`common`]: error type and retry/backoff helpers
//!
//! # Features
//!
//! - `postgres` (default) - SeaORM connectivity
//! - `config` - `core_config::FromEnv` for [`postgres::PostgresConfig`]
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_with_retry(&config, config.retry_config()).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "catalog_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub mod repository;

pub use common::DatabaseError;

#[cfg(feature = "postgres")]
pub use common::error::is_foreign_key_violation;

#[cfg(feature = "postgres")]
pub use repository::BaseRepository;
