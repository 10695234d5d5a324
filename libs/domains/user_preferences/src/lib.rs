//! User Preferences Domain
//!
//! Key/value settings attached to users. A preference refers to its user by id
//! only; creating one for a nonexistent user is rejected.
//!
//! ```rust,no_run
//! use domain_user_preferences::{handlers, InMemoryUserPreferencesRepository, UserPreferencesService};
//!
//! let service = UserPreferencesService::new(InMemoryUserPreferencesRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{UserPreferencesError, UserPreferencesResult};
pub use handlers::ApiDoc;
pub use models::{CreateUserPreference, UpdateUserPreference, UserPreference};
pub use postgres::PgUserPreferencesRepository;
pub use repository::{InMemoryUserPreferencesRepository, UserPreferencesRepository};
pub use service::UserPreferencesService;
