//! Orders Domain
//!
//! Read-only access to order history. Orders are written by another system;
//! this crate only queries them by user, status, date and total.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{Order, OrderSort, OrderStatus};
pub use postgres::PgOrderRepository;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
