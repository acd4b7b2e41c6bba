//! Clientele Database: SurrealDB connection management and the
//! customer store.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - The SurrealDB customer store ([`repository::SurrealCustomerRepository`])
//! - Error types ([`DbError`], [`ConnectError`])

mod connection;
mod error;
pub mod repository;
mod schema;

pub use connection::{ConnectError, DbConfig, DbManager};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
