//! SQLite storage implementation for Dealfolio.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `dealfolio-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Read-only repository implementations for the project universe and the
//!   ledger
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. `dealfolio-core` is database-agnostic and works with traits. The
//! engine never writes to the project or ledger tables; writes belong to the
//! ingestion tooling that owns the schema.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod ledger;
pub mod projects;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from dealfolio-core for convenience
pub use dealfolio_core::errors::{DatabaseError, Error, Result};
