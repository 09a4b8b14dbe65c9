//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the user and collection repository ports,
//! backed by PostgreSQL through `diesel-async` with `bb8` pooling.
//!
//! - Repository implementations only translate between Diesel rows and
//!   domain types; ownership checks are part of each query's predicate.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Database failures are mapped onto the port error enums.
//!
//! # Example
//!
//! ```ignore
//! use gallery::outbound::persistence::{DbPool, DieselCollectionRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/gallery")).await?;
//! let collections = DieselCollectionRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_collection_repository;
mod diesel_user_repository;
pub mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_collection_repository::DieselCollectionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
