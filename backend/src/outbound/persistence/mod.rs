//! PostgreSQL directory adapter using Diesel.
//!
//! Implements the [`Directory`](crate::domain::ports::Directory) port with
//! `diesel-async` over a `bb8` pool. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) stay private to this module; the domain only
//! sees [`User`](crate::domain::User) and
//! [`RecipientAddress`](crate::domain::RecipientAddress). All failures are
//! reported as [`DirectoryError`](crate::domain::ports::DirectoryError).
//!
//! # Example
//!
//! ```ignore
//! use sos_backend::outbound::persistence::{DbPool, DieselDirectory, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/hr")).await?;
//! let directory = DieselDirectory::new(pool);
//! ```

mod diesel_directory;
mod diesel_error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_directory::DieselDirectory;
pub use pool::{DbPool, PoolConfig, PoolError};
