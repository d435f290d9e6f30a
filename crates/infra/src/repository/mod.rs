//! Repository contract and implementations.
//!
//! The contract lives in [`r#trait`]. `product` and `customer` hold the
//! Postgres-backed implementations together with their row types; `in_memory`
//! holds the map-backed implementations used by tests and local development.

pub mod customer;
pub mod in_memory;
pub mod product;
pub mod r#trait;

pub use customer::{CustomerRow, PgCustomerRepository};
pub use in_memory::{InMemoryCustomerRepository, InMemoryProductRepository};
pub use product::{PgProductRepository, ProductRow};
pub use r#trait::{Repository, RepositoryError};
