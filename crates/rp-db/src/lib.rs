//! rp-db - Database access for relprep
//!
//! This crate provides the `Database` trait used to look databases up in the
//! warehouse catalog, a DuckDB implementation, the database existence
//! check run over an object-database index and post-load data checks.

pub mod data_checks;
pub mod duckdb;
pub mod error;
pub mod existence;
pub mod traits;

pub use data_checks::{build_data_checks, DataCheckScript};
pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use existence::{check_databases, ExistenceReport};
pub use traits::Database;
