//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Warehouse catalog access for relprep
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Names of databases matching `name` case-insensitively, as the
    /// catalog spells them
    async fn find_databases(&self, name: &str) -> DbResult<Vec<String>>;

    /// Column names of `database.object` in column order, empty if the
    /// object does not exist
    async fn column_names(&self, database: &str, object: &str) -> DbResult<Vec<String>>;

    /// Up to `limit` distinct values of `column` as text, ascending with
    /// NULL last
    async fn sample_values(
        &self,
        database: &str,
        object: &str,
        column: &str,
        limit: usize,
    ) -> DbResult<Vec<Option<String>>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
