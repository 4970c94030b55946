//! DuckDB database backend implementation
//!
//! A DuckDB file stands in for the warehouse catalog: each warehouse
//! database is a schema in the file's default catalog.

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use duckdb::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const FIND_SCHEMAS_SQL: &str = "SELECT schema_name FROM duckdb_schemas() \
     WHERE database_name = current_database() AND upper(schema_name) = upper(?) \
     ORDER BY schema_name";

const COLUMN_NAMES_SQL: &str = "SELECT column_name FROM duckdb_columns() \
     WHERE database_name = current_database() AND upper(schema_name) = upper(?) \
     AND upper(table_name) = upper(?) ORDER BY column_index";

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", path.display(), e)))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute batch SQL synchronously
    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    /// Look up schemas synchronously
    fn find_databases_sync(&self, name: &str) -> DbResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(FIND_SCHEMAS_SQL)?;
        let rows = stmt.query_map([name], |row| row.get::<_, String>(0))?;
        let names = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// List columns synchronously
    fn column_names_sync(&self, database: &str, object: &str) -> DbResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(COLUMN_NAMES_SQL)?;
        let rows = stmt.query_map([database, object], |row| row.get::<_, String>(0))?;
        let names = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Sample distinct column values synchronously
    fn sample_values_sync(
        &self,
        database: &str,
        object: &str,
        column: &str,
        limit: usize,
    ) -> DbResult<Vec<Option<String>>> {
        let sql = format!(
            "SELECT DISTINCT CAST({col} AS VARCHAR) FROM {db}.{obj} ORDER BY 1 NULLS LAST LIMIT {limit}",
            col = quote_ident(column),
            db = quote_ident(database),
            obj = quote_ident(object),
        );
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, Option<String>>(0))?;
        let values = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(values)
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn find_databases(&self, name: &str) -> DbResult<Vec<String>> {
        self.find_databases_sync(name)
    }

    async fn column_names(&self, database: &str, object: &str) -> DbResult<Vec<String>> {
        self.column_names_sync(database, object)
    }

    async fn sample_values(
        &self,
        database: &str,
        object: &str,
        column: &str,
        limit: usize,
    ) -> DbResult<Vec<Option<String>>> {
        self.sample_values_sync(database, object, column, limit)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
