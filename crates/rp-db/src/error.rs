//! Error types for rp-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Catalog lookup matched more than one database (D003)
    #[error("[D003] Lookup of database '{name}' returned {count} matches: {list}", count = .matches.len(), list = .matches.join(", "))]
    AmbiguousDatabase { name: String, matches: Vec<String> },

    /// Catalog lookup returned a different database (D004)
    #[error("[D004] Lookup of database '{requested}' returned '{found}'")]
    UnexpectedDatabase { requested: String, found: String },

    /// Mutex poisoned (D005)
    #[error("[D005] Database mutex poisoned: {0}")]
    MutexPoisoned(String),
}

impl DbError {
    /// Whether this error means the catalog broke an invariant the existence
    /// check relies on, as opposed to the lookup itself failing
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            DbError::AmbiguousDatabase { .. } | DbError::UnexpectedDatabase { .. }
        )
    }
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        DbError::ExecutionError(err.to_string())
    }
}
