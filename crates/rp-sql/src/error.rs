//! Error types for rp-sql

use thiserror::Error;

/// Errors raised while reading or writing SQL text files.
///
/// Unreadable statements are not errors; they are reported as
/// [`Diagnostic`](crate::Diagnostic)s and scanning continues.
#[derive(Error, Debug)]
pub enum SqlError {
    /// S001: Source file could not be read
    #[error("[S001] Failed to read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// S002: Error from the core library
    #[error(transparent)]
    Core(#[from] rp_core::CoreError),
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;

/// Read a SQL file as text.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, and a
/// leading byte-order mark is dropped.
pub(crate) fn read_sql(path: &std::path::Path) -> SqlResult<String> {
    let bytes = std::fs::read(path).map_err(|e| SqlError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.strip_prefix('\u{feff}').unwrap_or(&text).to_string())
}
