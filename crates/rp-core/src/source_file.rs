//! Files discovered in a checked-out source tree

use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Extension class of a discovered file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// `.sql`
    Sql,
    /// `.ddl`
    Ddl,
    /// Anything else (documents, configs, manifests)
    Other,
}

impl FileKind {
    /// Classify a path by its extension, case-insensitively.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("sql") => FileKind::Sql,
            Some("ddl") => FileKind::Ddl,
            _ => FileKind::Other,
        }
    }

    /// Whether files of this kind can be applied during deployment
    pub fn is_deployable(self) -> bool {
        matches!(self, FileKind::Sql | FileKind::Ddl)
    }
}

/// A file found by the indexer. Immutable once discovered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceFile {
    path: PathBuf,
    kind: FileKind,
    size: u64,
}

impl SourceFile {
    /// Create a source file record from already-known metadata.
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let kind = FileKind::from_path(&path);
        Self { path, kind, size }
    }

    /// Stat `path` and build a record for it.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let meta = std::fs::metadata(path).map_err(|e| CoreError::io(path, e))?;
        Ok(Self::new(path, meta.len()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// Size in bytes at discovery time
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_deployable(&self) -> bool {
        self.kind.is_deployable()
    }

    /// File name as UTF-8, or `""` when it is not representable.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
    }

    /// Whether the file name equals `name`, ignoring ASCII case.
    pub fn has_name(&self, name: &str) -> bool {
        self.file_name().eq_ignore_ascii_case(name)
    }
}
