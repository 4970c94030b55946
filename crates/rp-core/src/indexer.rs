//! Source tree indexing
//!
//! Walks a checked-out release directory and collects every directory and
//! file that may take part in a deployment. Version-control metadata,
//! rollback scripts and test-document folders are skipped as whole subtrees.

use crate::error::{CoreError, CoreResult};
use crate::source_file::SourceFile;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Directory name suffixes whose subtrees never contain deployable code.
pub const EXCLUDED_DIR_SUFFIXES: &[&str] = &[
    ".svn",
    "Rollback",
    "Test Approach",
    "Test Evidence",
    "Test Plan",
    "Test Report",
    "Test Scripts",
];

/// Whether a directory (and everything beneath it) is skipped during indexing.
pub fn is_excluded_dir(path: &Path) -> bool {
    let text = path.to_string_lossy();
    EXCLUDED_DIR_SUFFIXES
        .iter()
        .any(|suffix| text.ends_with(suffix))
}

/// Directories and files of an indexed source tree, each sorted by path
#[derive(Debug, Clone, Serialize)]
pub struct SourceTree {
    /// Directory the walk started from
    pub root: PathBuf,

    /// Every non-excluded directory; just the root when it has none
    pub dirs: Vec<PathBuf>,

    /// Every file inside a non-excluded directory
    pub files: Vec<SourceFile>,
}

impl SourceTree {
    /// Index `root` with a depth-first walk.
    ///
    /// A missing root is an error, never an empty tree.
    pub fn index(root: &Path) -> CoreResult<Self> {
        if !root.exists() {
            return Err(CoreError::RootNotFound {
                path: root.display().to_string(),
            });
        }

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        walk(root, &mut dirs, &mut files)?;

        if dirs.is_empty() {
            dirs.push(root.to_path_buf());
        }
        dirs.sort();
        files.sort_by(|a, b| a.path().cmp(b.path()));

        log::debug!(
            "Indexed {}: {} directories, {} files",
            root.display(),
            dirs.len(),
            files.len()
        );

        Ok(Self {
            root: root.to_path_buf(),
            dirs,
            files,
        })
    }

    /// Files located anywhere beneath `dir`, in index order.
    pub fn files_under<'a>(&'a self, dir: &'a Path) -> impl Iterator<Item = &'a SourceFile> + 'a {
        self.files.iter().filter(move |f| f.path().starts_with(dir))
    }

    /// SQL/DDL files located beneath `dir`, in index order.
    pub fn deployable_files_under(&self, dir: &Path) -> Vec<SourceFile> {
        self.files_under(dir)
            .filter(|f| f.is_deployable())
            .cloned()
            .collect()
    }

    /// Files whose name matches `name` case-insensitively.
    pub fn find_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SourceFile> + 'a {
        self.files.iter().filter(move |f| f.has_name(name))
    }
}

fn walk(dir: &Path, dirs: &mut Vec<PathBuf>, files: &mut Vec<SourceFile>) -> CoreResult<()> {
    for entry in std::fs::read_dir(dir).map_err(|e| CoreError::io(dir, e))? {
        let entry = entry.map_err(|e| CoreError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            if is_excluded_dir(&path) {
                log::debug!("Skipping excluded directory {}", path.display());
                continue;
            }
            dirs.push(path.clone());
            walk(&path, dirs, files)?;
        } else if path.is_file() {
            files.push(SourceFile::from_path(&path)?);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "indexer_test.rs"]
mod tests;
