//! Deployment manifest generation and validation
//!
//! A manifest (`deploy_items.txt`) lists every SQL/DDL file of the deployable
//! subtree with the sequence number it is applied in:
//!
//! ```text
//! 001|..\TERADATA\01\create_tables.ddl
//! 002|..\TERADATA\01\03X\load.sql
//! ```
//!
//! Files are numbered in walk order: at each level the directory's own files
//! come first, then each child directory in name order. This is not the same
//! as sorting full paths (`03\z.sql` precedes `03\03X\a.sql` here).

use crate::deploy_root::DeployRoot;
use crate::error::{CoreError, CoreResult};
use crate::fs_utils::{read_bytes, write_atomic};
use crate::indexer::SourceTree;
use crate::source_file::FileKind;
use std::fmt;
use std::path::{Path, PathBuf};

/// Canonical manifest file name
pub const MANIFEST_FILE_NAME: &str = "deploy_items.txt";

/// Name a regenerated manifest is written under for comparison
pub const MANIFEST_TEMP_NAME: &str = "deploy_items.tmp";

/// Extension given to an out-of-place manifest after it is copied away
pub const MANIFEST_BACKUP_EXTENSION: &str = "original";

/// Separator used for paths inside the manifest, independent of host OS
pub const MANIFEST_PATH_SEPARATOR: &str = "\\";

/// One numbered line of a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// 1-based, contiguous
    pub sequence: usize,

    /// Path components relative to the manifest directory
    pub components: Vec<String>,
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:03}|..{}{}",
            self.sequence,
            MANIFEST_PATH_SEPARATOR,
            self.components.join(MANIFEST_PATH_SEPARATOR)
        )
    }
}

/// An ordered deployment manifest for one deployable root
#[derive(Debug, Clone)]
pub struct DeploymentManifest {
    root: DeployRoot,
    entries: Vec<ManifestEntry>,
    files: Vec<PathBuf>,
}

impl DeploymentManifest {
    /// Walk the deployable root and number its SQL/DDL files.
    pub fn build(root: &DeployRoot) -> CoreResult<Self> {
        let mut files = Vec::new();
        walk_deploy_dir(root.path(), &mut files)?;

        let entries = files
            .iter()
            .enumerate()
            .map(|(i, path)| ManifestEntry {
                sequence: i + 1,
                components: relative_components(path, root.parent()),
            })
            .collect();

        Ok(Self {
            root: root.clone(),
            entries,
            files,
        })
    }

    pub fn root(&self) -> &DeployRoot {
        &self.root
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Absolute paths of the numbered files, in sequence order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Serialized manifest: one newline-terminated line per entry.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}\n", e))
            .collect()
    }

    /// Write the manifest atomically to `path`.
    pub fn write_to(&self, path: &Path) -> CoreResult<()> {
        write_atomic(path, self.render().as_bytes())
    }
}

fn walk_deploy_dir(dir: &Path, files: &mut Vec<PathBuf>) -> CoreResult<()> {
    let mut here = Vec::new();
    let mut children = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| CoreError::io(dir, e))? {
        let entry = entry.map_err(|e| CoreError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            children.push(path);
        } else if path.is_file() {
            here.push(path);
        }
    }
    here.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    files.extend(here.into_iter().filter(|p| is_manifest_candidate(p)));

    for child in children {
        walk_deploy_dir(&child, files)?;
    }
    Ok(())
}

fn is_manifest_candidate(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if name.ends_with(MANIFEST_FILE_NAME) {
        return false;
    }
    FileKind::from_path(path).is_deployable()
}

fn relative_components(path: &Path, base: &Path) -> Vec<String> {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect()
}

/// How an existing manifest was moved to the canonical location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    /// Where the manifest was found
    pub from: PathBuf,

    /// Canonical location it was copied to
    pub to: PathBuf,

    /// New name of the original file
    pub backup: PathBuf,
}

/// Result of reconciling a freshly generated manifest with the checked-out one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestStatus {
    /// No manifest existed; a new one was written without validation.
    Created { path: PathBuf },

    /// The regenerated manifest is byte-identical; the temp copy was removed.
    Validated { path: PathBuf },

    /// The regenerated manifest differs. Both files are kept for review.
    Mismatch {
        existing: PathBuf,
        candidate: PathBuf,
    },
}

impl ManifestStatus {
    /// Whether the run can proceed without a human looking at the manifest
    pub fn is_ok(&self) -> bool {
        !matches!(self, ManifestStatus::Mismatch { .. })
    }
}

impl fmt::Display for ManifestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestStatus::Created { path } => write!(f, "CREATED|{}", path.display()),
            ManifestStatus::Validated { path } => write!(
                f,
                "PASS|IDENTICAL {} ({} deleted)",
                path.display(),
                MANIFEST_TEMP_NAME
            ),
            ManifestStatus::Mismatch {
                existing,
                candidate,
            } => write!(
                f,
                "WARNING|DIFFERENT {} != {} <-- investigate",
                existing.display(),
                candidate.display()
            ),
        }
    }
}

/// Everything `reconcile` did
#[derive(Debug, Clone)]
pub struct ManifestOutcome {
    pub status: ManifestStatus,
    pub relocated: Option<Relocation>,
    pub manifest: DeploymentManifest,
}

/// Create or validate the manifest for `root`.
///
/// The existing manifest is looked up by name in the indexed `tree`. When it
/// is absent a new manifest is written at the canonical location. When it sits
/// elsewhere it is copied to the canonical location and the original renamed
/// with a `.original` extension. A manifest at the canonical location is
/// compared byte-for-byte with a regenerated one; a mismatch is reported and
/// never auto-corrected.
pub fn reconcile(tree: &SourceTree, root: &DeployRoot) -> CoreResult<ManifestOutcome> {
    let manifest = DeploymentManifest::build(root)?;
    let canonical = root.manifest_path();

    let existing = if canonical.is_file() {
        Some(canonical.clone())
    } else {
        find_existing(tree, root)
    };
    let Some(existing) = existing else {
        manifest.write_to(&canonical)?;
        log::debug!("{} not found, created {}", MANIFEST_FILE_NAME, canonical.display());
        return Ok(ManifestOutcome {
            status: ManifestStatus::Created { path: canonical },
            relocated: None,
            manifest,
        });
    };

    let relocated = if existing.parent() != Some(root.parent()) {
        Some(relocate(&existing, &canonical)?)
    } else {
        None
    };
    let existing = match &relocated {
        Some(r) => r.to.clone(),
        None => existing,
    };

    let candidate = root.parent().join(MANIFEST_TEMP_NAME);
    manifest.write_to(&candidate)?;

    let status = if read_bytes(&existing)? == read_bytes(&candidate)? {
        std::fs::remove_file(&candidate).map_err(|e| CoreError::io(&candidate, e))?;
        ManifestStatus::Validated { path: existing }
    } else {
        log::warn!(
            "Manifest {} differs from regenerated {}",
            existing.display(),
            candidate.display()
        );
        ManifestStatus::Mismatch {
            existing,
            candidate,
        }
    };

    Ok(ManifestOutcome {
        status,
        relocated,
        manifest,
    })
}

/// The checked-out manifest, preferring one already in the canonical directory.
fn find_existing(tree: &SourceTree, root: &DeployRoot) -> Option<PathBuf> {
    let found: Vec<&Path> = tree
        .find_by_name(MANIFEST_FILE_NAME)
        .map(|f| f.path())
        .collect();
    found
        .iter()
        .find(|p| p.parent() == Some(root.parent()))
        .or_else(|| found.first())
        .map(|p| p.to_path_buf())
}

fn relocate(existing: &Path, canonical: &Path) -> CoreResult<Relocation> {
    let backup = existing.with_extension(MANIFEST_BACKUP_EXTENSION);
    if backup.exists() {
        return Err(CoreError::ManifestBackupExists {
            path: backup.display().to_string(),
        });
    }
    write_atomic(canonical, &read_bytes(existing)?)?;
    std::fs::rename(existing, &backup).map_err(|e| CoreError::io(existing, e))?;
    log::warn!(
        "Manifest found at {}; copied to {} and renamed original to {}",
        existing.display(),
        canonical.display(),
        backup.display()
    );
    Ok(Relocation {
        from: existing.to_path_buf(),
        to: canonical.to_path_buf(),
        backup,
    })
}

#[cfg(test)]
#[path = "manifest_test.rs"]
mod tests;
