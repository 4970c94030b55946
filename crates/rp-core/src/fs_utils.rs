//! Small filesystem helpers shared by the manifest and synopsis writers.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Write `contents` to `path` atomically.
///
/// Writes to a sibling temp file (suffixed with the process ID) and renames it
/// into place, so readers never observe a half-written file. The temp file is
/// removed if the rename fails.
pub fn write_atomic(path: &Path, contents: &[u8]) -> CoreResult<()> {
    let temp_path = temp_sibling(path);
    std::fs::write(&temp_path, contents).map_err(|e| CoreError::io(&temp_path, e))?;
    std::fs::rename(&temp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        CoreError::io(path, e)
    })?;
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}.{}.tmp", name, std::process::id()))
}

/// Read a whole file, attaching the path to any error.
pub fn read_bytes(path: &Path) -> CoreResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| CoreError::io(path, e))
}
