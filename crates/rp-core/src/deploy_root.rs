//! Location of the deployable subtree inside a checked-out release

use crate::error::{CoreError, CoreResult};
use crate::manifest::MANIFEST_FILE_NAME;
use std::path::{Path, PathBuf};

/// Directory-name suffix marking the deployable subtree
const DEPLOY_DIR_SUFFIX: &str = "teradata";

/// Look-alike suffix that must not be taken for the deployable subtree
const DEPLOY_DIR_DECOY_SUFFIX: &str = "ods_vteradata";

/// The deployable subtree and the directory that holds its manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRoot {
    path: PathBuf,
    parent: PathBuf,
}

impl DeployRoot {
    /// Use `path` as the deployable root. It must have a parent directory.
    pub fn new(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| CoreError::InvalidDeployRoot {
                path: path.display().to_string(),
                reason: "it has no parent directory to hold the manifest".to_string(),
            })?
            .to_path_buf();
        Ok(Self { path, parent })
    }

    /// Pick the deployable root from an indexed directory list.
    ///
    /// The first directory whose name ends with `teradata` (any case), that is
    /// not an `ods_vteradata` folder, is not inside a rollback tree and has a
    /// parent directory, wins.
    pub fn locate(dirs: &[PathBuf]) -> Option<Self> {
        dirs.iter()
            .filter(|d| is_deploy_dir(d))
            .find_map(|d| Self::new(d.clone()).ok())
    }

    /// The deployable subtree
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Canonical manifest directory, one level above the deployable subtree
    pub fn parent(&self) -> &Path {
        &self.parent
    }

    /// Canonical manifest location
    pub fn manifest_path(&self) -> PathBuf {
        self.parent.join(MANIFEST_FILE_NAME)
    }
}

fn is_deploy_dir(dir: &Path) -> bool {
    let text = dir.to_string_lossy().to_lowercase();
    text.ends_with(DEPLOY_DIR_SUFFIX)
        && !text.ends_with(DEPLOY_DIR_DECOY_SUFFIX)
        && !text.contains("rollback")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_first_teradata_dir() {
        let dirs = vec![
            PathBuf::from("/w/app/DOCS"),
            PathBuf::from("/w/app/Rollback_TERADATA"),
            PathBuf::from("/w/app/TERADATA"),
            PathBuf::from("/w/app/TERADATA/01"),
        ];
        let root = DeployRoot::locate(&dirs).unwrap();
        assert_eq!(root.path(), Path::new("/w/app/TERADATA"));
        assert_eq!(root.parent(), Path::new("/w/app"));
        assert_eq!(
            root.manifest_path(),
            PathBuf::from("/w/app/deploy_items.txt")
        );
    }

    #[test]
    fn test_locate_falls_through_parentless_match() {
        let dirs = vec![PathBuf::from("teradata"), PathBuf::from("/w/app/TERADATA")];
        let root = DeployRoot::locate(&dirs).unwrap();
        assert_eq!(root.path(), Path::new("/w/app/TERADATA"));
    }

    #[test]
    fn test_locate_skips_ods_vteradata() {
        let dirs = vec![
            PathBuf::from("/w/app/ODS_VTERADATA"),
            PathBuf::from("/w/app/teradata"),
        ];
        let root = DeployRoot::locate(&dirs).unwrap();
        assert_eq!(root.path(), Path::new("/w/app/teradata"));
    }

    #[test]
    fn test_locate_none_when_absent() {
        let dirs = vec![PathBuf::from("/w/app/sql")];
        assert!(DeployRoot::locate(&dirs).is_none());
    }

    #[test]
    fn test_new_requires_parent() {
        assert!(DeployRoot::new("TERADATA").is_err());
        assert!(DeployRoot::new("app/TERADATA").is_ok());
    }
}
