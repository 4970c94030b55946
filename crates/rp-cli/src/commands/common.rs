//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use rp_core::config::DEFAULT_CONFIG_FILE;
use rp_core::{Config, CoreError, DeployRoot, ReleaseConfig, SourceTree};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; main.rs prints nothing for it.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Exit code for a result that needs human review
pub(crate) const EXIT_REVIEW: i32 = 1;

/// Exit code for a broken invariant
pub(crate) const EXIT_FATAL: i32 = 2;

/// Index a checked-out tree.
pub(crate) fn load_tree(root: &Path) -> Result<SourceTree> {
    SourceTree::index(root).with_context(|| format!("Failed to index {}", root.display()))
}

/// The deployable root: the explicit override if given, otherwise located by
/// directory name. A relative override is resolved against `tree.root`.
pub(crate) fn resolve_deploy_root(
    tree: &SourceTree,
    explicit: Option<&Path>,
) -> Result<DeployRoot> {
    let root = match explicit {
        Some(path) => {
            let path = if path.is_relative() && !path.exists() {
                tree.root.join(path)
            } else {
                path.to_path_buf()
            };
            if !path.is_dir() {
                anyhow::bail!("Deployable root is not a directory: {}", path.display());
            }
            DeployRoot::new(path)?
        }
        None => DeployRoot::locate(&tree.dirs).ok_or_else(|| CoreError::DeployRootNotFound {
            root: tree.root.display().to_string(),
        })?,
    };
    log::debug!("Deployable root: {}", root.path().display());
    Ok(root)
}

/// Path of the config file to read.
pub(crate) fn config_path(global: &GlobalArgs) -> PathBuf {
    global
        .config
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load the config file and validate release `name`.
pub(crate) fn load_release(global: &GlobalArgs, name: &str) -> Result<ReleaseConfig> {
    let path = config_path(global);
    let config = Config::load(&path)?;
    Ok(config.release(name, &path)?)
}
