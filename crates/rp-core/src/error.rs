//! Error types for rp-core

use thiserror::Error;

/// Core error type for relprep
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: One or more invalid values in a release section
    #[error("[E003] Invalid config section [{section}]:\n  {}", .problems.join("\n  "))]
    ConfigInvalid {
        section: String,
        problems: Vec<String>,
    },

    /// E004: Release section not present in the config file
    #[error("[E004] [{name}] is not in {path}")]
    ReleaseNotFound { name: String, path: String },

    /// E005: Source tree root does not exist
    #[error("[E005] Source root not found: {path}")]
    RootNotFound { path: String },

    /// E006: No directory in the tree qualifies as the deployable root
    #[error("[E006] No deployable root found under {root}. Pass --deploy-root explicitly")]
    DeployRootNotFound { root: String },

    /// E007: Deployable root has no parent directory to hold the manifest
    #[error("[E007] Invalid deployable root '{path}': {reason}")]
    InvalidDeployRoot { path: String, reason: String },

    /// E008: Backup of an out-of-place manifest would overwrite an existing file
    #[error("[E008] Manifest backup already exists: {path}. Move it aside and re-run")]
    ManifestBackupExists { path: String },

    /// E009: IO error
    #[error("[E009] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E010: IO error with file path context
    #[error("[E010] IO error on '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E011: YAML parse error
    #[error("[E011] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Wrap an IO error with the path it occurred on.
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        CoreError::IoWithPath {
            path: path.display().to_string(),
            source,
        }
    }
}
