//! rp-core - Core library for relprep
//!
//! This crate provides the shared types used across all relprep components:
//! the indexed source tree of a checked-out release, deploy-root location,
//! the deployment manifest builder/validator, and typed release configuration.

pub mod config;
pub mod deploy_root;
pub mod error;
pub mod fs_utils;
pub mod indexer;
pub mod manifest;
pub mod source_file;

pub use config::{Config, GeneralConfig, PrdConfig, ReleaseConfig, SvnLocation};
pub use deploy_root::DeployRoot;
pub use error::{CoreError, CoreResult};
pub use indexer::SourceTree;
pub use manifest::{DeploymentManifest, ManifestEntry, ManifestOutcome, ManifestStatus, Relocation};
pub use source_file::{FileKind, SourceFile};
