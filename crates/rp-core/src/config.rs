//! Release configuration (`relprep.yml`)
//!
//! ```yaml
//! general:
//!   tester_name: Jane Tester
//!   tester_id: JT01
//!   base_folder: /work/releases
//! prds:
//!   1234-EDW-01:
//!     prd_description: PTSB Application
//!     prd_folder: /shares/prds/1234-EDW-01
//!     jira_test_plan: DWH-0123
//! releases:
//!   DWH-2345:
//!     url: https://jira.example.com/browse/DWH-2345
//!     summary: 1234-EDW-01 PTSB Application 1.0
//!     developer: Jane Developer
//!     svn: https://svn.example.com/repo/tag/Release/1234_1.0_PTSB_DWH-2345
//!     prd_number: 1234-EDW-01
//!     environment: T05
//! ```
//!
//! Release sections are free-form maps in YAML and are validated once into a
//! typed [`ReleaseConfig`], reporting every problem in a single error.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "relprep.yml";

/// Keys every release section must carry
const REQUIRED_RELEASE_KEYS: [&str; 6] = [
    "url",
    "summary",
    "developer",
    "svn",
    "prd_number",
    "environment",
];

/// Additional checkout locations are `svn2` through `svn19`
const EXTRA_SVN_KEYS: std::ops::RangeInclusive<u8> = 2..=19;

/// Top-level configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tester details shared by every release
    pub general: GeneralConfig,

    /// PRD details keyed by PRD number
    #[serde(default)]
    pub prds: BTreeMap<String, PrdConfig>,

    /// Release sections keyed by release id (e.g. `DWH-2345`).
    /// A key written without a value (`svn:`) is kept as `None`.
    #[serde(default)]
    pub releases: BTreeMap<String, BTreeMap<String, Option<String>>>,
}

/// Settings shared by all releases
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    pub tester_name: String,
    pub tester_id: String,

    /// Root under which per-release work folders are created
    pub base_folder: PathBuf,
}

/// Optional PRD details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrdConfig {
    #[serde(default)]
    pub prd_description: Option<String>,

    #[serde(default)]
    pub prd_folder: Option<PathBuf>,

    #[serde(default)]
    pub jira_test_plan: Option<String>,
}

/// One configured checkout location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvnLocation {
    /// Config key it came from (`svn`, `svn2`, ...)
    pub key: String,

    pub url: String,
}

impl SvnLocation {
    /// Last path segment of the URL, used as the checkout directory name
    pub fn name(&self) -> &str {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&self.url)
    }

    /// Suffix distinguishing output files of this location, e.g. `_Release_1.0`
    pub fn suffix(&self) -> String {
        format!("_{}", self.name())
    }
}

/// A validated release section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseConfig {
    /// Release id (the section name)
    pub id: String,
    pub url: String,
    pub summary: String,
    pub developer: String,
    pub prd_number: String,

    /// Environment token substituted for placeholders in database names
    pub environment: String,

    /// Non-empty checkout locations in key order (`svn`, `svn2`, ...)
    pub svn_locations: Vec<SvnLocation>,

    /// `base_folder / prd_number[..4] / prd_number / id`
    pub work_folder: PathBuf,

    /// PRD details, when the config has a section for `prd_number`
    pub prd: Option<PrdConfig>,
}

impl ReleaseConfig {
    /// Directory a location is checked out into
    pub fn checkout_dir(&self, location: &SvnLocation) -> PathBuf {
        self.work_folder.join(location.name())
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
            message: format!("{}: {}", path.display(), e),
        })
    }

    /// Validate and return the release section `name`.
    pub fn release(&self, name: &str, source: &Path) -> CoreResult<ReleaseConfig> {
        let section = self
            .releases
            .get(name)
            .ok_or_else(|| CoreError::ReleaseNotFound {
                name: name.to_string(),
                path: source.display().to_string(),
            })?;

        let mut problems = Vec::new();

        for key in REQUIRED_RELEASE_KEYS {
            match section.get(key).map(|v| v.as_deref().unwrap_or("").trim()) {
                None => problems.push(format!("missing required key '{}'", key)),
                Some("") if key == "svn" => {
                    log::warn!("[{}] svn key has no value; no checkout location", name);
                }
                Some("") => problems.push(format!("key '{}' has no value", key)),
                Some(_) => {}
            }
        }

        let mut extra_svn = Vec::new();
        for (key, value) in section {
            if REQUIRED_RELEASE_KEYS.contains(&key.as_str()) {
                continue;
            }
            let value = value.as_deref().unwrap_or("");
            match extra_svn_index(key) {
                Some(_) if value.trim().is_empty() => {
                    problems.push(format!("optional key '{}' has no value", key))
                }
                Some(index) => extra_svn.push((index, key.clone(), value.trim().to_string())),
                None => problems.push(format!("unknown key '{}'", key)),
            }
        }

        if !problems.is_empty() {
            return Err(CoreError::ConfigInvalid {
                section: name.to_string(),
                problems,
            });
        }

        let value = |key: &str| {
            section
                .get(key)
                .and_then(|v| v.as_deref())
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        let mut svn_locations = Vec::new();
        let svn = value("svn");
        if !svn.is_empty() {
            svn_locations.push(SvnLocation {
                key: "svn".to_string(),
                url: svn,
            });
        }
        extra_svn.sort_by_key(|(index, _, _)| *index);
        svn_locations.extend(
            extra_svn
                .into_iter()
                .map(|(_, key, url)| SvnLocation { key, url }),
        );

        let prd_number = value("prd_number");
        let prd_prefix: String = prd_number.chars().take(4).collect();
        let work_folder = self
            .general
            .base_folder
            .join(&prd_prefix)
            .join(&prd_number)
            .join(name);

        Ok(ReleaseConfig {
            id: name.to_string(),
            url: value("url"),
            summary: value("summary"),
            developer: value("developer"),
            environment: value("environment"),
            prd: self.prds.get(&prd_number).cloned(),
            prd_number,
            svn_locations,
            work_folder,
        })
    }
}

fn extra_svn_index(key: &str) -> Option<u8> {
    key.strip_prefix("svn")
        .filter(|n| !n.starts_with('0'))
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|n| EXTRA_SVN_KEYS.contains(n))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
