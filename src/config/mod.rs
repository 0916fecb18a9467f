use crate::scanner::ScanMode;
use crate::utils::DEFAULT_DATA_DIR;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{self, PathBuf};
use thiserror::Error;

/// A single path component: no separators, no NUL
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^/\\\x00]+$").expect("name pattern should compile"));

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("A snapshot name is required unless linking all snapshots")]
    SnapshotNameRequired,

    #[error("Invalid {kind} name '{name}': must be a single path component")]
    InvalidName { kind: &'static str, name: String },

    #[error("Data directory {0} does not exist")]
    DataDirMissing(PathBuf),

    #[error("Data directory {0} is not a directory")]
    DataDirNotADirectory(PathBuf),

    #[error("Link directory {0} exists and is not a directory")]
    LinkDirNotADirectory(PathBuf),

    #[error("Failed to resolve {path}: {source}")]
    ResolvePathError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Options for one link run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkOptions {
    pub data_dir: PathBuf,
    pub link_dir: PathBuf,
    pub mode: ScanMode,
    /// Keyspaces to descend into; `None` means all of them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyspaces: Option<HashSet<String>>,
    #[serde(default)]
    pub replace_existing: bool,
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            link_dir: PathBuf::from(DEFAULT_DATA_DIR),
            mode: ScanMode::All,
            keyspaces: None,
            replace_existing: false,
            dry_run: false,
        }
    }
}

impl LinkOptions {
    /// Build options from the command line surface.
    ///
    /// `snapshot_name` is ignored when `all_snapshots` is set. An empty
    /// keyspace list means no filter, and `link_dir` defaults to `data_dir`.
    pub fn from_args(
        snapshot_name: Option<String>,
        all_snapshots: bool,
        data_dir: PathBuf,
        link_dir: Option<PathBuf>,
        keyspaces: Vec<String>,
    ) -> Result<Self, ConfigError> {
        let mode = if all_snapshots {
            ScanMode::All
        } else {
            ScanMode::Single(snapshot_name.ok_or(ConfigError::SnapshotNameRequired)?)
        };

        Ok(Self {
            link_dir: link_dir.unwrap_or_else(|| data_dir.clone()),
            data_dir,
            mode,
            keyspaces: if keyspaces.is_empty() {
                None
            } else {
                Some(keyspaces.into_iter().collect())
            },
            ..Default::default()
        })
    }

    /// Check names and directories before anything is scanned
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let ScanMode::Single(name) = &self.mode {
            validate_name("snapshot", name)?;
        }
        for keyspace in self.keyspaces.iter().flatten() {
            validate_name("keyspace", keyspace)?;
        }

        if !self.data_dir.exists() {
            return Err(ConfigError::DataDirMissing(self.data_dir.clone()));
        }
        if !self.data_dir.is_dir() {
            return Err(ConfigError::DataDirNotADirectory(self.data_dir.clone()));
        }
        if self.link_dir.exists() && !self.link_dir.is_dir() {
            return Err(ConfigError::LinkDirNotADirectory(self.link_dir.clone()));
        }

        Ok(())
    }

    /// Copy of these options with absolute directories.
    ///
    /// Link targets are source paths under `data_dir`, and a relative
    /// symlink target resolves from the link's own directory, so both
    /// directories must be absolute before anything is linked.
    pub fn resolved(&self) -> Result<Self, ConfigError> {
        let absolute = |dir: &PathBuf| {
            path::absolute(dir).map_err(|source| ConfigError::ResolvePathError {
                path: dir.clone(),
                source,
            })
        };

        Ok(Self {
            data_dir: absolute(&self.data_dir)?,
            link_dir: absolute(&self.link_dir)?,
            ..self.clone()
        })
    }
}

/// Names end up as single components of link paths
pub fn validate_name(kind: &'static str, name: &str) -> Result<(), ConfigError> {
    if name == "." || name == ".." || !NAME_PATTERN.is_match(name) {
        return Err(ConfigError::InvalidName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}
