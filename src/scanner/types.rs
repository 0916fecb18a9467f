use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which snapshots a scan should yield
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode", content = "snapshotName")]
pub enum ScanMode {
    /// Only snapshots with exactly this name
    Single(String),
    /// Every snapshot found
    All,
}

impl ScanMode {
    pub fn matches(&self, snapshot_name: &str) -> bool {
        match self {
            ScanMode::Single(name) => name == snapshot_name,
            ScanMode::All => true,
        }
    }
}

/// One snapshot directory of one column family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub snapshot_name: String,
    pub keyspace_name: String,
    pub column_family_name: String,
    pub source_path: PathBuf,
}
