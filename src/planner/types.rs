use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// What to do with one link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Create,
    Replace,
    Skip,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Create => "create",
            ActionKind::Replace => "replace",
            ActionKind::Skip => "skip",
        };
        f.write_str(name)
    }
}

/// What currently occupies a link path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Absent,
    Symlink,
    /// A file, directory or anything else that is not a symbolic link
    Other,
}

/// A decision about a single link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanAction {
    pub kind: ActionKind,
    pub link_path: PathBuf,
    pub target_path: PathBuf,
    pub snapshot_name: String,
    pub keyspace_name: String,
    pub column_family_name: String,
}

impl PlanAction {
    /// Whether executing this action touches the filesystem
    pub fn is_mutation(&self) -> bool {
        self.kind != ActionKind::Skip
    }
}
