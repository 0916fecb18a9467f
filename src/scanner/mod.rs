mod scan;
mod types;

pub use scan::{scan, SnapshotScan};
pub use types::{ScanMode, SnapshotRecord};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to walk data directory: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Data directory {0} is not a directory")]
    NotADirectory(PathBuf),
}
