mod execute;
mod report;

pub use execute::execute;
pub use report::ExecutionReport;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("Failed to remove existing link {path}: {source}")]
    RemoveLinkError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {path}: {source}")]
    CreateDirError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create link {path}: {source}")]
    CreateLinkError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
