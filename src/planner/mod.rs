mod plan;
mod types;

pub use plan::{link_path_for, link_state, plan};
pub use types::{ActionKind, LinkState, PlanAction};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Refusing to link: {link_path} exists and is not a symbolic link")]
    Conflict { link_path: PathBuf },

    #[error("Snapshots {first} and {second} both map to link {link_path}")]
    DuplicateLink {
        link_path: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Failed to inspect {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
