use super::types::{ActionKind, LinkState, PlanAction};
use super::PlanError;
use crate::reporter::{Reporter, RunEvent};
use crate::scanner::SnapshotRecord;
use crate::utils::SNAPSHOTS_DIR;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Path of the link for a snapshot record under `link_dir`
pub fn link_path_for(link_dir: &Path, record: &SnapshotRecord) -> PathBuf {
    link_dir
        .join(SNAPSHOTS_DIR)
        .join(&record.snapshot_name)
        .join(&record.keyspace_name)
        .join(&record.column_family_name)
}

/// Inspect `path` without following a final symbolic link
pub fn link_state(path: &Path) -> Result<LinkState, PlanError> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => Ok(LinkState::Symlink),
        Ok(_) => Ok(LinkState::Other),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(LinkState::Absent),
        Err(source) => Err(PlanError::IoError {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Build the link plan for `records`, in record order.
///
/// Fails without returning a partial plan if any link path is occupied by
/// something other than a symbolic link.
pub fn plan<I>(
    records: I,
    link_dir: &Path,
    replace_existing: bool,
    reporter: &dyn Reporter,
) -> Result<Vec<PlanAction>, PlanError>
where
    I: IntoIterator<Item = SnapshotRecord>,
{
    let mut actions = Vec::new();
    let mut seen: HashMap<PathBuf, PathBuf> = HashMap::new();

    for record in records {
        let link_path = link_path_for(link_dir, &record);

        if let Some(first) = seen.get(&link_path) {
            return Err(PlanError::DuplicateLink {
                link_path,
                first: first.clone(),
                second: record.source_path,
            });
        }

        let kind = match link_state(&link_path)? {
            LinkState::Absent => ActionKind::Create,
            LinkState::Symlink if replace_existing => ActionKind::Replace,
            LinkState::Symlink => ActionKind::Skip,
            LinkState::Other => return Err(PlanError::Conflict { link_path }),
        };

        seen.insert(link_path.clone(), record.source_path.clone());
        actions.push(PlanAction {
            kind,
            link_path,
            target_path: record.source_path,
            snapshot_name: record.snapshot_name,
            keyspace_name: record.keyspace_name,
            column_family_name: record.column_family_name,
        });
    }

    // Report only once the whole plan is known to be safe
    for action in &actions {
        reporter.report(RunEvent::ActionPlanned {
            kind: action.kind,
            link_path: action.link_path.clone(),
        });
    }

    Ok(actions)
}
