use super::report::ExecutionReport;
use super::ExecuteError;
use crate::planner::{ActionKind, PlanAction};
use crate::reporter::{Reporter, RunEvent};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

/// Apply `actions` in order, or only describe them when `dry_run` is set.
///
/// Not transactional: on error, links created so far stay in place and the
/// remaining actions are abandoned.
pub fn execute(
    actions: &[PlanAction],
    dry_run: bool,
    reporter: &dyn Reporter,
) -> Result<ExecutionReport, ExecuteError> {
    let mut report = ExecutionReport::new(dry_run);

    for action in actions {
        if !dry_run && action.is_mutation() {
            apply(action, reporter)?;
        }
        report.record(action);
    }

    reporter.report(RunEvent::RunFinished {
        created: report.created,
        replaced: report.replaced,
        skipped: report.skipped,
    });

    Ok(report)
}

fn apply(action: &PlanAction, reporter: &dyn Reporter) -> Result<(), ExecuteError> {
    if action.kind == ActionKind::Replace {
        remove_link(&action.link_path)?;
        reporter.report(RunEvent::LinkRemoved {
            link_path: action.link_path.clone(),
        });
    }

    if let Some(parent) = action.link_path.parent() {
        // create_dir_all tolerates directories created concurrently
        fs::create_dir_all(parent).map_err(|source| ExecuteError::CreateDirError {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    symlink_dir(&action.target_path, &action.link_path).map_err(|source| {
        ExecuteError::CreateLinkError {
            path: action.link_path.clone(),
            source,
        }
    })?;
    reporter.report(RunEvent::LinkCreated {
        link_path: action.link_path.clone(),
        target_path: action.target_path.clone(),
    });

    Ok(())
}

fn remove_link(link_path: &Path) -> Result<(), ExecuteError> {
    match fs::remove_file(link_path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ExecuteError::RemoveLinkError {
            path: link_path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(unix)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}
