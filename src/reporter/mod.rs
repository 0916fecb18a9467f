//! Progress reporting for a link run.
//!
//! Components never log through ambient state of their own: the entry point
//! builds a [`Reporter`] once and hands it to every stage of the run.

use crate::planner::ActionKind;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Something worth telling the operator about during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    RunStarted {
        run_id: String,
        data_dir: PathBuf,
        link_dir: PathBuf,
        dry_run: bool,
    },
    /// A top-level directory was pruned by the keyspace filter.
    KeyspaceSkipped { keyspace: String },
    /// A `snapshots` directory with no column family above it in the data dir.
    ContainerIgnored { path: PathBuf },
    SnapshotFound {
        snapshot: String,
        keyspace: String,
        column_family: String,
        source_path: PathBuf,
    },
    ActionPlanned {
        kind: ActionKind,
        link_path: PathBuf,
    },
    LinkRemoved { link_path: PathBuf },
    LinkCreated {
        link_path: PathBuf,
        target_path: PathBuf,
    },
    RunFinished {
        created: usize,
        replaced: usize,
        skipped: usize,
    },
}

/// Sink for [`RunEvent`]s.
pub trait Reporter {
    fn report(&self, event: RunEvent);
}

/// Forwards events to `tracing` with structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: RunEvent) {
        match event {
            RunEvent::RunStarted {
                run_id,
                data_dir,
                link_dir,
                dry_run,
            } => info!(
                run_id = %run_id,
                data_dir = %data_dir.display(),
                link_dir = %link_dir.display(),
                dry_run,
                "Starting snapshot link run"
            ),
            RunEvent::KeyspaceSkipped { keyspace } => {
                debug!(keyspace = %keyspace, "Skipping keyspace not in filter")
            }
            RunEvent::ContainerIgnored { path } => debug!(
                path = %path.display(),
                "Ignoring snapshots directory directly under a keyspace"
            ),
            RunEvent::SnapshotFound {
                snapshot,
                keyspace,
                column_family,
                source_path,
            } => debug!(
                snapshot = %snapshot,
                keyspace = %keyspace,
                column_family = %column_family,
                source_path = %source_path.display(),
                "Found snapshot"
            ),
            RunEvent::ActionPlanned { kind, link_path } => {
                if kind == ActionKind::Skip {
                    warn!(link_path = %link_path.display(), "Link exists, not replacing it");
                } else {
                    debug!(action = %kind, link_path = %link_path.display(), "Planned link");
                }
            }
            RunEvent::LinkRemoved { link_path } => {
                info!(link_path = %link_path.display(), "Removed existing link")
            }
            RunEvent::LinkCreated {
                link_path,
                target_path,
            } => info!(
                link_path = %link_path.display(),
                target_path = %target_path.display(),
                "Created link"
            ),
            RunEvent::RunFinished {
                created,
                replaced,
                skipped,
            } => info!(created, replaced, skipped, "Snapshot link run finished"),
        }
    }
}

/// Collects events in memory, mostly useful in tests.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: Mutex<Vec<RunEvent>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events reported so far
    pub fn events(&self) -> Vec<RunEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, event: RunEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
