use super::types::{ScanMode, SnapshotRecord};
use super::ScanError;
use crate::reporter::{Reporter, RunEvent};
use crate::utils::{trailing_components, SNAPSHOTS_DIR};
use std::collections::{HashSet, VecDeque};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Depth of `<keyspace>/<column_family>/snapshots` below the data directory
const CONTAINER_MIN_DEPTH: usize = 3;

/// Scan `data_dir` for snapshot directories.
///
/// The walk is lazy: nothing is read until the returned iterator is polled.
/// Top-level directories not named in `keyspaces` are never descended into.
pub fn scan<'a>(
    data_dir: &Path,
    mode: ScanMode,
    keyspaces: Option<&HashSet<String>>,
    reporter: &'a dyn Reporter,
) -> SnapshotScan<'a> {
    SnapshotScan {
        data_dir: data_dir.to_path_buf(),
        walker: WalkDir::new(data_dir)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter(),
        mode,
        keyspaces: keyspaces.cloned(),
        reporter,
        container: None,
        pending: VecDeque::new(),
        started: false,
        finished: false,
    }
}

/// A `snapshots` directory currently being listed by the walk
struct Container {
    depth: usize,
    keyspace: String,
    column_family: String,
}

/// Iterator over the snapshot directories of a data directory.
///
/// Yields at most one error, after which it is exhausted.
pub struct SnapshotScan<'a> {
    data_dir: PathBuf,
    walker: walkdir::IntoIter,
    mode: ScanMode,
    keyspaces: Option<HashSet<String>>,
    reporter: &'a dyn Reporter,
    container: Option<Container>,
    pending: VecDeque<SnapshotRecord>,
    started: bool,
    finished: bool,
}

impl SnapshotScan<'_> {
    fn is_pruned_keyspace(&self, entry: &DirEntry) -> bool {
        match &self.keyspaces {
            Some(keyspaces) => !keyspaces.contains(&*entry.file_name().to_string_lossy()),
            None => false,
        }
    }

    /// Handle one entry of the walk, queueing a record if it is a snapshot
    fn visit(&mut self, entry: DirEntry) {
        let depth = entry.depth();

        if self
            .container
            .as_ref()
            .is_some_and(|container| depth <= container.depth)
        {
            self.container = None;
        }

        if !entry.file_type().is_dir() {
            return;
        }

        if let Some(container) = &self.container {
            // Children of a snapshots directory are snapshots, never more structure
            let snapshot_name = entry.file_name().to_string_lossy().into_owned();
            if self.mode.matches(&snapshot_name) {
                self.pending.push_back(SnapshotRecord {
                    snapshot_name,
                    keyspace_name: container.keyspace.clone(),
                    column_family_name: container.column_family.clone(),
                    source_path: entry.path().to_path_buf(),
                });
            }
            self.walker.skip_current_dir();
            return;
        }

        if depth == 1 {
            if self.is_pruned_keyspace(&entry) {
                self.reporter.report(RunEvent::KeyspaceSkipped {
                    keyspace: entry.file_name().to_string_lossy().into_owned(),
                });
                self.walker.skip_current_dir();
            }
            return;
        }

        if entry.file_name() != OsStr::new(SNAPSHOTS_DIR) {
            return;
        }

        if depth < CONTAINER_MIN_DEPTH {
            // Walked as an ordinary column family directory
            self.reporter.report(RunEvent::ContainerIgnored {
                path: entry.path().to_path_buf(),
            });
        } else {
            let relative = entry.path().strip_prefix(&self.data_dir).unwrap_or(entry.path());
            if let Some(parts) = trailing_components(relative, 3) {
                self.container = Some(Container {
                    depth,
                    keyspace: parts[0].clone(),
                    column_family: parts[1].clone(),
                });
            }
        }
    }
}

impl Iterator for SnapshotScan<'_> {
    type Item = Result<SnapshotRecord, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                self.reporter.report(RunEvent::SnapshotFound {
                    snapshot: record.snapshot_name.clone(),
                    keyspace: record.keyspace_name.clone(),
                    column_family: record.column_family_name.clone(),
                    source_path: record.source_path.clone(),
                });
                return Some(Ok(record));
            }

            if self.finished {
                return None;
            }

            if !self.started {
                self.started = true;
                // A file root would otherwise be walked as an empty tree
                if fs::metadata(&self.data_dir).is_ok_and(|meta| !meta.is_dir()) {
                    self.finished = true;
                    return Some(Err(ScanError::NotADirectory(self.data_dir.clone())));
                }
            }

            match self.walker.next() {
                Some(Ok(entry)) => self.visit(entry),
                Some(Err(err)) => {
                    self.finished = true;
                    return Some(Err(ScanError::from(err)));
                }
                None => {
                    self.finished = true;
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::MemoryReporter;
    use std::fs;

    fn make_snapshot(root: &Path, keyspace: &str, cf: &str, snapshot: &str) -> PathBuf {
        let path = root.join(keyspace).join(cf).join(SNAPSHOTS_DIR).join(snapshot);
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("data.db"), b"sstable").unwrap();
        path
    }

    fn collect(scan: SnapshotScan<'_>) -> Vec<SnapshotRecord> {
        scan.collect::<Result<Vec<_>, _>>().unwrap()
    }

    #[test]
    fn test_scan_all_snapshots() {
        let temp = tempfile::tempdir().unwrap();
        make_snapshot(temp.path(), "ks1", "cf1", "a");
        make_snapshot(temp.path(), "ks1", "cf1", "b");
        make_snapshot(temp.path(), "ks2", "cf9", "a");
        let reporter = MemoryReporter::new();

        let records = collect(scan(temp.path(), ScanMode::All, None, &reporter));

        let names: Vec<_> = records
            .iter()
            .map(|r| {
                (
                    r.keyspace_name.as_str(),
                    r.column_family_name.as_str(),
                    r.snapshot_name.as_str(),
                )
            })
            .collect();
        assert_eq!(
            names,
            vec![("ks1", "cf1", "a"), ("ks1", "cf1", "b"), ("ks2", "cf9", "a")]
        );
        assert_eq!(reporter.events().len(), 3);
    }

    #[test]
    fn test_scan_single_snapshot() {
        let temp = tempfile::tempdir().unwrap();
        let wanted = make_snapshot(temp.path(), "ks1", "cf1", "wanted");
        make_snapshot(temp.path(), "ks1", "cf1", "other");
        let reporter = MemoryReporter::new();

        let records = collect(scan(
            temp.path(),
            ScanMode::Single("wanted".to_string()),
            None,
            &reporter,
        ));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source_path, wanted);
    }

    #[test]
    fn test_scan_does_not_descend_into_snapshot_data() {
        let temp = tempfile::tempdir().unwrap();
        let snapshot = make_snapshot(temp.path(), "ks1", "cf1", "s1");
        // A nested snapshots directory inside snapshot data must not be scanned
        fs::create_dir_all(snapshot.join("x").join(SNAPSHOTS_DIR).join("s1")).unwrap();
        fs::create_dir_all(snapshot.join(SNAPSHOTS_DIR).join("s1")).unwrap();
        let reporter = MemoryReporter::new();

        let records = collect(scan(temp.path(), ScanMode::All, None, &reporter));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source_path, snapshot);
    }

    #[test]
    fn test_scan_ignores_files_in_snapshots_container() {
        let temp = tempfile::tempdir().unwrap();
        make_snapshot(temp.path(), "ks1", "cf1", "s1");
        fs::write(
            temp.path().join("ks1/cf1").join(SNAPSHOTS_DIR).join("stray.txt"),
            b"",
        )
        .unwrap();
        let reporter = MemoryReporter::new();

        let records = collect(scan(temp.path(), ScanMode::All, None, &reporter));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].snapshot_name, "s1");
    }

    #[test]
    fn test_scan_top_level_snapshots_is_a_keyspace() {
        let temp = tempfile::tempdir().unwrap();
        make_snapshot(temp.path(), SNAPSHOTS_DIR, "cf1", "s1");
        let reporter = MemoryReporter::new();

        let records = collect(scan(temp.path(), ScanMode::All, None, &reporter));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].keyspace_name, SNAPSHOTS_DIR);
        assert_eq!(records[0].column_family_name, "cf1");
    }

    #[test]
    fn test_scan_prunes_filtered_keyspaces() {
        let temp = tempfile::tempdir().unwrap();
        make_snapshot(temp.path(), "ks1", "cf1", "s1");
        make_snapshot(temp.path(), "ks2", "cf1", "s1");
        let filter: HashSet<String> = ["ks1".to_string()].into_iter().collect();
        let reporter = MemoryReporter::new();

        let records = collect(scan(temp.path(), ScanMode::All, Some(&filter), &reporter));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].keyspace_name, "ks1");
        assert!(reporter
            .events()
            .contains(&RunEvent::KeyspaceSkipped { keyspace: "ks2".to_string() }));
    }

    #[test]
    fn test_scan_missing_data_dir_fails() {
        let temp = tempfile::tempdir().unwrap();
        let reporter = MemoryReporter::new();

        let mut results = scan(&temp.path().join("missing"), ScanMode::All, None, &reporter);

        assert!(matches!(results.next(), Some(Err(ScanError::WalkError(_)))));
        assert!(results.next().is_none());
    }

    #[test]
    fn test_scan_reports_snapshots_dir_under_keyspace() {
        let temp = tempfile::tempdir().unwrap();
        let shallow = temp.path().join("ks1").join(SNAPSHOTS_DIR);
        fs::create_dir_all(shallow.join("s1")).unwrap();
        make_snapshot(temp.path(), "ks1", "cf1", "s1");
        let reporter = MemoryReporter::new();

        let records = collect(scan(temp.path(), ScanMode::All, None, &reporter));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].column_family_name, "cf1");
        assert!(reporter
            .events()
            .contains(&RunEvent::ContainerIgnored { path: shallow }));
    }

    #[test]
    fn test_scan_file_data_dir_fails() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("not-a-dir");
        fs::write(&file, b"").unwrap();
        let reporter = MemoryReporter::new();

        let mut results = scan(&file, ScanMode::All, None, &reporter);

        assert!(matches!(results.next(), Some(Err(ScanError::NotADirectory(_)))));
        assert!(results.next().is_none());
    }
}
