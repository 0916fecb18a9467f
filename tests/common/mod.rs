#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Create `<data_dir>/<keyspace>/<cf>/snapshots/<snapshot>` with one data file
pub fn create_snapshot(data_dir: &Path, keyspace: &str, cf: &str, snapshot: &str) -> PathBuf {
    let path = data_dir
        .join(keyspace)
        .join(cf)
        .join("snapshots")
        .join(snapshot);
    fs::create_dir_all(&path).expect("Should create snapshot dir");
    fs::write(path.join("mc-1-big-Data.db"), b"sstable").expect("Should write data file");
    path
}

/// Path, inode and mtime of every entry under `root`, without following links
#[cfg(unix)]
pub fn fs_state(root: &Path) -> Vec<(PathBuf, u64, Option<SystemTime>)> {
    use std::os::unix::fs::MetadataExt;

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            let entry = entry.expect("Should walk");
            let meta = fs::symlink_metadata(entry.path()).expect("Should stat");
            (entry.path().to_path_buf(), meta.ino(), meta.modified().ok())
        })
        .collect()
}
