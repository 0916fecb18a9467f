mod paths;

pub use paths::{path_components, trailing_components};

/// Name of the directory Cassandra keeps snapshots in, under each column family
pub const SNAPSHOTS_DIR: &str = "snapshots";

/// Default Cassandra data directory
pub const DEFAULT_DATA_DIR: &str = "/var/lib/cassandra/data";

/// Get current timestamp in ISO 8601 format
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}
