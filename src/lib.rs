pub mod config;
pub mod executor;
pub mod linker;
pub mod planner;
pub mod reporter;
pub mod scanner;
pub mod utils;

// Re-export commonly used types
pub use config::{ConfigError, LinkOptions};
pub use executor::{execute, ExecuteError, ExecutionReport};
pub use linker::{run, LinkError, RunSummary};
pub use planner::{plan, ActionKind, LinkState, PlanAction, PlanError};
pub use reporter::{MemoryReporter, Reporter, RunEvent, TracingReporter};
pub use scanner::{scan, ScanError, ScanMode, SnapshotRecord};
